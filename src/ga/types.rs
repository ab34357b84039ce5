//! Candidate solution representation.
//!
//! A [`Candidate`] partitions the item indices into `elements` (packed)
//! and `complement` (not packed) and maintains value and residual capacity
//! incrementally. It can only be changed through [`Candidate::update`],
//! [`Candidate::top_up`] and [`Candidate::repair`], which keep the
//! partition intact.

use crate::model::ProblemInstance;
use std::collections::BTreeSet;

/// A knapsack packing used by population search.
///
/// `remaining_capacity` may go negative transiently after a crossover or
/// mutation; [`repair`](Self::repair) restores feasibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    elements: BTreeSet<usize>,
    complement: BTreeSet<usize>,
    value: u64,
    remaining_capacity: i128,
}

impl Candidate {
    /// The empty packing.
    pub fn empty(instance: &ProblemInstance) -> Self {
        Self {
            elements: BTreeSet::new(),
            complement: (0..instance.len()).collect(),
            value: 0,
            remaining_capacity: instance.capacity() as i128,
        }
    }

    /// Builds a candidate packing exactly `elements`.
    ///
    /// Value and residual capacity are computed from scratch. Out-of-range
    /// indices are ignored.
    pub fn from_elements<I>(instance: &ProblemInstance, elements: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let elements: BTreeSet<usize> = elements
            .into_iter()
            .filter(|&i| i < instance.len())
            .collect();
        let complement = (0..instance.len())
            .filter(|i| !elements.contains(i))
            .collect();
        let value = instance.value_of(&elements);
        let weight = instance.weight_of(&elements);
        Self {
            elements,
            complement,
            value,
            remaining_capacity: instance.capacity() as i128 - weight as i128,
        }
    }

    /// Packed item indices, ascending.
    pub fn elements(&self) -> &BTreeSet<usize> {
        &self.elements
    }

    /// Unpacked item indices, ascending.
    pub fn complement(&self) -> &BTreeSet<usize> {
        &self.complement
    }

    /// Sum of packed values.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Capacity minus packed weight; negative when overfull.
    pub fn remaining_capacity(&self) -> i128 {
        self.remaining_capacity
    }

    /// Whether the packed weight fits.
    pub fn is_feasible(&self) -> bool {
        self.remaining_capacity >= 0
    }

    /// Ranking score.
    ///
    /// Equals the value when feasible. An overfull candidate scores
    /// `value / (2 · (1 − remaining))`, which is always below its own value.
    pub fn score(&self) -> f64 {
        if self.remaining_capacity >= 0 {
            self.value as f64
        } else {
            self.value as f64 / (2.0 * (1 - self.remaining_capacity) as f64)
        }
    }

    /// Packed indices as a sorted vector, used as the duplicate key.
    pub fn key(&self) -> Vec<usize> {
        self.elements.iter().copied().collect()
    }

    /// Moves `remove` out of and `add` into the packing.
    ///
    /// Indices that are not on the expected side are ignored, so the
    /// partition is preserved whatever the caller passes.
    pub fn update(&mut self, instance: &ProblemInstance, add: &[usize], remove: &[usize]) {
        for &i in remove {
            if self.elements.remove(&i) {
                self.complement.insert(i);
                let item = instance.item(i);
                self.value -= item.value;
                self.remaining_capacity += item.weight as i128;
            }
        }
        for &i in add {
            if self.complement.remove(&i) {
                self.elements.insert(i);
                let item = instance.item(i);
                self.value += item.value;
                self.remaining_capacity -= item.weight as i128;
            }
        }
    }

    /// Packs every unpacked item that still fits, scanning in original
    /// order.
    ///
    /// Afterwards no complement item has weight `<= remaining_capacity`.
    /// Does nothing while the candidate is overfull.
    pub fn top_up(&mut self, instance: &ProblemInstance) {
        if self.remaining_capacity < 0 {
            return;
        }
        let fitting: Vec<usize> = self
            .complement
            .iter()
            .copied()
            .filter(|&i| (instance.item(i).weight as i128) <= self.remaining_capacity)
            .collect();
        for i in fitting {
            let weight = instance.item(i).weight as i128;
            if weight <= self.remaining_capacity {
                self.update(instance, &[i], &[]);
            }
        }
    }

    /// Restores feasibility, then tops up.
    ///
    /// While overfull, drops the packed item with the lowest value/weight
    /// ratio (the earliest index among ties).
    pub fn repair(&mut self, instance: &ProblemInstance) {
        while self.remaining_capacity < 0 {
            let worst = self
                .elements
                .iter()
                .copied()
                .min_by(|&a, &b| instance.item(a).cmp_ratio(&instance.item(b)));
            match worst {
                Some(i) => self.update(instance, &[], &[i]),
                None => break,
            }
        }
        self.top_up(instance);
    }
}
