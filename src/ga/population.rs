//! Bounded, de-duplicated, score-ranked candidate pool.

use super::types::Candidate;
use std::collections::HashSet;

/// Outcome of [`Population::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Inserted at the given rank (0 = best).
    Inserted(usize),
    /// An entry with the same packed set already exists.
    Duplicate,
    /// The pool is full and the candidate does not beat the worst entry.
    Rejected,
}

/// Candidates sorted by descending score, at most `capacity` of them, no
/// two with the same packed set.
#[derive(Debug, Clone)]
pub struct Population {
    capacity: usize,
    entries: Vec<(f64, Candidate)>,
    seen: HashSet<Vec<usize>>,
}

impl Population {
    /// Creates an empty population holding at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(4096)),
            seen: HashSet::new(),
        }
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a candidate with this packed set is present.
    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.seen.contains(&candidate.key())
    }

    /// Inserts a candidate, evicting the worst entry when full.
    ///
    /// Equal scores keep insertion order (the newcomer ranks after).
    pub fn insert(&mut self, candidate: Candidate) -> Insertion {
        if self.capacity == 0 {
            return Insertion::Rejected;
        }
        let key = candidate.key();
        if self.seen.contains(&key) {
            return Insertion::Duplicate;
        }

        let score = candidate.score();
        if self.entries.len() >= self.capacity {
            match self.entries.last() {
                Some((worst, _)) if score <= *worst => return Insertion::Rejected,
                _ => {}
            }
        }

        let rank = self.entries.partition_point(|(s, _)| *s >= score);
        self.entries.insert(rank, (score, candidate));
        self.seen.insert(key);

        if self.entries.len() > self.capacity {
            if let Some((_, evicted)) = self.entries.pop() {
                self.seen.remove(&evicted.key());
            }
        }

        Insertion::Inserted(rank)
    }

    /// Candidate at `rank` (0 = best).
    pub fn get(&self, rank: usize) -> Option<&Candidate> {
        self.entries.get(rank).map(|(_, c)| c)
    }

    /// Best candidate.
    pub fn best(&self) -> Option<&Candidate> {
        self.get(0)
    }

    /// Score of the best candidate.
    pub fn best_score(&self) -> Option<f64> {
        self.entries.first().map(|(s, _)| *s)
    }

    /// Candidates from best to worst.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter().map(|(_, c)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProblemInstance;

    fn instance() -> ProblemInstance {
        ProblemInstance::load(20, &[(5, 3), (8, 6), (3, 2), (7, 5), (1, 1)]).unwrap()
    }

    #[test]
    fn test_sorted_by_score() {
        let inst = instance();
        let mut pop = Population::new(10);
        pop.insert(Candidate::from_elements(&inst, [0]));
        pop.insert(Candidate::from_elements(&inst, [1]));
        pop.insert(Candidate::from_elements(&inst, [2]));

        let values: Vec<u64> = pop.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![8, 5, 3]);
        assert_eq!(pop.best_score(), Some(8.0));
    }

    #[test]
    fn test_dedup_keeps_one_entry() {
        let inst = instance();
        let mut pop = Population::new(10);
        assert_eq!(
            pop.insert(Candidate::from_elements(&inst, [0, 2])),
            Insertion::Inserted(0)
        );
        assert_eq!(
            pop.insert(Candidate::from_elements(&inst, [2, 0])),
            Insertion::Duplicate
        );
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn test_eviction_of_worst() {
        let inst = instance();
        let mut pop = Population::new(2);
        pop.insert(Candidate::from_elements(&inst, [0]));
        pop.insert(Candidate::from_elements(&inst, [2]));
        assert_eq!(
            pop.insert(Candidate::from_elements(&inst, [1])),
            Insertion::Inserted(0)
        );
        assert_eq!(pop.len(), 2);

        let evicted = Candidate::from_elements(&inst, [2]);
        assert!(!pop.contains(&evicted));
        // The evicted set may come back once it beats the new worst entry.
        assert_eq!(pop.insert(evicted), Insertion::Rejected);
        assert_eq!(
            pop.insert(Candidate::from_elements(&inst, [1, 3])),
            Insertion::Inserted(0)
        );
        assert_eq!(pop.iter().map(|c| c.value()).collect::<Vec<_>>(), vec![15, 8]);
    }

    #[test]
    fn test_full_rejects_not_better() {
        let inst = instance();
        let mut pop = Population::new(1);
        pop.insert(Candidate::from_elements(&inst, [1]));
        assert_eq!(
            pop.insert(Candidate::from_elements(&inst, [0, 2])),
            Insertion::Rejected
        );
        assert_eq!(pop.best().map(|c| c.value()), Some(8));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let inst = instance();
        let mut pop = Population::new(5);
        pop.insert(Candidate::from_elements(&inst, [1]));
        assert_eq!(
            pop.insert(Candidate::from_elements(&inst, [0, 2])),
            Insertion::Inserted(1)
        );
    }
}
