//! Solver output.

use crate::dispatch::Strategy;
use crate::model::ProblemInstance;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A solved knapsack instance.
///
/// `assignment[i]` is 1 when item `i` is packed, 0 otherwise, in the
/// original item order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnapsackSolution {
    /// Total packed value, in original units.
    pub value: u64,
    /// 0/1 flag per item.
    pub assignment: Vec<u8>,
    /// Whether `value` is proven optimal.
    pub optimal: bool,
    /// Strategy that produced the result.
    pub strategy: Strategy,
}

impl KnapsackSolution {
    /// Builds a solution from packed indices.
    pub fn from_items(
        instance: &ProblemInstance,
        items: &[usize],
        optimal: bool,
        strategy: Strategy,
    ) -> Self {
        Self {
            value: instance.value_of(items),
            assignment: instance.assignment(items),
            optimal,
            strategy,
        }
    }

    /// Packed item indices, ascending.
    pub fn items(&self) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter(|(_, &flag)| flag == 1)
            .map(|(i, _)| i)
            .collect()
    }

    /// Total weight of the packed items.
    pub fn weight(&self, instance: &ProblemInstance) -> u64 {
        instance.weight_of(&self.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items() {
        let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
        let sol = KnapsackSolution::from_items(&inst, &[3, 2], true, Strategy::Dp);
        assert_eq!(sol.value, 19);
        assert_eq!(sol.assignment, vec![0, 0, 1, 1]);
        assert_eq!(sol.items(), vec![2, 3]);
        assert_eq!(sol.weight(&inst), 11);
    }
}
