//! Greedy fill primitives shared by every strategy.

use super::instance::ProblemInstance;

/// Outcome of a greedy pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyFill {
    /// Value of the items added by this pass.
    pub value: u64,
    /// Capacity left after the pass.
    pub remaining: u64,
    /// Indices added, in the order they were taken.
    pub taken: Vec<usize>,
}

/// Packs items from `order` while they fit into `capacity`.
///
/// Stops at the first item that does not fit; it does not skip it and try
/// later items. `order` usually lists the items not yet packed.
pub fn greedy_fill<I>(instance: &ProblemInstance, capacity: u64, order: I) -> GreedyFill
where
    I: IntoIterator<Item = usize>,
{
    let mut value = 0u64;
    let mut remaining = capacity;
    let mut taken = Vec::new();

    for i in order {
        let item = instance.item(i);
        if item.weight > remaining {
            break;
        }
        value += item.value;
        remaining -= item.weight;
        taken.push(i);
    }

    GreedyFill {
        value,
        remaining,
        taken,
    }
}

/// In-order greedy baseline.
///
/// Walks items in original order and packs every item that still fits,
/// skipping those that do not. Cheap reference solution for any instance.
pub fn solve_greedy(instance: &ProblemInstance) -> GreedyFill {
    let mut value = 0u64;
    let mut remaining = instance.capacity();
    let mut taken = Vec::new();

    for (i, item) in instance.items().iter().enumerate() {
        if item.weight <= remaining {
            value += item.value;
            remaining -= item.weight;
            taken.push(i);
        }
    }

    GreedyFill {
        value,
        remaining,
        taken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ProblemInstance {
        ProblemInstance::load(10, &[(5, 4), (6, 7), (3, 2), (1, 1)]).unwrap()
    }

    #[test]
    fn test_greedy_fill_stops_at_first_misfit() {
        let inst = instance();
        let fill = greedy_fill(&inst, inst.capacity(), 0..inst.len());
        // item 1 (w=7) does not fit after item 0; items 2 and 3 are never tried
        assert_eq!(fill.taken, vec![0]);
        assert_eq!(fill.value, 5);
        assert_eq!(fill.remaining, 6);
    }

    #[test]
    fn test_greedy_fill_custom_order() {
        let inst = instance();
        let fill = greedy_fill(&inst, 10, [2, 3, 0, 1]);
        assert_eq!(fill.taken, vec![2, 3, 0]);
        assert_eq!(fill.value, 9);
        assert_eq!(fill.remaining, 3);
    }

    #[test]
    fn test_greedy_fill_zero_capacity() {
        let inst = ProblemInstance::load(0, &[(4, 0), (3, 1)]).unwrap();
        let fill = greedy_fill(&inst, 0, 0..2);
        assert_eq!(fill.taken, vec![0]);
        assert_eq!(fill.value, 4);
    }

    #[test]
    fn test_solve_greedy_skips_and_continues() {
        let fill = solve_greedy(&instance());
        assert_eq!(fill.taken, vec![0, 2, 3]);
        assert_eq!(fill.value, 9);
        assert_eq!(fill.remaining, 3);
    }
}
