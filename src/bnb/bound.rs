//! Ratio-sorted item table and the fractional relaxation bound.

use crate::model::ProblemInstance;

/// Items re-indexed by descending value/weight ratio.
///
/// Search depth `k` refers to the `k`-th item of this order. Prefix sums of
/// values and weights make [`bound`](Self::bound) `O(log n)`.
#[derive(Debug, Clone)]
pub struct RatioTable {
    capacity: u64,
    order: Vec<usize>,
    values: Vec<u64>,
    weights: Vec<u64>,
    prefix_values: Vec<u64>,
    prefix_weights: Vec<u64>,
}

impl RatioTable {
    /// Sorts the instance's items by ratio and precomputes prefix sums.
    pub fn new(instance: &ProblemInstance) -> Self {
        let order = instance.ratio_order();
        let values: Vec<u64> = order.iter().map(|&i| instance.item(i).value).collect();
        let weights: Vec<u64> = order.iter().map(|&i| instance.item(i).weight).collect();

        let mut prefix_values = Vec::with_capacity(order.len() + 1);
        let mut prefix_weights = Vec::with_capacity(order.len() + 1);
        prefix_values.push(0);
        prefix_weights.push(0);
        for k in 0..order.len() {
            prefix_values.push(prefix_values[k] + values[k]);
            prefix_weights.push(prefix_weights[k] + weights[k]);
        }

        Self {
            capacity: instance.capacity(),
            order,
            values,
            weights,
            prefix_values,
            prefix_weights,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Knapsack capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Original index of the item at sorted position `k`.
    pub fn original_index(&self, k: usize) -> usize {
        self.order[k]
    }

    /// Value of the item at sorted position `k`.
    pub fn value(&self, k: usize) -> u64 {
        self.values[k]
    }

    /// Weight of the item at sorted position `k`.
    pub fn weight(&self, k: usize) -> u64 {
        self.weights[k]
    }

    /// Upper bound on the total value reachable from a partial state.
    ///
    /// `sv`/`sw` are the value and weight accumulated after deciding sorted
    /// items `0..depth`. Remaining items are packed whole in ratio order
    /// while they fit, then the first one that does not fit contributes the
    /// fraction `remaining / weight` of its value, rounded down.
    ///
    /// The LP relaxation never underestimates the best completion, and
    /// every feasible total is an integer, so the floor is still a valid
    /// bound.
    ///
    /// Requires `sw <= capacity`.
    pub fn bound(&self, sv: u64, sw: u64, depth: usize) -> u64 {
        debug_assert!(sw <= self.capacity);
        let n = self.order.len();
        if depth >= n {
            return sv;
        }

        let budget = self.capacity - sw;
        let base_w = self.prefix_weights[depth];
        let base_v = self.prefix_values[depth];

        // Last position j such that items depth..j all fit. Position 0 of
        // the slice (j == depth) always qualifies.
        let fitting = self.prefix_weights[depth..=n].partition_point(|&pw| pw - base_w <= budget);
        let j = depth + fitting - 1;

        let whole = sv + (self.prefix_values[j] - base_v);
        if j == n {
            return whole;
        }

        let rest = budget - (self.prefix_weights[j] - base_w);
        let fraction = (rest as u128 * self.values[j] as u128) / self.weights[j] as u128;
        whole + fraction as u64
    }
}
