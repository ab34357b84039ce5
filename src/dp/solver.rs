//! DP table construction and item reconstruction.

use crate::model::ProblemInstance;
use tracing::debug;

/// Result of a DP run. Always provably optimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpResult {
    /// Optimal total value.
    pub value: u64,
    /// Chosen item indices, ascending.
    pub items: Vec<usize>,
    /// Number of table cells evaluated.
    pub cells: u64,
}

/// Exact DP solver.
///
/// Only two rows of values are kept alive. For reconstruction a packed bit
/// matrix records, per row `i` and capacity `c`, whether
/// `table[i][c] != table[i-1][c]`; that is exactly the test the backward
/// walk needs, at 1/64 of the memory of the full value table.
///
/// # Usage
///
/// ```
/// use u_knapsack::dp::DpSolver;
/// use u_knapsack::model::ProblemInstance;
///
/// let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
/// let result = DpSolver::solve(&inst);
/// assert_eq!(result.value, 19);
/// ```
pub struct DpSolver;

impl DpSolver {
    /// Solves the instance to optimality.
    ///
    /// # Panics
    /// Panics if the capacity does not fit in `usize`; check
    /// [`DpConfig::is_applicable`](super::DpConfig::is_applicable) first.
    pub fn solve(instance: &ProblemInstance) -> DpResult {
        let n = instance.len();
        let capacity =
            usize::try_from(instance.capacity()).expect("capacity exceeds addressable memory");
        let width = capacity + 1;

        debug!(items = n, capacity, "building DP table");

        let mut prev = vec![0u64; width];
        let mut curr = vec![0u64; width];
        let mut changed = BitMatrix::new(n, width);

        for (i, item) in instance.items().iter().enumerate() {
            for c in 0..width {
                let skip = prev[c];
                curr[c] = if item.weight > c as u64 {
                    skip
                } else {
                    let take = prev[c - item.weight as usize] + item.value;
                    if take > skip {
                        changed.set(i, c);
                        take
                    } else {
                        skip
                    }
                };
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        let value = prev[capacity];

        let mut items = Vec::new();
        let mut c = capacity;
        for i in (0..n).rev() {
            if changed.get(i, c) {
                items.push(i);
                c -= instance.item(i).weight as usize;
            }
        }
        items.reverse();

        DpResult {
            value,
            items,
            cells: (n as u64) * (width as u64),
        }
    }
}

/// Row-major packed bit matrix.
struct BitMatrix {
    words_per_row: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        let words_per_row = cols.div_ceil(64);
        Self {
            words_per_row,
            words: vec![0; rows * words_per_row],
        }
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize) {
        self.words[row * self.words_per_row + col / 64] |= 1 << (col % 64);
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> bool {
        self.words[row * self.words_per_row + col / 64] & (1 << (col % 64)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_instance() {
        let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
        let result = DpSolver::solve(&inst);
        assert_eq!(result.value, 19);
        assert_eq!(inst.value_of(&result.items), 19);
        assert!(inst.is_feasible(&result.items));
        assert_eq!(result.cells, 4 * 12);
    }

    #[test]
    fn test_empty_instance() {
        let inst = ProblemInstance::load(10, &[]).unwrap();
        let result = DpSolver::solve(&inst);
        assert_eq!(result.value, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_zero_capacity_with_free_items() {
        let inst = ProblemInstance::load(0, &[(3, 0), (5, 1), (2, 0)]).unwrap();
        let result = DpSolver::solve(&inst);
        assert_eq!(result.value, 5);
        assert_eq!(result.items, vec![0, 2]);
    }

    #[test]
    fn test_nothing_fits() {
        let inst = ProblemInstance::load(3, &[(10, 4), (20, 5)]).unwrap();
        let result = DpSolver::solve(&inst);
        assert_eq!(result.value, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_wide_table_crosses_word_boundaries() {
        let inst =
            ProblemInstance::load(200, &[(60, 70), (50, 65), (70, 90), (30, 40), (45, 66)])
                .unwrap();
        let result = DpSolver::solve(&inst);
        // 60+50+30 = 140 at weight 175; 60+70+30 = 160 at weight 200
        assert_eq!(result.value, 160);
        assert_eq!(result.items, vec![0, 2, 3]);
    }

    #[test]
    fn test_bit_matrix() {
        let mut m = BitMatrix::new(3, 130);
        m.set(0, 0);
        m.set(1, 64);
        m.set(2, 129);
        assert!(m.get(0, 0));
        assert!(m.get(1, 64));
        assert!(m.get(2, 129));
        assert!(!m.get(1, 63));
        assert!(!m.get(2, 128));
    }
}
