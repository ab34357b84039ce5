//! Branch-and-bound configuration.

use super::types::Traversal;
use std::time::Duration;

/// Configuration for [`BnbRunner`](super::BnbRunner).
///
/// # Defaults
///
/// ```
/// use u_knapsack::bnb::{BnbConfig, Traversal};
///
/// let config = BnbConfig::default();
/// assert_eq!(config.traversal, Traversal::Hybrid);
/// assert_eq!(config.check_interval, 1000);
/// assert!(config.time_limit.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::bnb::{BnbConfig, Traversal};
///
/// let config = BnbConfig::default()
///     .with_traversal(Traversal::BestFirst)
///     .with_time_limit_ms(500)
///     .with_check_interval(256);
/// ```
#[derive(Debug, Clone)]
pub struct BnbConfig {
    /// Frontier traversal policy.
    pub traversal: Traversal,

    /// Wall-clock budget. `None` searches until the tree is exhausted.
    ///
    /// A zero budget is allowed and stops at the first clock check.
    pub time_limit: Option<Duration>,

    /// Node expansions between clock (and cancellation) checks.
    pub check_interval: u64,

    /// Frontier size above which the hybrid policy switches to depth-first
    /// for the next popped node.
    pub hybrid_frontier_limit: usize,

    /// Seed the incumbent with a ratio-order greedy packing before search.
    pub seed_greedy: bool,

    /// Check a warm start for feasibility and recompute its value before
    /// trusting it as the incumbent.
    pub validate_warm_start: bool,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            traversal: Traversal::Hybrid,
            time_limit: None,
            check_interval: 1000,
            hybrid_frontier_limit: 100_000,
            seed_greedy: true,
            validate_warm_start: true,
        }
    }
}

impl BnbConfig {
    /// Sets the traversal policy.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the wall-clock budget in milliseconds.
    pub fn with_time_limit_ms(self, ms: u64) -> Self {
        self.with_time_limit(Duration::from_millis(ms))
    }

    /// Sets how many expansions pass between clock checks.
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval;
        self
    }

    /// Sets the hybrid frontier limit.
    pub fn with_hybrid_frontier_limit(mut self, limit: usize) -> Self {
        self.hybrid_frontier_limit = limit;
        self
    }

    /// Enables or disables the greedy incumbent seed.
    pub fn with_seed_greedy(mut self, seed: bool) -> Self {
        self.seed_greedy = seed;
        self
    }

    /// Enables or disables warm start validation.
    pub fn with_validate_warm_start(mut self, validate: bool) -> Self {
        self.validate_warm_start = validate;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.check_interval == 0 {
            return Err("check_interval must be at least 1".into());
        }
        if self.traversal == Traversal::Hybrid && self.hybrid_frontier_limit == 0 {
            return Err("hybrid_frontier_limit must be at least 1".into());
        }
        Ok(())
    }
}
