//! Dispatcher configuration.

use crate::bnb::BnbConfig;
use crate::dp::DpConfig;
use crate::ga::GaConfig;
use std::time::Duration;

/// Configuration for [`Solver`](super::Solver).
///
/// # Defaults
///
/// ```
/// use u_knapsack::dispatch::SolveConfig;
///
/// let config = SolveConfig::default();
/// assert_eq!(config.small_instance_items, 20);
/// assert_eq!(config.dp.max_cells, 100_000_000);
/// assert_eq!(config.time_budget_ms, 4 * 60 * 60 * 1000);
/// assert_eq!(config.heuristic_time_ms, 120_000);
/// ```
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Instances with fewer items go straight to branch-and-bound.
    pub small_instance_items: usize,

    /// DP settings, including the state-space threshold.
    pub dp: DpConfig,

    /// Branch-and-bound settings.
    ///
    /// Its time limit, if any, is further capped by the overall budget.
    pub bnb: BnbConfig,

    /// Population search settings for the heuristic path.
    pub ga: GaConfig,

    /// Total wall-clock budget in milliseconds.
    pub time_budget_ms: u64,

    /// Share of the budget given to population search on the heuristic
    /// path, in milliseconds. Branch-and-bound gets the rest.
    pub heuristic_time_ms: u64,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            small_instance_items: 20,
            dp: DpConfig::default(),
            bnb: BnbConfig::default(),
            ga: GaConfig::default(),
            time_budget_ms: 4 * 60 * 60 * 1000,
            heuristic_time_ms: 120_000,
        }
    }
}

impl SolveConfig {
    /// Sets the small-instance threshold.
    pub fn with_small_instance_items(mut self, n: usize) -> Self {
        self.small_instance_items = n;
        self
    }

    /// Sets the DP configuration.
    pub fn with_dp(mut self, dp: DpConfig) -> Self {
        self.dp = dp;
        self
    }

    /// Sets the branch-and-bound configuration.
    pub fn with_bnb(mut self, bnb: BnbConfig) -> Self {
        self.bnb = bnb;
        self
    }

    /// Sets the population search configuration.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the total time budget in milliseconds.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Sets the population search time in milliseconds.
    pub fn with_heuristic_time_ms(mut self, ms: u64) -> Self {
        self.heuristic_time_ms = ms;
        self
    }

    /// Total budget as a [`Duration`].
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Population search time limit, capped by the total budget and by the
    /// GA's own limit.
    pub fn heuristic_time_limit_ms(&self) -> u64 {
        let limit = self.heuristic_time_ms.min(self.time_budget_ms);
        self.ga.time_limit_ms.map_or(limit, |ms| ms.min(limit)).max(1)
    }

    /// Validates the configuration and every nested one.
    pub fn validate(&self) -> Result<(), String> {
        self.dp.validate().map_err(|e| format!("dp: {e}"))?;
        self.bnb.validate().map_err(|e| format!("bnb: {e}"))?;
        self.ga.validate().map_err(|e| format!("ga: {e}"))?;
        if self.time_budget_ms == 0 {
            return Err("time_budget_ms must be positive".into());
        }
        if self.heuristic_time_ms == 0 {
            return Err("heuristic_time_ms must be positive".into());
        }
        Ok(())
    }
}
