//! Population search configuration.
//!
//! [`GaConfig`] holds all parameters that control the steady-state search
//! loop, including its stopping rules.

/// Configuration for population search.
///
/// # Defaults
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.inverse_mutation_ratio, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_weight_ratio(0.9)
///     .with_max_iterations(50_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Maximum number of distinct candidates kept.
    pub population_size: usize,

    /// Number of shuffled greedy fills used to seed the population.
    ///
    /// Duplicates are dropped, so the initial population may be smaller.
    pub seed_rounds: usize,

    /// Number of top ranks the roulette wheel can select from.
    pub roulette_entries: usize,

    /// Geometric weight ratio of the roulette wheel, in `(0, 1)`.
    ///
    /// Rank `i` is drawn with weight `weight_ratio^(i + 1)`. Values close to
    /// 1 flatten the wheel; small values concentrate on the best ranks.
    pub weight_ratio: f64,

    /// One iteration in `inverse_mutation_ratio` mutates; the rest cross over.
    pub inverse_mutation_ratio: u32,

    /// Packed items dropped by a mutation.
    pub mutation_removals: usize,

    /// Unpacked items forced in by a mutation before repair.
    ///
    /// Zero by default: freed capacity is refilled by the repair pass.
    pub mutation_additions: usize,

    /// Number of top candidates written to the checkpoint on improvement.
    pub snapshot_size: usize,

    /// Maximum number of iterations. Set to 0 for no limit.
    pub max_iterations: u64,

    /// Iterations without a new best before stopping. Set to 0 to disable.
    pub stagnation_limit: u64,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked before every iteration, so the overshoot is at most one
    /// iteration.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            seed_rounds: 1000,
            roulette_entries: 1000,
            weight_ratio: 0.8,
            inverse_mutation_ratio: 10,
            mutation_removals: 1,
            mutation_additions: 0,
            snapshot_size: 5,
            max_iterations: 1_000_000,
            stagnation_limit: 100_000,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of seeding rounds.
    pub fn with_seed_rounds(mut self, n: usize) -> Self {
        self.seed_rounds = n;
        self
    }

    /// Sets the number of ranks covered by the roulette wheel.
    pub fn with_roulette_entries(mut self, n: usize) -> Self {
        self.roulette_entries = n;
        self
    }

    /// Sets the roulette weight ratio.
    pub fn with_weight_ratio(mut self, ratio: f64) -> Self {
        self.weight_ratio = ratio;
        self
    }

    /// Sets the inverse mutation ratio (1 = always mutate).
    pub fn with_inverse_mutation_ratio(mut self, ratio: u32) -> Self {
        self.inverse_mutation_ratio = ratio;
        self
    }

    /// Sets how many items a mutation removes and adds.
    pub fn with_mutation_size(mut self, removals: usize, additions: usize) -> Self {
        self.mutation_removals = removals;
        self.mutation_additions = additions;
        self
    }

    /// Sets the checkpoint snapshot size.
    pub fn with_snapshot_size(mut self, n: usize) -> Self {
        self.snapshot_size = n;
        self
    }

    /// Sets the iteration limit (0 for no limit).
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: u64) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for fast search: small population, short budgets.
    ///
    /// - Population: 200, Seed rounds: 200
    /// - Iterations: 20 000, Stagnation limit: 5 000, Time limit: 10s
    pub fn fast() -> Self {
        Self {
            population_size: 200,
            seed_rounds: 200,
            roulette_entries: 200,
            max_iterations: 20_000,
            stagnation_limit: 5_000,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset for balanced search.
    ///
    /// - Population: 1000, Seed rounds: 1000
    /// - Iterations: 200 000, Stagnation limit: 50 000, Time limit: 30s
    pub fn balanced() -> Self {
        Self {
            max_iterations: 200_000,
            stagnation_limit: 50_000,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for quality search: large population, flatter wheel.
    ///
    /// - Population: 2000, Seed rounds: 2000, Weight ratio: 0.9
    /// - Iterations: 1 000 000, Stagnation limit: 200 000, Time limit: 60s
    pub fn quality() -> Self {
        Self {
            population_size: 2000,
            seed_rounds: 2000,
            roulette_entries: 2000,
            weight_ratio: 0.9,
            max_iterations: 1_000_000,
            stagnation_limit: 200_000,
            time_limit_ms: Some(60_000),
            ..Self::default()
        }
    }

    /// Automatically selects a preset based on the number of items.
    ///
    /// - `item_count < 100` → [`fast()`](Self::fast)
    /// - `100 ≤ item_count < 1000` → [`balanced()`](Self::balanced)
    /// - `item_count ≥ 1000` → [`quality()`](Self::quality)
    pub fn auto_select(item_count: usize) -> Self {
        if item_count < 100 {
            Self::fast()
        } else if item_count < 1000 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Whether any stopping rule is active.
    pub fn is_bounded(&self) -> bool {
        self.max_iterations > 0 || self.stagnation_limit > 0 || self.time_limit_ms.is_some()
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.seed_rounds == 0 {
            return Err("seed_rounds must be at least 1".into());
        }
        if self.roulette_entries == 0 {
            return Err("roulette_entries must be at least 1".into());
        }
        if !(self.weight_ratio > 0.0 && self.weight_ratio < 1.0) {
            return Err("weight_ratio must lie strictly between 0 and 1".into());
        }
        if self.inverse_mutation_ratio == 0 {
            return Err("inverse_mutation_ratio must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        if !self.is_bounded() {
            return Err(
                "no stopping rule: set max_iterations, stagnation_limit or time_limit_ms".into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 1000);
        assert_eq!(config.seed_rounds, 1000);
        assert_eq!(config.roulette_entries, 1000);
        assert!((config.weight_ratio - 0.8).abs() < 1e-12);
        assert_eq!(config.inverse_mutation_ratio, 10);
        assert_eq!(config.mutation_removals, 1);
        assert_eq!(config.mutation_additions, 0);
        assert_eq!(config.snapshot_size, 5);
        assert!(config.seed.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_seed_rounds(20)
            .with_roulette_entries(30)
            .with_weight_ratio(0.95)
            .with_inverse_mutation_ratio(3)
            .with_mutation_size(2, 1)
            .with_snapshot_size(3)
            .with_max_iterations(10)
            .with_stagnation_limit(5)
            .with_time_limit_ms(100)
            .with_seed(7);

        assert_eq!(config.population_size, 50);
        assert_eq!(config.seed_rounds, 20);
        assert_eq!(config.roulette_entries, 30);
        assert!((config.weight_ratio - 0.95).abs() < 1e-12);
        assert_eq!(config.inverse_mutation_ratio, 3);
        assert_eq!(config.mutation_removals, 2);
        assert_eq!(config.mutation_additions, 1);
        assert_eq!(config.snapshot_size, 3);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.stagnation_limit, 5);
        assert_eq!(config.time_limit_ms, Some(100));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_weight_ratio() {
        assert!(GaConfig::default().with_weight_ratio(0.0).validate().is_err());
        assert!(GaConfig::default().with_weight_ratio(1.0).validate().is_err());
        assert!(GaConfig::default().with_weight_ratio(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_weight_ratio(0.5).validate().is_ok());
    }

    #[test]
    fn test_validate_sizes() {
        assert!(GaConfig::default().with_population_size(0).validate().is_err());
        assert!(GaConfig::default().with_seed_rounds(0).validate().is_err());
        assert!(GaConfig::default().with_roulette_entries(0).validate().is_err());
        assert!(GaConfig::default()
            .with_inverse_mutation_ratio(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = GaConfig::default().with_time_limit_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_stopping_rule() {
        let unbounded = GaConfig::default()
            .with_max_iterations(0)
            .with_stagnation_limit(0);
        assert!(!unbounded.is_bounded());
        assert!(unbounded.validate().is_err());

        let timed = unbounded.with_time_limit_ms(50);
        assert!(timed.is_bounded());
        assert!(timed.validate().is_ok());
    }

    // ---- Presets ----

    #[test]
    fn test_presets_are_valid() {
        for config in [GaConfig::fast(), GaConfig::balanced(), GaConfig::quality()] {
            assert!(config.validate().is_ok());
            assert!(config.time_limit_ms.is_some());
        }
    }

    #[test]
    fn test_preset_fast() {
        let config = GaConfig::fast();
        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_iterations, 20_000);
        assert_eq!(config.time_limit_ms, Some(10_000));
    }

    #[test]
    fn test_preset_chainable() {
        let config = GaConfig::fast().with_population_size(75).with_seed(42);
        assert_eq!(config.population_size, 75);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.time_limit_ms, Some(10_000));
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GaConfig::auto_select(99).population_size, 200);
        assert_eq!(GaConfig::auto_select(100).population_size, 1000);
        assert_eq!(GaConfig::auto_select(999).population_size, 1000);
        assert_eq!(GaConfig::auto_select(1000).population_size, 2000);
    }
}
