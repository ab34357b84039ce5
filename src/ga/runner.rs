//! Population search loop execution.
//!
//! [`PopulationSearch`] owns the population and performs one steady-state
//! iteration per [`step`](PopulationSearch::step): select, mutate or cross
//! over, repair, insert. [`GaRunner`] drives it until a stopping rule fires.

use super::config::GaConfig;
use super::operators::{crossover, mutate};
use super::population::{Insertion, Population};
use super::selection::RouletteWheel;
use super::types::Candidate;
use crate::checkpoint::{CheckpointSink, NoCheckpoint, Snapshot, SnapshotEntry};
use crate::model::{greedy_fill, ProblemInstance};
use crate::random::rng_from_option;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Why a population search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// `max_iterations` was reached.
    IterationLimit,
    /// `stagnation_limit` iterations passed without a new best.
    Stagnation,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopReason::IterationLimit => "iteration limit",
            StopReason::Stagnation => "stagnation",
            StopReason::TimeLimit => "time limit",
            StopReason::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Effect of one [`PopulationSearch::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new best candidate entered the population.
    Improved {
        /// New best value.
        value: u64,
    },
    /// At least one child entered the population without beating the best.
    Accepted,
    /// Every child was a duplicate or too weak to enter.
    Discarded,
}

/// Steady-state population search over one instance.
///
/// A single [`step`](Self::step) is the unit of work; the search can be
/// stopped between any two steps and the population stays consistent.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::{GaConfig, PopulationSearch};
/// use u_knapsack::model::ProblemInstance;
/// use u_knapsack::random::create_rng;
///
/// let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
/// let config = GaConfig::fast();
/// let mut search = PopulationSearch::new(&inst, &config, create_rng(42));
/// for _ in 0..100 {
///     search.step();
/// }
/// assert_eq!(search.best().map(|c| c.value()), Some(19));
/// ```
pub struct PopulationSearch<'a, R: Rng> {
    instance: &'a ProblemInstance,
    config: &'a GaConfig,
    wheel: RouletteWheel,
    population: Population,
    rng: R,
    iterations: u64,
    best_score: f64,
}

impl<'a, R: Rng> PopulationSearch<'a, R> {
    /// Seeds a population with shuffled greedy fills.
    ///
    /// Each of the `seed_rounds` rounds shuffles the item order and packs
    /// items from empty until the first one that does not fit.
    pub fn new(instance: &'a ProblemInstance, config: &'a GaConfig, mut rng: R) -> Self {
        let mut population = Population::new(config.population_size);
        let mut order: Vec<usize> = (0..instance.len()).collect();

        for _ in 0..config.seed_rounds {
            order.shuffle(&mut rng);
            let fill = greedy_fill(instance, instance.capacity(), order.iter().copied());
            population.insert(Candidate::from_elements(instance, fill.taken));
        }
        if population.is_empty() {
            population.insert(Candidate::empty(instance));
        }

        let best_score = population.best_score().unwrap_or(0.0);
        debug!(
            seeded = population.len(),
            best = best_score,
            "population seeded"
        );

        Self {
            instance,
            config,
            wheel: RouletteWheel::new(config.roulette_entries, config.weight_ratio),
            population,
            rng,
            iterations: 0,
            best_score,
        }
    }

    /// Performs one iteration.
    ///
    /// Mutates with probability `1 / inverse_mutation_ratio`, otherwise
    /// crosses over two distinct ranks. Crossover falls back to mutation
    /// while the population holds a single candidate. Every child is
    /// repaired before insertion.
    pub fn step(&mut self) -> StepOutcome {
        self.iterations += 1;

        let children = if self.rng.random_range(0..self.config.inverse_mutation_ratio) == 0 {
            self.mutation_children()
        } else {
            match self.wheel.spin_twice(self.population.len(), &mut self.rng) {
                Some((a, b)) => match (self.population.get(a), self.population.get(b)) {
                    (Some(p1), Some(p2)) => {
                        let (c1, c2) = crossover(self.instance, p1, p2, &mut self.rng);
                        vec![c1, c2]
                    }
                    _ => Vec::new(),
                },
                None => self.mutation_children(),
            }
        };

        let mut accepted = false;
        for mut child in children {
            child.repair(self.instance);
            if let Insertion::Inserted(_) = self.population.insert(child) {
                accepted = true;
            }
        }

        match self.population.best() {
            Some(best) if best.score() > self.best_score => {
                self.best_score = best.score();
                StepOutcome::Improved {
                    value: best.value(),
                }
            }
            _ if accepted => StepOutcome::Accepted,
            _ => StepOutcome::Discarded,
        }
    }

    fn mutation_children(&mut self) -> Vec<Candidate> {
        let Some(rank) = self.wheel.spin(self.population.len(), &mut self.rng) else {
            return Vec::new();
        };
        match self.population.get(rank) {
            Some(parent) => vec![mutate(
                self.instance,
                parent,
                self.config.mutation_removals,
                self.config.mutation_additions,
                &mut self.rng,
            )],
            None => Vec::new(),
        }
    }

    /// Current population, best first.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best candidate so far.
    pub fn best(&self) -> Option<&Candidate> {
        self.population.best()
    }

    /// Iterations performed.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The top `k` candidates as a checkpoint snapshot.
    pub fn snapshot(&self, k: usize, elapsed: Duration) -> Snapshot {
        Snapshot {
            iteration: self.iterations,
            elapsed,
            entries: self
                .population
                .iter()
                .take(k)
                .enumerate()
                .map(|(rank, c)| SnapshotEntry {
                    rank,
                    value: c.value(),
                    remaining_capacity: c.remaining_capacity(),
                    items: c.key(),
                })
                .collect(),
        }
    }
}

/// Result of a population search run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best candidate found.
    pub best: Candidate,

    /// Value of `best`.
    pub best_value: u64,

    /// Iterations performed after seeding.
    pub iterations: u64,

    /// Number of iterations that produced a new best.
    pub improvements: u64,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Wall-clock time including seeding.
    pub elapsed: Duration,

    /// Best value after seeding, then after each improvement.
    pub value_history: Vec<u64>,
}

impl GaResult {
    /// Packed item indices of the best candidate, ascending.
    pub fn items(&self) -> Vec<usize> {
        self.best.key()
    }
}

/// Executes population search until a stopping rule fires.
///
/// # Usage
///
/// ```
/// use u_knapsack::ga::{GaConfig, GaRunner};
/// use u_knapsack::model::ProblemInstance;
///
/// let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
/// let config = GaConfig::fast().with_max_iterations(500).with_seed(42);
/// let result = GaRunner::run(&inst, &config);
/// assert_eq!(result.best_value, 19);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs population search.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run(instance: &ProblemInstance, config: &GaConfig) -> GaResult {
        Self::run_with(instance, config, None, &mut NoCheckpoint)
    }

    /// Runs population search with an optional cancellation token.
    ///
    /// The flag is checked between iterations.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult {
        Self::run_with(instance, config, cancel, &mut NoCheckpoint)
    }

    /// Runs population search, recording a snapshot on every improvement.
    ///
    /// A failing sink is logged and otherwise ignored.
    pub fn run_with<S: CheckpointSink + ?Sized>(
        instance: &ProblemInstance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        sink: &mut S,
    ) -> GaResult {
        config.validate().expect("invalid GaConfig");

        let start = Instant::now();
        let deadline = config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));

        let mut search = PopulationSearch::new(instance, config, rng_from_option(config.seed));
        let mut value_history = vec![search.best().map_or(0, |c| c.value())];
        let mut improvements = 0u64;
        let mut stagnation = 0u64;

        let stop_reason = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break StopReason::Cancelled;
                }
            }
            if config.max_iterations > 0 && search.iterations() >= config.max_iterations {
                break StopReason::IterationLimit;
            }
            if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
                break StopReason::Stagnation;
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    break StopReason::TimeLimit;
                }
            }

            match search.step() {
                StepOutcome::Improved { value } => {
                    improvements += 1;
                    stagnation = 0;
                    value_history.push(value);
                    info!(iteration = search.iterations(), value, "new best candidate");

                    let snapshot = search.snapshot(config.snapshot_size, start.elapsed());
                    if let Err(err) = sink.record(&snapshot) {
                        warn!(error = %err, "failed to write checkpoint");
                    }
                }
                StepOutcome::Accepted | StepOutcome::Discarded => stagnation += 1,
            }
        };

        let best = search
            .best()
            .cloned()
            .unwrap_or_else(|| Candidate::empty(instance));
        debug!(
            iterations = search.iterations(),
            improvements,
            value = best.value(),
            reason = %stop_reason,
            "population search finished"
        );

        GaResult {
            best_value: best.value(),
            best,
            iterations: search.iterations(),
            improvements,
            stop_reason,
            elapsed: start.elapsed(),
            value_history,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
