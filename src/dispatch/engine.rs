//! Strategy selection and execution.

use super::config::SolveConfig;
use super::types::Strategy;
use crate::bnb::{BnbConfig, BnbRunner, WarmStart};
use crate::checkpoint::{CheckpointSink, NoCheckpoint};
use crate::dp::DpSolver;
use crate::error::{KnapsackError, Result};
use crate::ga::GaRunner;
use crate::model::{solve_greedy, ProblemInstance};
use crate::solution::KnapsackSolution;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Chooses and runs a strategy for an instance.
///
/// Every run first divides weights and capacity by the GCD of the weights.
/// Item indices and values are unchanged by the reduction, so the result
/// maps back to the original instance directly.
///
/// # Usage
///
/// ```
/// use u_knapsack::dispatch::{SolveConfig, Solver, Strategy};
/// use u_knapsack::model::ProblemInstance;
///
/// let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
/// let solution = Solver::solve(&inst, &SolveConfig::default()).unwrap();
/// assert_eq!(solution.value, 19);
/// assert_eq!(solution.assignment, vec![0, 0, 1, 1]);
/// assert!(solution.optimal);
/// assert_eq!(solution.strategy, Strategy::BranchAndBound);
/// ```
pub struct Solver;

impl Solver {
    /// Solves with the size-based strategy choice.
    ///
    /// # Errors
    /// [`KnapsackError::InvalidConfig`] if `config` fails validation.
    pub fn solve(instance: &ProblemInstance, config: &SolveConfig) -> Result<KnapsackSolution> {
        Self::run_with(instance, config, None, None, &mut NoCheckpoint)
    }

    /// Solves with a forced strategy.
    ///
    /// # Errors
    /// [`KnapsackError::InvalidConfig`] if `config` fails validation, or if
    /// [`Strategy::Dp`] is forced on an instance above `config.dp.max_cells`.
    pub fn solve_with(
        instance: &ProblemInstance,
        config: &SolveConfig,
        strategy: Strategy,
    ) -> Result<KnapsackSolution> {
        Self::run_with(instance, config, Some(strategy), None, &mut NoCheckpoint)
    }

    /// Size-based strategy for an already reduced instance.
    ///
    /// - `n < small_instance_items` → [`Strategy::BranchAndBound`]
    /// - `n × capacity ≤ dp.max_cells` → [`Strategy::Dp`]
    /// - otherwise → [`Strategy::HeuristicWarmStart`]
    pub fn select_strategy(instance: &ProblemInstance, config: &SolveConfig) -> Strategy {
        if instance.len() < config.small_instance_items {
            Strategy::BranchAndBound
        } else if config.dp.is_applicable(instance) {
            Strategy::Dp
        } else {
            Strategy::HeuristicWarmStart
        }
    }

    /// Solves with every option exposed.
    ///
    /// `strategy` of `None` selects by size. `cancel` is forwarded to the
    /// population search and branch-and-bound loops. `sink` receives a
    /// snapshot on every population search improvement.
    pub fn run_with<S: CheckpointSink + ?Sized>(
        instance: &ProblemInstance,
        config: &SolveConfig,
        strategy: Option<Strategy>,
        cancel: Option<Arc<AtomicBool>>,
        sink: &mut S,
    ) -> Result<KnapsackSolution> {
        config.validate().map_err(KnapsackError::InvalidConfig)?;

        let started = Instant::now();
        let reduction = instance.reduce_by_gcd();
        let reduced = &reduction.instance;
        let strategy = strategy.unwrap_or_else(|| Self::select_strategy(reduced, config));
        info!(
            n = reduced.len(),
            capacity = reduced.capacity(),
            divisor = reduction.divisor,
            state_space = reduced.state_space(),
            %strategy,
            "solving instance"
        );

        let (items, optimal) = match strategy {
            Strategy::Greedy => (solve_greedy(reduced).taken, false),
            Strategy::Dp => {
                if !config.dp.is_applicable(reduced) {
                    return Err(KnapsackError::InvalidConfig(format!(
                        "state space {} exceeds dp.max_cells {}",
                        reduced.state_space(),
                        config.dp.max_cells
                    )));
                }
                let result = DpSolver::solve(reduced);
                debug!(cells = result.cells, value = result.value, "dp finished");
                (result.items, true)
            }
            Strategy::BranchAndBound => {
                let bnb = bnb_config(config, config.time_budget());
                let result = BnbRunner::run_with_cancel(reduced, &bnb, None, cancel);
                debug!(stats = %result.stats, "branch-and-bound finished");
                (result.items, result.optimal)
            }
            Strategy::HeuristicWarmStart => {
                let ga = config
                    .ga
                    .clone()
                    .with_time_limit_ms(config.heuristic_time_limit_ms());
                let heuristic = GaRunner::run_with(reduced, &ga, cancel.clone(), sink);
                info!(
                    value = heuristic.best_value,
                    iterations = heuristic.iterations,
                    reason = %heuristic.stop_reason,
                    "population search finished"
                );

                let remaining = config.time_budget().saturating_sub(started.elapsed());
                let bnb = bnb_config(config, remaining);
                let warm = WarmStart::new(heuristic.best_value, heuristic.items());
                let result = BnbRunner::run_with_cancel(reduced, &bnb, Some(warm), cancel);
                debug!(stats = %result.stats, "warm-started branch-and-bound finished");
                (result.items, result.optimal)
            }
        };

        let solution = KnapsackSolution::from_items(instance, &items, optimal, strategy);
        info!(
            value = solution.value,
            optimal = solution.optimal,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solved"
        );
        Ok(solution)
    }
}

/// Branch-and-bound settings with the time limit capped at `remaining`.
fn bnb_config(config: &SolveConfig, remaining: Duration) -> BnbConfig {
    let limit = config.bnb.time_limit.map_or(remaining, |t| t.min(remaining));
    config.bnb.clone().with_time_limit(limit)
}

/// Solves `values`/`weights` under `capacity` with default settings.
///
/// # Errors
/// [`KnapsackError::InvalidInstance`] if the slices differ in length or the
/// totals overflow.
///
/// # Examples
///
/// ```
/// let solution = u_knapsack::solve(11, &[8, 10, 15, 4], &[4, 5, 8, 3]).unwrap();
/// assert_eq!(solution.value, 19);
/// ```
pub fn solve(capacity: u64, values: &[u64], weights: &[u64]) -> Result<KnapsackSolution> {
    let instance = ProblemInstance::from_values_weights(capacity, values, weights)?;
    Solver::solve(&instance, &SolveConfig::default())
}
