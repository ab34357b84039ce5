//! Branch-and-bound search loop.

use super::bound::RatioTable;
use super::config::BnbConfig;
use super::stats::BnbStatistics;
use super::types::{DecisionPath, FrontierEntry, Incumbent, SearchNode, Traversal, WarmStart};
use crate::model::{solve_greedy, ProblemInstance};
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a branch-and-bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// Value of the best solution found.
    pub value: u64,

    /// Chosen original item indices, ascending.
    pub items: Vec<usize>,

    /// Whether the tree was exhausted, proving `value` optimal.
    pub optimal: bool,

    /// Whether the run stopped because the time budget ran out.
    pub timed_out: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Search counters.
    pub stats: BnbStatistics,
}

/// Executes branch-and-bound.
///
/// # Usage
///
/// ```
/// use u_knapsack::bnb::{BnbConfig, BnbRunner};
/// use u_knapsack::model::ProblemInstance;
///
/// let inst = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
/// let result = BnbRunner::run(&inst, &BnbConfig::default());
/// assert_eq!(result.value, 19);
/// assert!(result.optimal);
/// ```
pub struct BnbRunner;

impl BnbRunner {
    /// Runs branch-and-bound from scratch.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`BnbConfig::validate`]
    /// first to get a descriptive error).
    pub fn run(instance: &ProblemInstance, config: &BnbConfig) -> BnbResult {
        Self::run_with_cancel(instance, config, None, None)
    }

    /// Runs branch-and-bound with the incumbent seeded from `warm_start`.
    pub fn run_warm(
        instance: &ProblemInstance,
        config: &BnbConfig,
        warm_start: WarmStart,
    ) -> BnbResult {
        Self::run_with_cancel(instance, config, Some(warm_start), None)
    }

    /// Runs branch-and-bound with an optional warm start and cancellation
    /// token.
    ///
    /// The token is polled on the same cadence as the clock. When either
    /// fires, the best incumbent is returned with `optimal == false`.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &BnbConfig,
        warm_start: Option<WarmStart>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> BnbResult {
        config.validate().expect("invalid BnbConfig");

        let started = Instant::now();
        let table = RatioTable::new(instance);
        let mut search = Search::new(&table, config, started, cancel);

        if config.seed_greedy {
            search.seed_greedy(instance);
        }
        if let Some(warm) = warm_start {
            search.seed_warm_start(instance, warm, config.validate_warm_start);
        }

        if !table.is_empty() {
            let root_bound = table.bound(0, 0, 0);
            search.stats.root_bound = root_bound;

            if root_bound > search.incumbent.value {
                let root = SearchNode {
                    value: 0,
                    weight: 0,
                    depth: 0,
                    bound: root_bound,
                    path: DecisionPath::default(),
                };
                match config.traversal {
                    Traversal::DepthFirst => search.depth_first(root),
                    Traversal::BestFirst => search.best_first(root, None),
                    Traversal::Hybrid => search.best_first(root, Some(config.hybrid_frontier_limit)),
                }
            } else {
                search.stats.on_pruning_bound();
            }
        }

        search.stats.time_total = started.elapsed();
        let optimal = !search.timed_out && !search.cancelled;

        if search.timed_out {
            info!(
                value = search.incumbent.value,
                nodes = search.stats.nodes_expanded,
                "branch-and-bound time limit reached"
            );
        }

        BnbResult {
            value: search.incumbent.value,
            items: search.incumbent.path.items(),
            optimal,
            timed_out: search.timed_out,
            cancelled: search.cancelled,
            stats: search.stats,
        }
    }
}

/// Mutable state of one run.
struct Search<'a> {
    table: &'a RatioTable,
    incumbent: Incumbent,
    stats: BnbStatistics,
    deadline: Option<Instant>,
    check_interval: u64,
    ticks: u64,
    cancel: Option<Arc<AtomicBool>>,
    timed_out: bool,
    cancelled: bool,
    next_seq: u64,
}

impl<'a> Search<'a> {
    fn new(
        table: &'a RatioTable,
        config: &BnbConfig,
        started: Instant,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            table,
            incumbent: Incumbent::default(),
            stats: BnbStatistics::default(),
            deadline: config.time_limit.map(|limit| started + limit),
            check_interval: config.check_interval,
            ticks: 0,
            cancel,
            timed_out: false,
            cancelled: false,
            next_seq: 0,
        }
    }

    /// Installs the better of two greedy packings: ratio order and
    /// original order, each skipping items that do not fit.
    fn seed_greedy(&mut self, instance: &ProblemInstance) {
        let mut remaining = self.table.capacity();
        let mut value = 0u64;
        let mut path = DecisionPath::default();
        for k in 0..self.table.len() {
            if self.table.weight(k) <= remaining {
                remaining -= self.table.weight(k);
                value += self.table.value(k);
                path = path.push(self.table.original_index(k));
            }
        }

        let in_order = solve_greedy(instance);
        if in_order.value > value {
            value = in_order.value;
            path = DecisionPath::from_items(&in_order.taken);
        }

        self.incumbent.try_improve(value, &path);
        debug!(value, "greedy incumbent");
    }

    fn seed_warm_start(&mut self, instance: &ProblemInstance, warm: WarmStart, validate: bool) {
        let value = if validate {
            if !instance.is_feasible(&warm.items) {
                warn!(
                    claimed = warm.value,
                    items = warm.items.len(),
                    "warm start is infeasible, ignoring it"
                );
                return;
            }
            let actual = instance.value_of(&warm.items);
            if actual != warm.value {
                warn!(
                    claimed = warm.value,
                    actual, "warm start value does not match its items, using recomputed value"
                );
            }
            actual
        } else {
            warm.value
        };

        if self
            .incumbent
            .try_improve(value, &DecisionPath::from_items(&warm.items))
        {
            debug!(value, "warm start installed as incumbent");
        }
    }

    /// Counts an expansion and checks the clock every `check_interval`
    /// expansions. Returns `true` once the search must stop.
    fn should_stop(&mut self) -> bool {
        if self.timed_out || self.cancelled {
            return true;
        }
        self.ticks += 1;
        if self.ticks % self.check_interval != 0 {
            return false;
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                self.cancelled = true;
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return true;
            }
        }
        false
    }

    /// Expands `node` into its surviving children: exclude first, include
    /// second.
    fn expand(&mut self, node: SearchNode) -> [Option<SearchNode>; 2] {
        if node.bound <= self.incumbent.value || node.depth >= self.table.len() {
            // The incumbent may have improved since the node was queued.
            self.stats.on_pruning_bound();
            return [None, None];
        }
        self.stats.on_expand(node.depth);

        let k = node.depth;
        let next = k + 1;

        let exclude_bound = self.table.bound(node.value, node.weight, next);
        let exclude = if exclude_bound > self.incumbent.value {
            Some(SearchNode {
                value: node.value,
                weight: node.weight,
                depth: next,
                bound: exclude_bound,
                path: node.path.clone(),
            })
        } else {
            self.stats.on_pruning_bound();
            None
        };

        let weight = node.weight + self.table.weight(k);
        let include = if weight > self.table.capacity() {
            self.stats.on_pruning_infeasible();
            None
        } else {
            let value = node.value + self.table.value(k);
            let path = node.path.push(self.table.original_index(k));
            if self.incumbent.try_improve(value, &path) {
                self.stats.on_incumbent();
                debug!(value, depth = next, "incumbent improved");
            }
            let bound = self.table.bound(value, weight, next);
            if bound > self.incumbent.value {
                Some(SearchNode {
                    value,
                    weight,
                    depth: next,
                    bound,
                    path,
                })
            } else {
                self.stats.on_pruning_bound();
                None
            }
        };

        // The include child may have raised the incumbent past the exclude
        // child's bound.
        let exclude = exclude.filter(|child| child.bound > self.incumbent.value);

        [exclude, include]
    }

    fn depth_first(&mut self, root: SearchNode) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.should_stop() {
                return;
            }
            // Push include last so it is explored first.
            for child in self.expand(node).into_iter().flatten() {
                self.stats.on_generated();
                stack.push(child);
            }
            self.stats.on_frontier(stack.len());
        }
    }

    /// Best-first search. With `frontier_limit`, a node popped while the
    /// heap is larger than the limit is exhausted depth-first instead.
    fn best_first(&mut self, root: SearchNode, frontier_limit: Option<usize>) {
        let mut heap = BinaryHeap::new();
        heap.push(self.entry(root));

        while let Some(FrontierEntry { node, .. }) = heap.pop() {
            if frontier_limit.is_some_and(|limit| heap.len() > limit) {
                self.depth_first(node);
                if self.timed_out || self.cancelled {
                    return;
                }
                continue;
            }
            if self.should_stop() {
                return;
            }
            for child in self.expand(node).into_iter().flatten() {
                self.stats.on_generated();
                let entry = self.entry(child);
                heap.push(entry);
            }
            self.stats.on_frontier(heap.len());
        }
    }

    fn entry(&mut self, node: SearchNode) -> FrontierEntry {
        let seq = self.next_seq;
        self.next_seq += 1;
        FrontierEntry { seq, node }
    }
}
