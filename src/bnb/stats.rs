//! Counters collected during a branch-and-bound run.

use std::time::Duration;

/// Statistics of one branch-and-bound run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BnbStatistics {
    /// Nodes taken off the frontier and expanded.
    pub nodes_expanded: u64,
    /// Children pushed onto the frontier.
    pub nodes_generated: u64,
    /// Children or frontier nodes discarded because their bound could not
    /// beat the incumbent.
    pub prunings_bound: u64,
    /// Include-branches rejected because the item did not fit.
    pub prunings_infeasible: u64,
    /// Strict incumbent improvements found by the search itself.
    pub incumbent_updates: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
    /// Deepest level expanded.
    pub max_depth: usize,
    /// Bound of the root node.
    pub root_bound: u64,
    /// Wall-clock time of the run.
    pub time_total: Duration,
}

impl BnbStatistics {
    #[inline]
    pub(crate) fn on_expand(&mut self, depth: usize) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub(crate) fn on_generated(&mut self) {
        self.nodes_generated = self.nodes_generated.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_incumbent(&mut self) {
        self.incumbent_updates = self.incumbent_updates.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_frontier(&mut self, size: usize) {
        self.peak_frontier = self.peak_frontier.max(size);
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Branch-and-bound statistics:")?;
        writeln!(f, "  Nodes expanded:        {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes generated:       {}", self.nodes_generated)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Incumbent updates:     {}", self.incumbent_updates)?;
        writeln!(f, "  Peak frontier:         {}", self.peak_frontier)?;
        writeln!(f, "  Max depth:             {}", self.max_depth)?;
        writeln!(f, "  Root bound:            {}", self.root_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}
