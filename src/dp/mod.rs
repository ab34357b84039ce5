//! Exact dynamic-programming solver.
//!
//! Fills the classic `(n + 1) × (capacity + 1)` value table over items in
//! original order and walks it backwards to recover the chosen items. Time
//! and memory are `O(n · capacity)`, so the dispatcher only uses it when
//! [`DpConfig::is_applicable`] holds.
//!
//! # References
//!
//! - Bellman (1957), *Dynamic Programming*
//! - Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*, ch. 2.3

mod config;
mod solver;

pub use config::DpConfig;
pub use solver::{DpResult, DpSolver};
