//! 0/1 knapsack solving engine.
//!
//! Given a capacity and a table of items with non-negative integer values
//! and weights, selects the subset of maximum total value whose total weight
//! fits. Several strategies are provided and combined by a size-based
//! dispatcher:
//!
//! - **Dynamic programming** ([`dp`]): exact, `O(n · capacity)` time, used
//!   when the state space is small enough.
//! - **Branch-and-bound** ([`bnb`]): exact given enough time, with
//!   depth-first, best-first and hybrid traversal, a wall-clock limit and
//!   warm starts.
//! - **Population search** ([`ga`]): a steady-state genetic search that
//!   produces a strong incumbent for branch-and-bound on large instances.
//! - **Greedy** ([`model::solve_greedy`]): in-order baseline.
//!
//! # Quick Start
//!
//! ```
//! use u_knapsack::dispatch::{SolveConfig, Solver};
//! use u_knapsack::format::{format_solution, parse_instance};
//!
//! let instance = parse_instance("4 11\n8 4\n10 5\n15 8\n4 3\n").unwrap();
//! let solution = Solver::solve(&instance, &SolveConfig::default()).unwrap();
//! assert_eq!(format_solution(&solution), "19 1\n0 0 1 1");
//! ```
//!
//! # Architecture
//!
//! [`model`] owns the immutable [`ProblemInstance`](model::ProblemInstance)
//! shared read-only by every solver. The only state passed between solvers
//! is a [`WarmStart`](bnb::WarmStart) value copied out of the population
//! search result. Progress snapshots go to a
//! [`CheckpointSink`](checkpoint::CheckpointSink) and are never read back.

pub mod bnb;
pub mod checkpoint;
pub mod dispatch;
pub mod dp;
pub mod error;
pub mod format;
pub mod ga;
pub mod model;
pub mod random;
pub mod solution;

pub use dispatch::solve;
pub use error::{KnapsackError, Result};
