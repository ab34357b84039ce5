//! Size-based strategy dispatcher.
//!
//! [`Solver`] reduces an instance by the GCD of its weights, then picks a
//! strategy from its size:
//!
//! 1. fewer than `small_instance_items` items: branch-and-bound
//! 2. `n × capacity` within the DP threshold: dynamic programming
//! 3. otherwise: population search for a bounded time, then
//!    branch-and-bound warm-started from its best candidate for the rest of
//!    the budget
//!
//! The returned [`KnapsackSolution`](crate::solution::KnapsackSolution)
//! is expressed in the original instance's units and item order.

mod config;
mod engine;
mod types;

pub use config::SolveConfig;
pub use engine::{solve, Solver};
pub use types::Strategy;
