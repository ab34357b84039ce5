//! Branch-and-bound over the implicit binary decision tree.
//!
//! Items are visited in descending value/weight order. Each node decides
//! one item (exclude, then include) and a child is only kept when its
//! fractional relaxation bound strictly beats the incumbent. The tree is
//! never materialized: only the frontier lives in memory, and each node
//! carries a shared persistent list of the items it packed.
//!
//! # Traversal
//!
//! - [`Traversal::DepthFirst`]: explicit stack
//! - [`Traversal::BestFirst`]: binary heap keyed on the bound
//! - [`Traversal::Hybrid`]: best-first with a depth-first escape when the
//!   frontier grows past a limit
//!
//! # Time-boxing
//!
//! The clock is polled every [`BnbConfig::check_interval`] expansions. On
//! expiry the current incumbent is returned with `optimal == false`.
//!
//! # References
//!
//! - Horowitz & Sahni (1974), "Computing Partitions with Applications to
//!   the Knapsack Problem"
//! - Martello & Toth (1990), *Knapsack Problems: Algorithms and Computer
//!   Implementations*, ch. 2.5

mod bound;
mod config;
mod runner;
mod stats;
mod types;

pub use bound::RatioTable;
pub use config::BnbConfig;
pub use runner::{BnbResult, BnbRunner};
pub use stats::BnbStatistics;
pub use types::{Traversal, WarmStart};
