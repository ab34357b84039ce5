//! Population search.
//!
//! A steady-state genetic search over knapsack packings. The population is
//! a bounded, de-duplicated set of feasible candidates ranked by value;
//! each iteration picks parents with a rank-biased roulette wheel, applies
//! a removal mutation or an exclusive-half crossover, repairs the children
//! and inserts the ones that are new and good enough.
//!
//! # Key Types
//!
//! - [`Candidate`]: a packing with incremental value/capacity bookkeeping
//! - [`Population`]: bounded ranked pool with duplicate detection
//! - [`RouletteWheel`]: geometric rank-biased parent selection
//! - [`GaConfig`]: population size, operator rates, stopping rules, presets
//! - [`PopulationSearch`]: single-step API for embedding in an outer driver
//! - [`GaRunner`] / [`GaResult`]: run to a stopping rule
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Chu & Beasley (1998), "A Genetic Algorithm for the Multidimensional
//!   Knapsack Problem"
//! - Whitley (1989), "The GENITOR Algorithm and Selection Pressure"

mod config;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use population::{Insertion, Population};
pub use runner::{GaResult, GaRunner, PopulationSearch, StepOutcome, StopReason};
pub use selection::RouletteWheel;
pub use types::Candidate;
