//! Problem model.
//!
//! [`ProblemInstance`] holds the capacity and the item table; it is validated
//! on construction and never mutated afterwards. The greedy primitives in
//! this module are reused by branch-and-bound (baseline), population search
//! (seeding) and the dispatcher.

mod greedy;
mod instance;

pub use greedy::{greedy_fill, solve_greedy, GreedyFill};
pub use instance::{GcdReduction, Item, ProblemInstance};
