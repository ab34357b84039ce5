//! Error types shared by the whole crate.

use thiserror::Error;

/// Errors surfaced by instance loading, parsing and dispatch.
///
/// Running out of time in branch-and-bound and failing to find a new
/// candidate in population search are not errors; they are reported through
/// the respective result types.
#[derive(Error, Debug)]
pub enum KnapsackError {
    /// Capacity, a value or a weight is negative, or the sums overflow.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed legacy text input.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// File or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias using [`KnapsackError`].
pub type Result<T> = std::result::Result<T, KnapsackError>;
