//! Legacy plain-text batch format.
//!
//! Input:
//!
//! ```text
//! <item_count> <capacity>
//! <value> <weight>        (item_count lines)
//! ```
//!
//! Output:
//!
//! ```text
//! <value> <optimal as 0/1>
//! <flag> <flag> ...       (one 0/1 flag per item, input order)
//! ```
//!
//! Tokens beyond the first two on a line, and lines beyond the declared
//! item count, are ignored.

use crate::error::{KnapsackError, Result};
use crate::model::ProblemInstance;
use crate::solution::KnapsackSolution;
use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::path::Path;

/// Parses a legacy instance from text.
///
/// # Errors
/// [`KnapsackError::Parse`] for a missing header, a non-integer token or
/// fewer item lines than declared; [`KnapsackError::InvalidInstance`] for
/// negative numbers.
///
/// # Examples
///
/// ```
/// use u_knapsack::format::parse_instance;
///
/// let inst = parse_instance("4 11\n8 4\n10 5\n15 8\n4 3\n").unwrap();
/// assert_eq!(inst.len(), 4);
/// assert_eq!(inst.capacity(), 11);
/// ```
pub fn parse_instance(input: &str) -> Result<ProblemInstance> {
    let mut lines = input.lines().enumerate();

    let (count, capacity) = match lines.next() {
        Some((_, line)) => parse_pair(line, 1, "item count", "capacity")?,
        None => {
            return Err(KnapsackError::Parse {
                line: 1,
                message: "missing header \"<item_count> <capacity>\"".into(),
            })
        }
    };
    let count = usize::try_from(count).map_err(|_| KnapsackError::Parse {
        line: 1,
        message: format!("item count must be non-negative, got {count}"),
    })?;

    let mut items = Vec::with_capacity(count.min(1 << 20));
    for k in 0..count {
        match lines.next() {
            Some((idx, line)) => items.push(parse_pair(line, idx + 1, "value", "weight")?),
            None => {
                return Err(KnapsackError::Parse {
                    line: k + 2,
                    message: format!("expected {count} item lines, found {k}"),
                })
            }
        }
    }

    ProblemInstance::load(capacity, &items)
}

/// Reads and parses a legacy instance from a reader.
pub fn read_instance<R: Read>(mut reader: R) -> Result<ProblemInstance> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_instance(&input)
}

/// Reads and parses a legacy instance file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<ProblemInstance> {
    let input = std::fs::read_to_string(path)?;
    parse_instance(&input)
}

fn parse_pair(line: &str, line_no: usize, first: &str, second: &str) -> Result<(i64, i64)> {
    let mut tokens = line.split_whitespace();
    let a = parse_token(tokens.next(), line_no, first)?;
    let b = parse_token(tokens.next(), line_no, second)?;
    Ok((a, b))
}

fn parse_token(token: Option<&str>, line: usize, what: &str) -> Result<i64> {
    let token = token.ok_or_else(|| KnapsackError::Parse {
        line,
        message: format!("missing {what}"),
    })?;
    token.parse::<i64>().map_err(|e| KnapsackError::Parse {
        line,
        message: format!("invalid {what} {token:?}: {e}"),
    })
}

/// Serializes a solution in the legacy output format.
///
/// No trailing newline is emitted.
///
/// # Examples
///
/// ```
/// use u_knapsack::dispatch::Strategy;
/// use u_knapsack::format::format_solution;
/// use u_knapsack::solution::KnapsackSolution;
///
/// let sol = KnapsackSolution {
///     value: 19,
///     assignment: vec![0, 0, 1, 1],
///     optimal: true,
///     strategy: Strategy::Dp,
/// };
/// assert_eq!(format_solution(&sol), "19 1\n0 0 1 1");
/// ```
pub fn format_solution(solution: &KnapsackSolution) -> String {
    let mut out = String::with_capacity(16 + 2 * solution.assignment.len());
    let _ = writeln!(out, "{} {}", solution.value, u8::from(solution.optimal));
    for (k, flag) in solution.assignment.iter().enumerate() {
        if k > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{flag}");
    }
    out
}

/// Writes a solution in the legacy output format, followed by a newline.
pub fn write_solution<W: Write>(mut writer: W, solution: &KnapsackSolution) -> io::Result<()> {
    writeln!(writer, "{}", format_solution(solution))
}
