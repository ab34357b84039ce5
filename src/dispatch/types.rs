//! Strategy identifiers.

use std::fmt;
use std::str::FromStr;

/// Solving strategy chosen by the dispatcher or forced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// In-order greedy fill. Never proven optimal.
    Greedy,
    /// Exact dynamic programming over capacities.
    Dp,
    /// Branch-and-bound from a greedy incumbent.
    BranchAndBound,
    /// Population search, then branch-and-bound warm-started from its best
    /// candidate.
    HeuristicWarmStart,
}

impl Strategy {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Dp => "dp",
            Strategy::BranchAndBound => "bnb",
            Strategy::HeuristicWarmStart => "ga",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "dp" => Ok(Strategy::Dp),
            "bnb" | "branch-and-bound" => Ok(Strategy::BranchAndBound),
            "ga" | "heuristic" => Ok(Strategy::HeuristicWarmStart),
            other => Err(format!("unknown strategy {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for s in [
            Strategy::Greedy,
            Strategy::Dp,
            Strategy::BranchAndBound,
            Strategy::HeuristicWarmStart,
        ] {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("Branch-And-Bound".parse(), Ok(Strategy::BranchAndBound));
        assert_eq!("heuristic".parse(), Ok(Strategy::HeuristicWarmStart));
        assert!("simplex".parse::<Strategy>().is_err());
    }
}
