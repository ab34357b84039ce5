//! Command-line solver for the legacy knapsack batch format.
//!
//! Reads an instance file (`<item_count> <capacity>` followed by one
//! `<value> <weight>` line per item), solves it and prints
//! `<value> <optimal>` and the 0/1 item flags on stdout. Logs go to stderr
//! and are controlled through `RUST_LOG`.
//!
//! ```bash
//! u-knapsack data/ks_4_0
//! u-knapsack data/ks_10000_0 --time-limit 600 --checkpoint progress.log
//! RUST_LOG=u_knapsack=debug u-knapsack data/ks_40_0 --strategy bnb --traversal best
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use u_knapsack::bnb::Traversal;
use u_knapsack::checkpoint::{CheckpointSink, FileCheckpoint, NoCheckpoint};
use u_knapsack::dispatch::{SolveConfig, Solver, Strategy};
use u_knapsack::format::{load_instance, write_solution};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "u-knapsack", author, version, about, long_about = None)]
struct Args {
    /// Instance file in the legacy batch format
    file: PathBuf,

    /// Total wall-clock budget in seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u64>,

    /// Strategy; `auto` selects by instance size
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Branch-and-bound frontier traversal
    #[arg(long, value_enum, default_value_t = TraversalArg::Hybrid)]
    traversal: TraversalArg,

    /// Random seed for population search
    #[arg(long)]
    seed: Option<u64>,

    /// Append population search snapshots to this file
    #[arg(long, value_name = "FILE")]
    checkpoint: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Auto,
    Greedy,
    Dp,
    Bnb,
    Ga,
}

impl StrategyArg {
    fn strategy(self) -> Option<Strategy> {
        match self {
            StrategyArg::Auto => None,
            StrategyArg::Greedy => Some(Strategy::Greedy),
            StrategyArg::Dp => Some(Strategy::Dp),
            StrategyArg::Bnb => Some(Strategy::BranchAndBound),
            StrategyArg::Ga => Some(Strategy::HeuristicWarmStart),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TraversalArg {
    Depth,
    Best,
    Hybrid,
}

impl From<TraversalArg> for Traversal {
    fn from(arg: TraversalArg) -> Self {
        match arg {
            TraversalArg::Depth => Traversal::DepthFirst,
            TraversalArg::Best => Traversal::BestFirst,
            TraversalArg::Hybrid => Traversal::Hybrid,
        }
    }
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("u_knapsack=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .init();
}

fn build_config(args: &Args) -> SolveConfig {
    let mut config = SolveConfig::default();
    config.bnb = config.bnb.with_traversal(args.traversal.into());
    if let Some(secs) = args.time_limit {
        let ms = secs.saturating_mul(1000).max(1);
        config.time_budget_ms = ms;
        config.heuristic_time_ms = config.heuristic_time_ms.min(ms);
    }
    if let Some(seed) = args.seed {
        config.ga = config.ga.with_seed(seed);
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let instance = load_instance(&args.file)
        .with_context(|| format!("failed to load instance {}", args.file.display()))?;
    let config = build_config(&args);

    let mut sink: Box<dyn CheckpointSink> = match &args.checkpoint {
        Some(path) => Box::new(
            FileCheckpoint::open(path)
                .with_context(|| format!("failed to open checkpoint {}", path.display()))?,
        ),
        None => Box::new(NoCheckpoint),
    };

    let solution = Solver::run_with(
        &instance,
        &config,
        args.strategy.strategy(),
        None,
        sink.as_mut(),
    )
    .context("solver failed")?;

    write_solution(io::stdout().lock(), &solution).context("failed to write solution")?;
    Ok(())
}
