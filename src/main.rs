//! Seqgp CLI - search for recurrences that reproduce an integer sequence.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Seqgp - evolve arithmetic recurrences for integer sequences
#[derive(Parser, Debug)]
#[command(name = "seqgp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate random trees until one reproduces the target exactly
    Random {
        #[command(flatten)]
        common: cli::CommonArgs,

        /// Trees to try before giving up, 0 for no limit (default: 10000000)
        #[arg(short, long)]
        max_iterations: Option<u64>,
    },

    /// Evolve a population of trees towards the target
    Evolve {
        #[command(flatten)]
        common: cli::CommonArgs,

        /// Population size (default: 256)
        #[arg(short, long)]
        population: Option<usize>,

        /// Generations before giving up, 0 for no limit (default: 10000)
        #[arg(short = 'g', long)]
        max_generations: Option<usize>,

        /// Distance counted as a solution (default: 1.0)
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Trees larger than this are regenerated (default: 64)
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let result = match args.command {
        Commands::Random {
            common,
            max_iterations,
        } => cli::random::execute(&common, max_iterations),

        Commands::Evolve {
            common,
            population,
            max_generations,
            tolerance,
            max_nodes,
            progress,
        } => {
            let overrides = cli::evolve::EvolveOverrides {
                population,
                max_generations,
                tolerance,
                max_nodes,
            };
            cli::evolve::execute(&common, &overrides, progress)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_target() {
        let args = Args::try_parse_from(["seqgp", "random", "--", "-1", "2", "-3"]).unwrap();
        match args.command {
            Commands::Random { common, .. } => assert_eq!(common.target(), vec![-1, 2, -3]),
            Commands::Evolve { .. } => panic!("expected random"),
        }
    }

    #[test]
    fn test_default_target() {
        let args = Args::try_parse_from(["seqgp", "-v", "evolve", "--progress"]).unwrap();
        assert_eq!(args.verbose, 1);
        match args.command {
            Commands::Evolve { common, progress, .. } => {
                assert!(progress);
                assert_eq!(common.target(), seqgp::DEFAULT_TARGET.to_vec());
            }
            Commands::Random { .. } => panic!("expected evolve"),
        }
    }
}
