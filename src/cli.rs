//! CLI command implementations for Seqgp.

pub(crate) mod evolve;
pub(crate) mod random;

mod output;

use clap::{Args, ValueEnum};
use seqgp::SearchError;
use seqgp::config::{self, SearchSettings};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Output format for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Arguments shared by every search command.
#[derive(Args, Debug)]
pub(crate) struct CommonArgs {
    /// Target sequence; the first two values seed the recurrence
    /// (default: 1 4 8 16 20)
    #[arg(allow_negative_numbers = true)]
    pub(crate) target: Vec<i64>,

    /// Random seed (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// JSON settings file; flags override its values
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub(crate) format: OutputFormat,
}

impl CommonArgs {
    /// Target from the command line, or the default target.
    pub(crate) fn target(&self) -> Vec<i64> {
        if self.target.is_empty() {
            seqgp::DEFAULT_TARGET.to_vec()
        } else {
            self.target.clone()
        }
    }

    /// Settings from `--config`, or defaults.
    pub(crate) fn settings(&self) -> Result<SearchSettings, CliError> {
        match &self.config {
            Some(path) => config::load(path).map_err(|e| {
                CliError::new(format!("Failed to load {}: {e}", path.display()))
            }),
            None => Ok(SearchSettings::default()),
        }
    }
}

/// Install the logger. `verbose` counts `-v` flags; `RUST_LOG` wins.
pub(crate) fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<SearchError> for CliError {
    fn from(e: SearchError) -> Self {
        Self::new(e.to_string())
    }
}
