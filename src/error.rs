//! Error types for tree editing and sequence search.

use std::fmt;

/// Errors raised by tree addressing, fitness evaluation and search.
#[derive(Debug)]
pub enum SearchError {
    /// A pre-order node index fell outside `[0, size - 1]`.
    InvalidIndex {
        /// The requested index.
        index: usize,
        /// Node count of the addressed tree.
        size: usize,
    },
    /// Two sequences compared by distance had different lengths.
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },
    /// A configuration value is out of range or inconsistent.
    InvalidConfig(String),
    /// The search ran out of iterations (or generations) without a match.
    BudgetExhausted {
        /// Iterations or generations spent.
        iterations: u64,
        /// Closest distance observed before giving up.
        best_distance: f64,
    },
    /// A configuration file could not be parsed.
    Config(String),
    /// File I/O error.
    Io(std::io::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, size } => {
                write!(f, "node index {index} out of range for tree of size {size}")
            }
            Self::LengthMismatch { left, right } => {
                write!(f, "sequence length mismatch: {left} vs {right}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::BudgetExhausted {
                iterations,
                best_distance,
            } => write!(
                f,
                "no solution within budget after {iterations} iterations (best distance {best_distance:.4})"
            ),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SearchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
