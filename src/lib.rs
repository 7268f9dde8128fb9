// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Seqgp: evolves small arithmetic recurrences that reproduce integer
//! sequences.
//!
//! A candidate is an expression tree over the constants `0..=9`, the index
//! `N` and the two previous values `XP`, `XPP`, combined with `+`, `-` and
//! `*`. Run as a recurrence from the target's first two elements, the tree
//! produces a sequence; search looks for a tree whose sequence matches.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      search (random | genetic)      │
//! ├─────────────────────────────────────┤
//! │   gp: generator, fitness, editing   │
//! ├─────────────────────────────────────┤
//! │      tree          │    random      │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod gp;
pub mod random;
pub mod search;
pub mod tree;

pub use error::{SearchError, SearchResult};
pub use search::{SearchOutcome, Strategy, search, search_with};
pub use tree::{Node, Op, Tree, Var};

/// The sequence the search is tuned against by default.
pub const DEFAULT_TARGET: [i64; 5] = [1, 4, 8, 16, 20];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_debug() {
        let err = SearchError::InvalidIndex { index: 3, size: 1 };
        let debug = format!("{err:?}");
        assert!(debug.contains("InvalidIndex"));
        assert!(debug.contains('3'));
    }

    #[test]
    fn test_default_target_seeds() {
        assert_eq!(&DEFAULT_TARGET[..2], &[1, 4]);
    }
}
