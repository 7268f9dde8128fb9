//! Search entry point.
//!
//! [`search`] runs one of the strategies against a target and packages the
//! winning tree together with its evaluated sequence, ready for reporting.

use crate::error::SearchResult;
use crate::gp::{
    EvolutionConfig, GenerationStats, RandomSearchConfig, Sequence, distance, evolve_with,
    random_search, sequence_for_target,
};
use crate::tree::Tree;

/// Which search loop to run, with its configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Generate independent random trees until one matches exactly.
    Random(RandomSearchConfig),
    /// Generational genetic programming.
    Genetic(EvolutionConfig),
}

impl Strategy {
    /// Short name for logs and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Random(_) => "random",
            Self::Genetic(_) => "genetic",
        }
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The winning tree.
    pub tree: Tree,
    /// The tree's recurrence output, seeded from the target.
    pub sequence: Sequence,
    /// Distance between `sequence` and the target.
    pub distance: f64,
    /// Trees tried (random) or breeding steps taken (genetic).
    pub iterations: u64,
    /// Wall-clock time spent searching.
    pub elapsed_seconds: f64,
    /// Per-generation statistics; empty for random search.
    pub history: Vec<GenerationStats>,
}

/// Search for a tree reproducing `target`.
///
/// # Errors
///
/// Returns [`crate::SearchError::InvalidConfig`] for a bad target or
/// configuration and [`crate::SearchError::BudgetExhausted`] when the
/// strategy's iteration or generation budget runs out.
pub fn search(target: &[i64], strategy: &Strategy) -> SearchResult<SearchOutcome> {
    search_with(target, strategy, |_| {})
}

/// [`search`], reporting each GP generation to `observer`.
///
/// # Errors
///
/// Same as [`search`].
pub fn search_with<F>(target: &[i64], strategy: &Strategy, observer: F) -> SearchResult<SearchOutcome>
where
    F: FnMut(&GenerationStats),
{
    log::info!("starting {} search over {} elements", strategy.name(), target.len());
    let (tree, iterations, elapsed_seconds, history) = match strategy {
        Strategy::Random(config) => {
            let (tree, stats) = random_search(target, config)?;
            (tree, stats.iterations, stats.elapsed_seconds, Vec::new())
        }
        Strategy::Genetic(config) => {
            let (tree, stats) = evolve_with(target, config, observer)?;
            let steps = stats.generations.len().saturating_sub(1) as u64;
            (tree, steps, stats.elapsed_seconds, stats.generations)
        }
    };

    let sequence = sequence_for_target(&tree, target);
    let distance = distance(&sequence, target)?;
    Ok(SearchOutcome {
        tree,
        sequence,
        distance,
        iterations,
        elapsed_seconds,
        history,
    })
}
