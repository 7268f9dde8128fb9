//! Output formatting utilities for CLI.

use seqgp::SearchOutcome;
use seqgp::gp::GenerationStats;
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable search result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSearchResult<'a> {
    /// Strategy that produced the result.
    pub(super) strategy: &'a str,
    /// Winning tree in prefix notation.
    pub(super) tree: String,
    /// Node count of the tree.
    pub(super) size: usize,
    /// Depth of the tree.
    pub(super) depth: usize,
    /// Target sequence.
    pub(super) target: &'a [i64],
    /// Sequence produced by the tree.
    pub(super) sequence: &'a [i64],
    /// Euclidean distance to the target.
    pub(super) distance: f64,
    /// Trees tried or generations bred.
    pub(super) iterations: u64,
    /// Wall-clock seconds.
    pub(super) elapsed_seconds: f64,
    /// Per-generation statistics (genetic search only).
    pub(super) generations: &'a [GenerationStats],
}

impl<'a> JsonSearchResult<'a> {
    /// Create from a search outcome.
    pub(super) fn from_outcome(strategy: &'a str, target: &'a [i64], outcome: &'a SearchOutcome) -> Self {
        Self {
            strategy,
            tree: outcome.tree.to_string(),
            size: outcome.tree.size(),
            depth: outcome.tree.depth(),
            target,
            sequence: &outcome.sequence,
            distance: outcome.distance,
            iterations: outcome.iterations,
            elapsed_seconds: outcome.elapsed_seconds,
            generations: &outcome.history,
        }
    }
}

/// Format a search outcome as human-readable text.
pub(super) fn format_text(strategy: &str, target: &[i64], outcome: &SearchOutcome) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Search Result ({strategy})");
    let _ = writeln!(output, "  Tree: {}", outcome.tree);
    let _ = writeln!(
        output,
        "  Size: {} nodes, depth {}",
        outcome.tree.size(),
        outcome.tree.depth()
    );
    let _ = writeln!(output, "  Distance: {:.4}", outcome.distance);
    let unit = if outcome.history.is_empty() { "trees" } else { "generations" };
    let _ = writeln!(output, "  Iterations: {} {unit}", outcome.iterations);
    let _ = writeln!(output, "  Elapsed: {:.3}s", outcome.elapsed_seconds);
    output.push('\n');

    let _ = writeln!(output, "  {:>4}  {:>12}  {:>12}", "i", "target", "result");
    for (i, (t, r)) in target.iter().zip(&outcome.sequence).enumerate() {
        let marker = if t == r { "" } else { "  *" };
        let _ = writeln!(output, "  {i:>4}  {t:>12}  {r:>12}{marker}");
    }

    output
}

/// Print an outcome in the requested format.
pub(super) fn print_outcome(
    format: super::OutputFormat,
    strategy: &str,
    target: &[i64],
    outcome: &SearchOutcome,
) -> Result<(), super::CliError> {
    match format {
        super::OutputFormat::Text => print!("{}", format_text(strategy, target, outcome)),
        super::OutputFormat::Json => {
            let json_result = JsonSearchResult::from_outcome(strategy, target, outcome);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| super::CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqgp::{Node, Op, Tree, Var};

    fn outcome() -> SearchOutcome {
        SearchOutcome {
            tree: Tree::new(Node::binary(Op::Add, Node::Var(Var::Xp), Node::Var(Var::Xpp))),
            sequence: vec![1, 1, 2, 3],
            distance: 0.0,
            iterations: 4,
            elapsed_seconds: 0.5,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_format_text() {
        let text = format_text("random", &[1, 1, 2, 4], &outcome());
        assert!(text.contains("Tree: ( + XP XPP )"));
        assert!(text.contains("4 trees"));
        // Only the mismatched last row is flagged
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn test_json_result() {
        let out = outcome();
        let target = [1, 1, 2, 3];
        let json = serde_json::to_value(JsonSearchResult::from_outcome("random", &target, &out))
            .expect("serializable");
        assert_eq!(json["tree"], "( + XP XPP )");
        assert_eq!(json["size"], 3);
        assert_eq!(json["sequence"][3], 3);
    }
}
