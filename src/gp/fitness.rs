//! Sequence evaluation and fitness.
//!
//! A tree is turned into a sequence by running it as a recurrence: the first
//! two slots are the seeds, and every later slot is the tree evaluated with
//! `n = i + 1`, `xp = x[i-1]` and `xpp = x[i-2]`. Fitness is the Euclidean
//! distance to the target; lower is better and zero is an exact match.

// Distances are computed in floating point on purpose
#![allow(clippy::cast_precision_loss)]

use crate::error::{SearchError, SearchResult};
use crate::tree::Tree;

/// A fixed-length integer sequence.
pub type Sequence = Vec<i64>;

/// Run `tree` as a recurrence for `length` slots starting from two seeds.
///
/// Lengths below two return only the seeds that fit.
#[must_use]
pub fn compute_sequence(tree: &Tree, length: usize, seed0: i64, seed1: i64) -> Sequence {
    let mut seq = Vec::with_capacity(length);
    seq.extend([seed0, seed1].into_iter().take(length));
    for i in 2..length {
        let n = i64::try_from(i + 1).unwrap_or(i64::MAX);
        let next = tree.eval(n, seq[i - 1], seq[i - 2]);
        seq.push(next);
    }
    seq
}

/// Check that `target` is long enough to supply both recurrence seeds.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] for targets shorter than two.
pub fn validate_target(target: &[i64]) -> SearchResult<()> {
    if target.len() < 2 {
        return Err(SearchError::InvalidConfig(format!(
            "target needs at least 2 elements to seed the recurrence, got {}",
            target.len()
        )));
    }
    Ok(())
}

/// Run `tree` against `target`, seeding the recurrence from the target's
/// first two elements.
#[must_use]
pub fn sequence_for_target(tree: &Tree, target: &[i64]) -> Sequence {
    let seed0 = target.first().copied().unwrap_or(0);
    let seed1 = target.get(1).copied().unwrap_or(0);
    compute_sequence(tree, target.len(), seed0, seed1)
}

/// Euclidean distance between two sequences of equal length.
///
/// # Errors
///
/// Returns [`SearchError::LengthMismatch`] if the lengths differ.
pub fn distance(a: &[i64], b: &[i64]) -> SearchResult<f64> {
    if a.len() != b.len() {
        return Err(SearchError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| {
            // Subtract exactly; large values collapse when converted first
            let d = (i128::from(x) - i128::from(y)) as f64;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Whether two sequences match element for element.
#[must_use]
pub fn is_exact_match(a: &[i64], b: &[i64]) -> bool {
    a == b
}

/// Distance of `tree`'s recurrence output from `target`.
#[must_use]
pub fn evaluate_fitness(tree: &Tree, target: &[i64]) -> f64 {
    let produced = sequence_for_target(tree, target);
    // Lengths agree by construction
    distance(&produced, target).unwrap_or(f64::INFINITY)
}

/// Distances for a whole population, in population order.
#[must_use]
pub fn evaluate_population(population: &[Tree], target: &[i64]) -> Vec<f64> {
    population
        .iter()
        .map(|tree| evaluate_fitness(tree, target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, Op, Var};

    fn fibonacci() -> Tree {
        Tree::new(Node::binary(Op::Add, Node::Var(Var::Xp), Node::Var(Var::Xpp)))
    }

    #[test]
    fn test_fibonacci_sequence() {
        assert_eq!(compute_sequence(&fibonacci(), 6, 1, 1), vec![1, 1, 2, 3, 5, 8]);
    }

    #[test]
    fn test_constant_sequence() {
        let tree = Tree::new(Node::Const(3));
        assert_eq!(compute_sequence(&tree, 5, -4, 10), vec![-4, 10, 3, 3, 3]);
    }

    #[test]
    fn test_index_variable_starts_at_three() {
        let tree = Tree::new(Node::Var(Var::N));
        assert_eq!(compute_sequence(&tree, 5, 0, 0), vec![0, 0, 3, 4, 5]);
    }

    #[test]
    fn test_short_lengths() {
        let tree = fibonacci();
        assert!(compute_sequence(&tree, 0, 1, 2).is_empty());
        assert_eq!(compute_sequence(&tree, 1, 1, 2), vec![1]);
        assert_eq!(compute_sequence(&tree, 2, 1, 2), vec![1, 2]);
    }

    #[test]
    fn test_distance() {
        assert!(distance(&[0, 0], &[0, 0]).unwrap().abs() < f64::EPSILON);
        assert!((distance(&[0, 0], &[3, 4]).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!(matches!(
            distance(&[0], &[0, 1]),
            Err(SearchError::LengthMismatch { left: 1, right: 2 })
        ));
    }

    #[test]
    fn test_distance_beyond_f64_precision() {
        let a = [0, 0, 9_007_199_254_740_993];
        let b = [0, 0, 9_007_199_254_740_992];
        assert!((distance(&a, &b).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(distance(&[i64::MIN], &[i64::MAX]).unwrap() > 0.0);
        assert!(!is_exact_match(&a, &b));
    }

    #[test]
    fn test_evaluate_population() {
        let target = vec![1, 1, 2, 3, 5, 8];
        let population = vec![fibonacci(), Tree::new(Node::Const(0))];
        let fitness = evaluate_population(&population, &target);
        assert!(fitness[0].abs() < f64::EPSILON);
        assert!(fitness[1] > 0.0);
        assert!(is_exact_match(&sequence_for_target(&population[0], &target), &target));
    }

    #[test]
    fn test_validate_target() {
        assert!(validate_target(&[1, 2]).is_ok());
        assert!(validate_target(&[1]).is_err());
        assert!(validate_target(&[]).is_err());
    }
}
