//! Subtree mutation.
//!
//! A mutation picks one node uniformly by pre-order index and replaces the
//! subtree rooted there with a freshly generated one. Picking index 0
//! regenerates the whole tree.

use crate::error::SearchResult;
use crate::gp::generator::Generator;
use crate::random::uniform_int;
use crate::tree::Tree;
use rand::Rng;

/// Replace a uniformly chosen subtree of `tree` with a new random subtree.
///
/// Returns the pre-order index that was replaced.
///
/// # Errors
///
/// Propagates [`crate::SearchError::InvalidIndex`], which cannot occur for
/// an index drawn inside the tree.
pub fn mutate<R: Rng>(tree: &mut Tree, generator: &Generator, rng: &mut R) -> SearchResult<usize> {
    let index = uniform_int(rng, 0, tree.size() - 1);
    mutate_node(tree, index, generator, rng)?;
    Ok(index)
}

/// Replace the subtree at `index` with a new random subtree.
///
/// # Errors
///
/// Returns [`crate::SearchError::InvalidIndex`] if `index` is outside the
/// tree; the tree is unchanged in that case.
pub fn mutate_node<R: Rng>(
    tree: &mut Tree,
    index: usize,
    generator: &Generator,
    rng: &mut R,
) -> SearchResult<()> {
    tree.mutate_at(index, || generator.generate(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gp::generator::GeneratorConfig;
    use crate::tree::{Node, Op, Var};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sample() -> Tree {
        Tree::new(Node::binary(
            Op::Sub,
            Node::binary(Op::Add, Node::Var(Var::Xp), Node::Const(1)),
            Node::Var(Var::Xpp),
        ))
    }

    fn leaf_only() -> Generator {
        Generator::new(GeneratorConfig {
            terminal_probability: 1.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_mutate_keeps_untouched_branch() {
        let mut rng = SmallRng::seed_from_u64(5);
        let generator = leaf_only();
        let mut tree = sample();
        mutate_node(&mut tree, 4, &generator, &mut rng).unwrap();

        // Left branch (indices 1..=3) is unchanged
        assert_eq!(tree.get(1).unwrap(), sample().get(1).unwrap());
        assert_eq!(tree.size(), 5);
    }

    #[test]
    fn test_mutate_root_regenerates() {
        let mut rng = SmallRng::seed_from_u64(6);
        let generator = leaf_only();
        let mut tree = sample();
        mutate_node(&mut tree, 0, &generator, &mut rng).unwrap();
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn test_mutate_invalid_index() {
        let mut rng = SmallRng::seed_from_u64(7);
        let generator = leaf_only();
        let mut tree = sample();
        assert!(mutate_node(&mut tree, 5, &generator, &mut rng).is_err());
        assert_eq!(tree, sample());
    }

    #[test]
    fn test_mutate_random_index_in_range() {
        let mut rng = SmallRng::seed_from_u64(8);
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        for _ in 0..200 {
            let mut tree = sample();
            let index = mutate(&mut tree, &generator, &mut rng).unwrap();
            assert!(index < 5);
        }
    }
}
