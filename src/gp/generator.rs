//! Stochastic tree generation.
//!
//! Each call builds a fresh tree top-down: with probability
//! `terminal_probability` a node is a leaf (a constant or a weighted choice
//! of variable), otherwise it is a uniformly chosen operator whose two
//! children are generated independently. Attempts that exceed the depth or
//! node budget are thrown away and retried.

use crate::error::{SearchError, SearchResult};
use crate::random::{Weighted, bernoulli, uniform_int};
use crate::tree::{Node, Op, Tree, Var};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest generated constant.
pub const MAX_CONSTANT: u8 = 9;

/// Configuration for random tree generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Probability that a node is a leaf.
    pub terminal_probability: f64,
    /// Probability that a leaf is a constant rather than a variable.
    pub constant_probability: f64,
    /// Relative weights of `N`, `XP` and `XPP` among variable leaves.
    pub variable_weights: [f64; 3],
    /// Deepest tree an attempt may produce before it is retried.
    pub max_depth: usize,
    /// Most nodes an attempt may produce before it is retried.
    pub max_nodes: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            terminal_probability: 0.7,
            constant_probability: 0.5,
            variable_weights: [50.0, 25.0, 25.0],
            max_depth: 24,
            max_nodes: 4096,
        }
    }
}

impl GeneratorConfig {
    /// Check that every probability and limit is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> SearchResult<()> {
        if !(self.terminal_probability > 0.0 && self.terminal_probability <= 1.0) {
            return Err(SearchError::InvalidConfig(format!(
                "terminal_probability must be in (0, 1], got {}",
                self.terminal_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.constant_probability) {
            return Err(SearchError::InvalidConfig(format!(
                "constant_probability must be in [0, 1], got {}",
                self.constant_probability
            )));
        }
        if self.max_depth == 0 || self.max_nodes == 0 {
            return Err(SearchError::InvalidConfig(
                "max_depth and max_nodes must be at least 1".to_string(),
            ));
        }
        Weighted::new(Var::ALL.to_vec(), &self.variable_weights).map(|_| ())
    }
}

/// Random tree builder for a validated [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    variables: Weighted<Var>,
}

impl Generator {
    /// Validate `config` and prepare the variable distribution.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the config is unusable.
    pub fn new(config: GeneratorConfig) -> SearchResult<Self> {
        config.validate()?;
        let variables = Weighted::new(Var::ALL.to_vec(), &config.variable_weights)?;
        Ok(Self { config, variables })
    }

    /// The configuration this generator was built from.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a random subtree.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Node {
        loop {
            let mut budget = self.config.max_nodes;
            if let Some(node) = self.build(rng, 1, &mut budget) {
                return node;
            }
            log::trace!("generation attempt exceeded limits, retrying");
        }
    }

    /// Generate a random whole tree.
    pub fn generate_tree<R: Rng>(&self, rng: &mut R) -> Tree {
        Tree::new(self.generate(rng))
    }

    /// Generate a tree of at most `max_size` nodes, regenerating as needed.
    ///
    /// `max_size` must be at least 1, which a lone leaf always satisfies.
    pub fn generate_bounded<R: Rng>(&self, rng: &mut R, max_size: usize) -> Tree {
        loop {
            let tree = self.generate_tree(rng);
            if tree.size() <= max_size.max(1) {
                return tree;
            }
        }
    }

    /// Generate a single leaf.
    pub fn terminal<R: Rng>(&self, rng: &mut R) -> Node {
        if bernoulli(rng, self.config.constant_probability) {
            Node::Const(uniform_int(rng, 0, MAX_CONSTANT))
        } else {
            Node::Var(*self.variables.choose(rng))
        }
    }

    fn build<R: Rng>(&self, rng: &mut R, depth: usize, budget: &mut usize) -> Option<Node> {
        if *budget == 0 {
            return None;
        }
        *budget -= 1;

        if bernoulli(rng, self.config.terminal_probability) {
            return Some(self.terminal(rng));
        }
        if depth >= self.config.max_depth {
            return None;
        }

        let op = Op::ALL[uniform_int(rng, 0, Op::ALL.len() - 1)];
        let left = self.build(rng, depth + 1, budget)?;
        let right = self.build(rng, depth + 1, budget)?;
        Some(Node::binary(op, left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_generate_respects_limits() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = GeneratorConfig {
            max_depth: 4,
            max_nodes: 9,
            ..Default::default()
        };
        let generator = Generator::new(config).unwrap();
        for _ in 0..500 {
            let node = generator.generate(&mut rng);
            assert!(node.depth() <= 4);
            assert!(node.size() <= 9);
        }
    }

    #[test]
    fn test_constants_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let generator = Generator::new(GeneratorConfig {
            constant_probability: 1.0,
            ..Default::default()
        })
        .unwrap();
        for _ in 0..500 {
            match generator.terminal(&mut rng) {
                Node::Const(c) => assert!(c <= MAX_CONSTANT),
                other => panic!("expected constant, got {other}"),
            }
        }
    }

    #[test]
    fn test_zero_weight_variables_never_drawn() {
        let mut rng = SmallRng::seed_from_u64(9);
        let generator = Generator::new(GeneratorConfig {
            constant_probability: 0.0,
            variable_weights: [1.0, 0.0, 0.0],
            ..Default::default()
        })
        .unwrap();
        for _ in 0..200 {
            assert_eq!(generator.terminal(&mut rng), Node::Var(Var::N));
        }
    }

    #[test]
    fn test_always_terminal() {
        let mut rng = SmallRng::seed_from_u64(11);
        let generator = Generator::new(GeneratorConfig {
            terminal_probability: 1.0,
            ..Default::default()
        })
        .unwrap();
        for _ in 0..100 {
            assert!(generator.generate(&mut rng).is_terminal());
        }
    }

    #[test]
    fn test_generate_bounded() {
        let mut rng = SmallRng::seed_from_u64(13);
        let generator = Generator::new(GeneratorConfig {
            terminal_probability: 0.4,
            ..Default::default()
        })
        .unwrap();
        for _ in 0..50 {
            assert!(generator.generate_bounded(&mut rng, 7).size() <= 7);
        }
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let bad = [
            GeneratorConfig {
                terminal_probability: 0.0,
                ..Default::default()
            },
            GeneratorConfig {
                constant_probability: 1.5,
                ..Default::default()
            },
            GeneratorConfig {
                variable_weights: [0.0, 0.0, 0.0],
                ..Default::default()
            },
            GeneratorConfig {
                max_depth: 0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(Generator::new(config).is_err());
        }
    }
}
