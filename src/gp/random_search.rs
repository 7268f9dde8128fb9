//! Pure random restart search.
//!
//! Generates whole trees until one reproduces the target exactly. There is
//! no learning between attempts; the only state is the iteration count.

use crate::error::{SearchError, SearchResult};
use crate::gp::fitness::{distance, is_exact_match, sequence_for_target, validate_target};
use crate::gp::generator::{Generator, GeneratorConfig};
use crate::tree::Tree;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Configuration for random search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSearchConfig {
    /// Trees to try before giving up (0 = unbounded).
    pub max_iterations: u64,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Random tree generation.
    pub generator: GeneratorConfig,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000_000,
            seed: None,
            generator: GeneratorConfig::default(),
        }
    }
}

/// Statistics from a random search run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomSearchStats {
    /// Trees generated, including the accepted one.
    pub iterations: u64,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// Generate trees until one reproduces `target` exactly.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] for a bad generator config or a
/// target shorter than two, and [`SearchError::BudgetExhausted`] once
/// `max_iterations` trees have failed.
pub fn random_search(
    target: &[i64],
    config: &RandomSearchConfig,
) -> SearchResult<(Tree, RandomSearchStats)> {
    let mut rng = config
        .seed
        .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    random_search_with_rng(target, config, &mut rng)
}

/// [`random_search`] drawing from a caller-supplied RNG.
///
/// # Errors
///
/// Same as [`random_search`].
pub fn random_search_with_rng<R: Rng>(
    target: &[i64],
    config: &RandomSearchConfig,
    rng: &mut R,
) -> SearchResult<(Tree, RandomSearchStats)> {
    validate_target(target)?;
    let generator = Generator::new(config.generator)?;
    let start_time = Instant::now();
    log::info!("random search towards {target:?}");

    let mut best_distance = f64::INFINITY;
    let mut iterations = 0u64;
    loop {
        if config.max_iterations > 0 && iterations >= config.max_iterations {
            log::warn!(
                "no exact match after {iterations} trees (best distance {best_distance:.4})"
            );
            return Err(SearchError::BudgetExhausted {
                iterations,
                best_distance,
            });
        }
        iterations += 1;

        let tree = generator.generate_tree(rng);
        let produced = sequence_for_target(&tree, target);
        if is_exact_match(&produced, target) {
            log::info!("matched after {iterations} trees: {tree}");
            return Ok((
                tree,
                RandomSearchStats {
                    iterations,
                    elapsed_seconds: start_time.elapsed().as_secs_f64(),
                },
            ));
        }

        let d = distance(&produced, target)?;
        if d < best_distance {
            best_distance = d;
            log::debug!("iteration {iterations}: new closest {d:.4} from {tree}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_element_target_accepts_first_tree() {
        let config = RandomSearchConfig {
            seed: Some(1),
            ..Default::default()
        };
        let (_, stats) = random_search(&[3, 7], &config).unwrap();
        assert_eq!(stats.iterations, 1);
    }

    #[test]
    fn test_constant_target_found() {
        let config = RandomSearchConfig {
            seed: Some(2),
            max_iterations: 100_000,
            ..Default::default()
        };
        let (tree, _) = random_search(&[0, 0, 4, 4, 4], &config).unwrap();
        assert_eq!(sequence_for_target(&tree, &[0, 0, 4, 4, 4]), vec![0, 0, 4, 4, 4]);
    }

    #[test]
    fn test_budget_exhausted() {
        let config = RandomSearchConfig {
            seed: Some(3),
            max_iterations: 50,
            ..Default::default()
        };
        let result = random_search(&[0, 0, 999_983, 7, 999_979], &config);
        assert!(matches!(
            result,
            Err(SearchError::BudgetExhausted { iterations: 50, .. })
        ));
    }
}
