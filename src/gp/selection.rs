//! Ranking and band selection for the generational loop.
//!
//! Individuals are ranked by ascending distance. The next generation is
//! assembled from three disjoint bands: children bred from the top
//! `parents` ranked individuals, an elite carried over unchanged, and fresh
//! random trees filling the remainder.

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use crate::error::{SearchError, SearchResult};
use crate::random::uniform_int;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Band sizes for building the next generation.
///
/// Unset bands scale with the population: an eighth of it breeds, a quarter
/// is children and a quarter is elite. Set a band to pin it to a fixed
/// count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Size of the breeding pool (top-ranked individuals).
    pub parents: Option<usize>,
    /// Children bred by crossover and mutation each generation.
    pub children: Option<usize>,
    /// Top-ranked individuals carried over unchanged.
    pub elite: Option<usize>,
}

/// Band sizes resolved against a concrete population size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBands {
    /// Size of the breeding pool.
    pub parents: usize,
    /// Children per generation.
    pub children: usize,
    /// Elite carried over per generation.
    pub elite: usize,
    /// Fresh random trees per generation.
    pub fresh: usize,
}

impl SelectionConfig {
    /// Pin every band to a fixed count.
    #[must_use]
    pub const fn fixed(parents: usize, children: usize, elite: usize) -> Self {
        Self {
            parents: Some(parents),
            children: Some(children),
            elite: Some(elite),
        }
    }

    /// Resolve the bands for a population of `population_size`.
    #[must_use]
    pub fn bands(&self, population_size: usize) -> SelectionBands {
        let parents = self.parents.unwrap_or((population_size / 8).max(1));
        let children = self.children.unwrap_or(population_size / 4);
        let elite = self.elite.unwrap_or(population_size / 4);
        SelectionBands {
            parents,
            children,
            elite,
            fresh: population_size.saturating_sub(children + elite),
        }
    }

    /// Check the bands fit inside a population of `population_size`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the breeding pool is empty or
    /// larger than the population, or if children and elite overflow it.
    pub fn validate(&self, population_size: usize) -> SearchResult<()> {
        let bands = self.bands(population_size);
        if bands.parents == 0 || bands.parents > population_size {
            return Err(SearchError::InvalidConfig(format!(
                "parents must be in 1..={population_size}, got {}",
                bands.parents
            )));
        }
        if bands.children + bands.elite > population_size {
            return Err(SearchError::InvalidConfig(format!(
                "children ({}) + elite ({}) exceed population size {population_size}",
                bands.children, bands.elite
            )));
        }
        Ok(())
    }
}

/// Population indices ordered from best (lowest distance) to worst.
///
/// The sort is stable, so equal distances keep their population order.
#[must_use]
pub fn rank(distances: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order
}

/// Draw two parents independently and uniformly from the top `parents`
/// entries of `ranked`.
///
/// Returns population indices. `ranked` must be non-empty.
pub fn select_parents<R: Rng>(ranked: &[usize], parents: usize, rng: &mut R) -> (usize, usize) {
    let pool = parents.min(ranked.len()).max(1);
    let first = ranked[uniform_int(rng, 0, pool - 1)];
    let second = ranked[uniform_int(rng, 0, pool - 1)];
    (first, second)
}

/// Summary of a generation's distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionStats {
    /// Lowest distance.
    pub best_distance: f64,
    /// Mean distance.
    pub mean_distance: f64,
    /// Highest distance.
    pub worst_distance: f64,
}

impl SelectionStats {
    /// Calculate statistics from distance values.
    #[must_use]
    pub fn from_distances(distances: &[f64]) -> Self {
        if distances.is_empty() {
            return Self {
                best_distance: 0.0,
                mean_distance: 0.0,
                worst_distance: 0.0,
            };
        }

        let sum: f64 = distances.iter().sum();
        let best = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            best_distance: best,
            mean_distance: sum / distances.len() as f64,
            worst_distance: worst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_rank_ascending_and_stable() {
        let distances = vec![3.0, 1.0, 2.0, 1.0, f64::INFINITY, 0.0];
        assert_eq!(rank(&distances), vec![5, 1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_select_parents_from_pool() {
        let mut rng = SmallRng::seed_from_u64(42);
        let ranked = vec![7, 3, 9, 0, 1, 2];
        for _ in 0..500 {
            let (a, b) = select_parents(&ranked, 2, &mut rng);
            assert!(a == 7 || a == 3);
            assert!(b == 7 || b == 3);
        }
    }

    #[test]
    fn test_default_bands_scale_with_population() {
        let config = SelectionConfig::default();
        let bands = config.bands(256);
        assert_eq!((bands.parents, bands.children, bands.elite, bands.fresh), (32, 64, 64, 128));
        let bands = config.bands(64);
        assert_eq!((bands.parents, bands.children, bands.elite, bands.fresh), (8, 16, 16, 32));
        let bands = config.bands(1024);
        assert_eq!((bands.parents, bands.children, bands.elite), (128, 256, 256));
        for size in [1, 3, 7, 100, 1000] {
            assert!(config.validate(size).is_ok(), "population {size}");
        }
    }

    #[test]
    fn test_pinned_bands() {
        let config = SelectionConfig {
            elite: Some(10),
            ..Default::default()
        };
        let bands = config.bands(64);
        assert_eq!((bands.children, bands.elite, bands.fresh), (16, 10, 38));
        assert!(SelectionConfig::fixed(32, 64, 64).validate(100).is_err());
        assert!(SelectionConfig::fixed(0, 8, 8).validate(64).is_err());
        assert!(SelectionConfig::fixed(8, 16, 16).validate(64).is_ok());
    }

    #[test]
    fn test_selection_stats() {
        let stats = SelectionStats::from_distances(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((stats.mean_distance - 3.0).abs() < 0.001);
        assert!((stats.best_distance - 1.0).abs() < 0.001);
        assert!((stats.worst_distance - 5.0).abs() < 0.001);
    }
}
