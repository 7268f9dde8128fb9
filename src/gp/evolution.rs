//! Main evolution loop for genetic programming.
//!
//! This module orchestrates the generational search: initialization, bloat
//! control, fitness evaluation, ranking, and reproduction into children,
//! elite and fresh-blood bands.
//!
//! [`Evolution`] exposes one generation per [`Evolution::step`] so callers
//! can poll between generations; [`evolve`] drives it to a solution or to
//! the generation cap.

// Evolution uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use crate::error::{SearchError, SearchResult};
use crate::gp::crossover::hybridise;
use crate::gp::fitness::{evaluate_population, validate_target, Sequence};
use crate::gp::generator::{Generator, GeneratorConfig};
use crate::gp::mutation::mutate;
use crate::gp::selection::{rank, select_parents, SelectionConfig, SelectionStats};
use crate::tree::Tree;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Configuration for the evolution process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Population size.
    pub population_size: usize,
    /// Breeding steps before giving up (0 = unbounded).
    pub max_generations: usize,
    /// Bloat cap: individuals with more nodes are regenerated.
    pub max_nodes: usize,
    /// A distance at or below this counts as a solution.
    pub tolerance: f64,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Random tree generation.
    pub generator: GeneratorConfig,
    /// Band sizes for reproduction.
    pub selection: SelectionConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 256,
            max_generations: 10_000,
            max_nodes: 64,
            tolerance: 1.0,
            seed: None,
            generator: GeneratorConfig::default(),
            selection: SelectionConfig::default(),
        }
    }
}

impl EvolutionConfig {
    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> SearchResult<()> {
        if self.population_size == 0 {
            return Err(SearchError::InvalidConfig(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.max_nodes == 0 {
            return Err(SearchError::InvalidConfig(
                "max_nodes must be at least 1".to_string(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(SearchError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        self.generator.validate()?;
        self.selection.validate(self.population_size)
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Generation number (0 is the initial population).
    pub generation: usize,
    /// Lowest distance in this generation.
    pub best_distance: f64,
    /// Mean distance.
    pub mean_distance: f64,
    /// Highest distance.
    pub worst_distance: f64,
    /// Node count of the best individual.
    pub best_size: usize,
    /// Mean node count.
    pub mean_size: f64,
}

/// Overall statistics from an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStats {
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
    /// Best distance achieved.
    pub best_distance: f64,
    /// Generation where the best distance was first achieved.
    pub best_generation: usize,
    /// Total time in seconds.
    pub elapsed_seconds: f64,
}

/// A population being evolved towards a target sequence.
///
/// The population is always evaluated and ranked: after construction and
/// after every [`step`](Self::step), [`best`](Self::best) reflects the
/// current generation.
#[derive(Debug)]
pub struct Evolution<R = SmallRng> {
    config: EvolutionConfig,
    generator: Generator,
    target: Sequence,
    rng: R,
    population: Vec<Tree>,
    distances: Vec<f64>,
    ranked: Vec<usize>,
    generation: usize,
}

impl Evolution<SmallRng> {
    /// Start a run seeded from `config.seed`, or from entropy if unset.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for a bad config or a target
    /// shorter than two elements.
    pub fn new(target: &[i64], config: &EvolutionConfig) -> SearchResult<Self> {
        let rng = config
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        Self::with_rng(target, config, rng)
    }
}

impl<R: Rng> Evolution<R> {
    /// Start a run drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] for a bad config or a target
    /// shorter than two elements.
    pub fn with_rng(target: &[i64], config: &EvolutionConfig, mut rng: R) -> SearchResult<Self> {
        config.validate()?;
        validate_target(target)?;
        let generator = Generator::new(config.generator)?;

        let population = (0..config.population_size)
            .map(|_| generator.generate_tree(&mut rng))
            .collect();

        let mut evolution = Self {
            config: *config,
            generator,
            target: target.to_vec(),
            rng,
            population,
            distances: Vec::new(),
            ranked: Vec::new(),
            generation: 0,
        };
        evolution.control_bloat();
        evolution.evaluate();
        Ok(evolution)
    }

    /// Current generation number.
    #[must_use]
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// Current population, in breeding order.
    #[must_use]
    pub fn population(&self) -> &[Tree] {
        &self.population
    }

    /// Distance of each individual, parallel to [`population`](Self::population).
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Best individual and its distance.
    #[must_use]
    pub fn best(&self) -> (&Tree, f64) {
        let idx = self.ranked[0];
        (&self.population[idx], self.distances[idx])
    }

    /// Whether the best individual is within tolerance.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.best().1 <= self.config.tolerance
    }

    /// Statistics for the current generation.
    #[must_use]
    pub fn stats(&self) -> GenerationStats {
        let summary = SelectionStats::from_distances(&self.distances);
        let total_size: usize = self.population.iter().map(Tree::size).sum();
        GenerationStats {
            generation: self.generation,
            best_distance: summary.best_distance,
            mean_distance: summary.mean_distance,
            worst_distance: summary.worst_distance,
            best_size: self.best().0.size(),
            mean_size: total_size as f64 / self.population.len() as f64,
        }
    }

    /// Breed, bloat-control, evaluate and rank the next generation.
    ///
    /// # Errors
    ///
    /// Propagates tree-addressing errors from crossover or mutation, which
    /// cannot occur for indices drawn inside the trees.
    pub fn step(&mut self) -> SearchResult<()> {
        let size = self.config.population_size;
        let bands = self.config.selection.bands(size);
        let mut next = Vec::with_capacity(size);

        for _ in 0..bands.children {
            let (a, b) = select_parents(&self.ranked, bands.parents, &mut self.rng);
            let mut child = hybridise(&self.population[a], &self.population[b], &mut self.rng)?;
            mutate(&mut child, &self.generator, &mut self.rng)?;
            next.push(child);
        }

        let mut previous: Vec<Option<Tree>> =
            std::mem::take(&mut self.population).into_iter().map(Some).collect();
        for &idx in self.ranked.iter().take(bands.elite) {
            if let Some(tree) = previous[idx].take() {
                next.push(tree);
            }
        }

        while next.len() < size {
            next.push(self.generator.generate_tree(&mut self.rng));
        }

        self.population = next;
        self.generation += 1;
        self.control_bloat();
        self.evaluate();
        Ok(())
    }

    /// Regenerate every individual above the node cap; returns how many.
    fn control_bloat(&mut self) -> usize {
        let cap = self.config.max_nodes;
        let mut replaced = 0;
        for tree in &mut self.population {
            if tree.size() > cap {
                *tree = self.generator.generate_bounded(&mut self.rng, cap);
                replaced += 1;
            }
        }
        if replaced > 0 {
            log::trace!(
                "gen {}: replaced {replaced} individuals over {cap} nodes",
                self.generation
            );
        }
        replaced
    }

    fn evaluate(&mut self) {
        self.distances = evaluate_population(&self.population, &self.target);
        self.ranked = rank(&self.distances);
    }
}

/// Run the evolution process to a solution.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] for a bad config or target, and
/// [`SearchError::BudgetExhausted`] if `max_generations` steps pass without
/// an individual within tolerance.
pub fn evolve(target: &[i64], config: &EvolutionConfig) -> SearchResult<(Tree, EvolutionStats)> {
    evolve_with(target, config, |_| {})
}

/// Run the evolution process, reporting each generation to `observer`.
///
/// # Errors
///
/// Same as [`evolve`].
pub fn evolve_with<F>(
    target: &[i64],
    config: &EvolutionConfig,
    mut observer: F,
) -> SearchResult<(Tree, EvolutionStats)>
where
    F: FnMut(&GenerationStats),
{
    let start_time = Instant::now();
    let mut evolution = Evolution::new(target, config)?;
    log::info!(
        "evolving population of {} towards {:?} (tolerance {})",
        config.population_size,
        target,
        config.tolerance
    );

    let mut gen_stats = Vec::new();
    let mut best_distance = f64::INFINITY;
    let mut best_generation = 0;

    loop {
        let stats = evolution.stats();
        observer(&stats);
        log::debug!(
            "Gen {:>5}: best={:.4} mean={:.4} size={:.1}",
            stats.generation,
            stats.best_distance,
            stats.mean_distance,
            stats.mean_size
        );
        if stats.best_distance < best_distance {
            best_distance = stats.best_distance;
            best_generation = stats.generation;
        }
        gen_stats.push(stats);

        if evolution.is_solved() {
            break;
        }
        if config.max_generations > 0 && evolution.generation() >= config.max_generations {
            log::warn!(
                "no solution after {} generations (best distance {best_distance:.4})",
                evolution.generation()
            );
            return Err(SearchError::BudgetExhausted {
                iterations: evolution.generation() as u64,
                best_distance,
            });
        }
        evolution.step()?;
    }

    let (best, distance) = evolution.best();
    log::info!("solved at generation {}: {best} (distance {distance:.4})", evolution.generation());

    Ok((
        best.clone(),
        EvolutionStats {
            generations: gen_stats,
            best_distance,
            best_generation,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        },
    ))
}
