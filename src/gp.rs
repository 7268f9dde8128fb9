//! Genetic programming over recurrence expression trees.
//!
//! This module provides random tree generation, sequence evaluation and
//! fitness, the subtree editing operators, and the two search loops built
//! from them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Evolution Loop  │  Random Search  │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │  Recurrence Evaluation + Distance   │
//! ├─────────────────────────────────────┤
//! │           Tree Generator            │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use seqgp::gp::{evolve, EvolutionConfig};
//!
//! let (best, stats) = evolve(&[1, 1, 2, 3, 5, 8], &EvolutionConfig::default())?;
//! println!("{best} after {} generations", stats.generations.len());
//! # Ok::<(), seqgp::SearchError>(())
//! ```

mod crossover;
mod evolution;
mod fitness;
mod generator;
mod mutation;
mod random_search;
mod selection;

pub use crossover::{hybridise, splice};
pub use evolution::{
    Evolution, EvolutionConfig, EvolutionStats, GenerationStats, evolve, evolve_with,
};
pub use fitness::{
    Sequence, compute_sequence, distance, evaluate_fitness, evaluate_population, is_exact_match,
    sequence_for_target, validate_target,
};
pub use generator::{Generator, GeneratorConfig, MAX_CONSTANT};
pub use mutation::{mutate, mutate_node};
pub use random_search::{
    RandomSearchConfig, RandomSearchStats, random_search, random_search_with_rng,
};
pub use selection::{SelectionBands, SelectionConfig, SelectionStats, rank, select_parents};
