//! CLI command for genetic programming evolution.

use super::output::print_outcome;
use super::{CliError, CommonArgs};
use indicatif::{ProgressBar, ProgressStyle};
use seqgp::Strategy;
use seqgp::gp::EvolutionConfig;

/// Flags that override the evolution section of the settings.
#[derive(Debug, Default)]
pub(crate) struct EvolveOverrides {
    /// Population size.
    pub(crate) population: Option<usize>,
    /// Generation cap (0 = unbounded).
    pub(crate) max_generations: Option<usize>,
    /// Solution tolerance.
    pub(crate) tolerance: Option<f64>,
    /// Bloat cap.
    pub(crate) max_nodes: Option<usize>,
}

impl EvolveOverrides {
    fn apply(&self, config: &mut EvolutionConfig) {
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(max_generations) = self.max_generations {
            config.max_generations = max_generations;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_nodes) = self.max_nodes {
            config.max_nodes = max_nodes;
        }
    }
}

/// Execute the evolve command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the generation cap is
/// reached before the tolerance is met.
pub(crate) fn execute(
    common: &CommonArgs,
    overrides: &EvolveOverrides,
    progress: bool,
) -> Result<(), CliError> {
    let target = common.target();
    let mut config = common.settings()?.evolution;
    if let Some(seed) = common.seed {
        config.seed = Some(seed);
    }
    overrides.apply(&mut config);
    config.validate()?;

    let pb = if progress { Some(progress_bar(config.max_generations)?) } else { None };

    let strategy = Strategy::Genetic(config);
    let result = seqgp::search_with(&target, &strategy, |stats| {
        if let Some(pb) = &pb {
            pb.set_position(stats.generation as u64);
            pb.set_message(format!("best {:.4}", stats.best_distance));
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let outcome = result?;
    print_outcome(common.format, strategy.name(), &target, &outcome)
}

fn progress_bar(max_generations: usize) -> Result<ProgressBar, CliError> {
    let template_error = |e: indicatif::style::TemplateError| CliError::new(format!("invalid progress template: {e}"));
    if max_generations == 0 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] generation {pos} {msg}")
                .map_err(template_error)?,
        );
        Ok(pb)
    } else {
        let pb = ProgressBar::new(max_generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}")
                .map_err(template_error)?
                .progress_chars("=>-"),
        );
        Ok(pb)
    }
}
