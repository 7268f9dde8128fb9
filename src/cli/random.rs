//! CLI command for random restart search.

use super::output::print_outcome;
use super::{CliError, CommonArgs};
use seqgp::Strategy;

/// Execute the random command.
///
/// # Errors
///
/// Returns an error if the settings are invalid or no exact match is found
/// within the iteration budget.
pub(crate) fn execute(common: &CommonArgs, max_iterations: Option<u64>) -> Result<(), CliError> {
    let target = common.target();
    let mut config = common.settings()?.random;
    if let Some(seed) = common.seed {
        config.seed = Some(seed);
    }
    if let Some(max) = max_iterations {
        config.max_iterations = max;
    }
    config.generator.validate()?;

    let strategy = Strategy::Random(config);
    let outcome = seqgp::search(&target, &strategy)?;
    print_outcome(common.format, strategy.name(), &target, &outcome)
}
