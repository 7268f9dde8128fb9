//! Search settings loadable from JSON.
//!
//! Every field is optional in the file; missing values fall back to the
//! defaults of the corresponding config struct. Breeding bands scale with
//! `population_size` unless pinned under `evolution.selection`.
//!
//! ```json
//! {
//!   "strategy": "genetic",
//!   "evolution": { "population_size": 512, "tolerance": 0.0 }
//! }
//! ```

use crate::error::{SearchError, SearchResult};
use crate::gp::{EvolutionConfig, RandomSearchConfig};
use crate::search::Strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which strategy a settings file selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Random restart search.
    Random,
    /// Generational genetic programming.
    #[default]
    Genetic,
}

/// Complete search settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Strategy to run.
    pub strategy: StrategyKind,
    /// Random search parameters.
    pub random: RandomSearchConfig,
    /// Genetic programming parameters.
    pub evolution: EvolutionConfig,
}

impl SearchSettings {
    /// Parse settings from a JSON string and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for malformed JSON and
    /// [`SearchError::InvalidConfig`] for out-of-range values.
    pub fn from_json(json: &str) -> SearchResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| SearchError::Config(format!("failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if serialization fails.
    pub fn to_json(&self) -> SearchResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SearchError::Config(format!("failed to serialize settings: {e}")))
    }

    /// Validate the section for the selected strategy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> SearchResult<()> {
        match self.strategy {
            StrategyKind::Random => self.random.generator.validate(),
            StrategyKind::Genetic => self.evolution.validate(),
        }
    }

    /// The strategy these settings describe.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Random => Strategy::Random(self.random),
            StrategyKind::Genetic => Strategy::Genetic(self.evolution),
        }
    }
}

/// Load and validate settings from a JSON file.
///
/// # Errors
///
/// Returns [`SearchError::Io`] if the file cannot be read, otherwise as
/// [`SearchSettings::from_json`].
pub fn load(path: &Path) -> SearchResult<SearchSettings> {
    let contents = std::fs::read_to_string(path)?;
    SearchSettings::from_json(&contents)
}
