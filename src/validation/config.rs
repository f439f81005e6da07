//! Configuration for model validation

use super::rule::RuleId;
use crate::models::EdmVersion;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid validation configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for a validation run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Modelling-language version selecting the rule set
    pub version: EdmVersion,

    /// Rules removed from the rule set
    pub disabled_rules: Vec<RuleId>,

    /// Stop collecting after this many errors (None = all)
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_max_errors"
    )]
    pub max_errors: Option<usize>,
}

/// `maxErrors = 0` reads as no cap, like [`ValidationConfigBuilder::max_errors`]
fn deserialize_max_errors<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<usize>::deserialize(deserializer)?.filter(|max| *max > 0))
}

impl ValidationConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    ///
    /// ```toml
    /// version = "4.01"
    /// disabledRules = ["onDeleteOnManyEnd"]
    /// maxErrors = 100
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled_rules.contains(&rule)
    }
}

/// Builder for ValidationConfig
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    pub fn version(mut self, version: EdmVersion) -> Self {
        self.config.version = version;
        self
    }

    /// Remove a rule from the rule set
    pub fn disable_rule(mut self, rule: RuleId) -> Self {
        if !self.config.disabled_rules.contains(&rule) {
            self.config.disabled_rules.push(rule);
        }
        self
    }

    /// Cap the number of reported errors (0 = no cap)
    pub fn max_errors(mut self, max: usize) -> Self {
        self.config.max_errors = if max == 0 { None } else { Some(max) };
        self
    }

    pub fn build(self) -> ValidationConfig {
        self.config
    }
}
