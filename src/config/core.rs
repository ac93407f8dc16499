//! Criterion configuration structure and builder.
//!
//! A [`CriterionConfig`] fixes everything that stays constant for the
//! lifetime of a criterion: the impurity functional, the number of outputs
//! and the number of classes of each output, and the default routing of
//! samples with a missing feature value.

use crate::core::constants::*;
use crate::core::error::{CriterionError, Result};
use crate::core::types::*;
use crate::config_error;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::ConfigFormat;

/// Configuration of a classification criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionConfig {
    /// Impurity functional used for node and children impurity
    pub impurity: ImpurityKind,
    /// Number of classes of each output; its length is the number of outputs
    pub n_classes: Vec<usize>,
    /// Send samples with a missing feature value to the left child
    pub missing_go_to_left: bool,
}

impl Default for CriterionConfig {
    fn default() -> Self {
        CriterionConfig {
            impurity: DEFAULT_IMPURITY,
            n_classes: vec![2],
            missing_go_to_left: DEFAULT_MISSING_GO_TO_LEFT,
        }
    }
}

impl CriterionConfig {
    /// Create a single-output configuration with default settings
    pub fn new(n_classes: usize) -> Self {
        CriterionConfig {
            n_classes: vec![n_classes],
            ..CriterionConfig::default()
        }
    }

    /// Number of target columns
    pub fn n_outputs(&self) -> usize {
        self.n_classes.len()
    }

    /// Largest class count over all outputs
    pub fn max_n_classes(&self) -> usize {
        self.n_classes.iter().copied().max().unwrap_or(0)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.n_classes.is_empty() {
            return Err(CriterionError::invalid_parameter(
                "n_classes",
                "[]",
                "at least one output is required",
            ));
        }

        for (k, &n) in self.n_classes.iter().enumerate() {
            if n == 0 {
                return Err(CriterionError::invalid_parameter(
                    format!("n_classes[{}]", k),
                    n.to_string(),
                    "must be at least 1",
                ));
            }
            if n == 1 {
                log::warn!("output {} declares a single class; its impurity is always zero", k);
            }
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: CriterionConfig = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)
                .map_err(|e| config_error!("Failed to parse TOML config: {}", e))?,
        };

        config.validate()?;
        log::debug!("loaded criterion config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| config_error!("Failed to serialize to TOML: {}", e))?,
        };

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn load_from_environment() -> Result<Self> {
        let mut config = CriterionConfig::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply `SPLIT_CRITERION_*` environment variables to this configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(ENV_IMPURITY) {
            self.impurity = val.parse()?;
        }

        if let Ok(val) = std::env::var(ENV_N_CLASSES) {
            self.n_classes = parse_class_counts(&val)
                .map_err(|_| config_error!("Invalid {}", ENV_N_CLASSES))?;
        }

        if let Ok(val) = std::env::var(ENV_MISSING_GO_TO_LEFT) {
            self.missing_go_to_left = val
                .trim()
                .parse()
                .map_err(|_| config_error!("Invalid {}", ENV_MISSING_GO_TO_LEFT))?;
        }

        self.validate()
    }

    /// Get configuration as a parameter map (for debugging/serialization)
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("impurity".to_string(), self.impurity.to_string());
        map.insert(
            "n_classes".to_string(),
            self.n_classes
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
        map.insert(
            "missing_go_to_left".to_string(),
            self.missing_go_to_left.to_string(),
        );
        map
    }
}

/// Parse a comma separated list of class counts such as `"2,3"`.
pub(crate) fn parse_class_counts(value: &str) -> std::result::Result<Vec<usize>, std::num::ParseIntError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Builder for [`CriterionConfig`]
#[derive(Debug, Clone)]
pub struct CriterionConfigBuilder {
    config: CriterionConfig,
    validation_errors: Vec<String>,
}

impl CriterionConfigBuilder {
    /// Create a new builder with default settings and no outputs declared yet
    pub fn new() -> Self {
        CriterionConfigBuilder {
            config: CriterionConfig {
                n_classes: Vec::new(),
                ..CriterionConfig::default()
            },
            validation_errors: Vec::new(),
        }
    }

    /// Set the impurity functional
    pub fn impurity(mut self, impurity: ImpurityKind) -> Self {
        self.config.impurity = impurity;
        self
    }

    /// Set the number of classes of every output
    pub fn n_classes(mut self, n_classes: Vec<usize>) -> Self {
        if n_classes.is_empty() {
            self.validation_errors
                .push("n_classes must name at least one output".to_string());
        }
        if n_classes.iter().any(|&n| n == 0) {
            self.validation_errors
                .push("n_classes entries must be at least 1".to_string());
        }
        self.config.n_classes = n_classes;
        self
    }

    /// Append one output with the given number of classes
    pub fn add_output(mut self, n_classes: usize) -> Self {
        if n_classes == 0 {
            self.validation_errors
                .push("n_classes entries must be at least 1".to_string());
        }
        self.config.n_classes.push(n_classes);
        self
    }

    /// Set the routing of samples with a missing feature value
    pub fn missing_go_to_left(mut self, go_left: bool) -> Self {
        self.config.missing_go_to_left = go_left;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CriterionConfig> {
        if !self.validation_errors.is_empty() {
            return Err(CriterionError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for CriterionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
