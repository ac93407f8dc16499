//! Configuration management for split criteria.
//!
//! Configurations can be built programmatically through
//! [`CriterionConfigBuilder`], read from `.json`/`.toml` files, taken from
//! `SPLIT_CRITERION_*` environment variables, or parsed from `key=value`
//! pairs.

pub mod core;

pub use self::core::{CriterionConfig, CriterionConfigBuilder};

use crate::core::error::{CriterionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

impl Default for ConfigFormat {
    fn default() -> Self {
        ConfigFormat::Toml
    }
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(CriterionError::config(
                "Unsupported config file format. Use .json or .toml",
            )),
        }
    }
}

/// Build a configuration from `key=value` pairs.
///
/// Recognized keys are `impurity`, `n_classes` (comma separated) and
/// `missing_go_to_left`. Unknown keys are logged and ignored.
pub fn config_from_map(params: &HashMap<String, String>) -> Result<CriterionConfig> {
    let mut config = CriterionConfig::default();

    for (key, value) in params {
        match key.as_str() {
            "impurity" | "criterion" => {
                config.impurity = value.parse()?;
            }
            "n_classes" => {
                config.n_classes = self::core::parse_class_counts(value)
                    .map_err(|_| CriterionError::config(format!("Invalid n_classes: {}", value)))?;
            }
            "missing_go_to_left" => {
                config.missing_go_to_left = value.trim().parse().map_err(|_| {
                    CriterionError::config(format!("Invalid missing_go_to_left: {}", value))
                })?;
            }
            _ => {
                log::warn!("Unknown configuration parameter: {}", key);
            }
        }
    }

    config.validate()?;
    Ok(config)
}
