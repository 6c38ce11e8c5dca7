// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Filter configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/iris-mlp"
//! layer_name = "hidden_layer"
//! batch_size = 100
//! ```

use crate::FilterError;
use std::path::{Path, PathBuf};

/// Default layer: the last layer of a network exported by the trainer.
pub const DEFAULT_LAYER_NAME: &str = "Output Layer";

/// Default number of records fed to the model per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Configuration for a [`LayerActivationFilter`](crate::LayerActivationFilter).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterConfig {
    /// Path to the model artifact directory.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Name of the layer whose activations become the output attributes.
    #[serde(default = "default_layer_name")]
    pub layer_name: String,
    /// Records per forward pass.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./models")
}

fn default_layer_name() -> String {
    DEFAULT_LAYER_NAME.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl FilterConfig {
    /// Creates a configuration for `layer_name` of the model at `model_path`.
    pub fn new(model_path: impl Into<PathBuf>, layer_name: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
            layer_name: layer_name.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, FilterError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FilterError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, FilterError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| FilterError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, FilterError> {
        toml::to_string_pretty(self)
            .map_err(|e| FilterError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks the values a filter cannot run with.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.batch_size == 0 {
            return Err(FilterError::Config("batch_size must be at least 1".into()));
        }
        if self.layer_name.trim().is_empty() {
            return Err(FilterError::Config("layer_name must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            layer_name: default_layer_name(),
            batch_size: default_batch_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = FilterConfig::default();
        assert_eq!(c.model_path, PathBuf::from("./models"));
        assert_eq!(c.layer_name, "Output Layer");
        assert_eq!(c.batch_size, 100);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
model_path = "/tmp/model"
layer_name = "hidden_layer"
batch_size = 16
"#;
        let c = FilterConfig::from_toml(toml).unwrap();
        assert_eq!(c.model_path, PathBuf::from("/tmp/model"));
        assert_eq!(c.layer_name, "hidden_layer");
        assert_eq!(c.batch_size, 16);
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let c = FilterConfig::from_toml("model_path = \"/srv/mlp\"\n").unwrap();
        assert_eq!(c.model_path, PathBuf::from("/srv/mlp"));
        assert_eq!(c.layer_name, DEFAULT_LAYER_NAME);
        assert_eq!(c.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_from_toml_rejects_zero_batch() {
        let err = FilterConfig::from_toml("batch_size = 0\n").unwrap_err();
        assert!(matches!(err, FilterError::Config(_)));
    }

    #[test]
    fn test_from_toml_malformed() {
        let err = FilterConfig::from_toml("batch_size = \"many\"").unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = FilterConfig {
            batch_size: 7,
            ..FilterConfig::new("/opt/models/mlp", "hidden_layer")
        };
        let toml = c.to_toml().unwrap();
        let back = FilterConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_from_file_missing() {
        let err = FilterConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }

    #[test]
    fn test_validate_empty_layer() {
        let c = FilterConfig::new("./models", "  ");
        assert!(c.validate().is_err());
    }
}
