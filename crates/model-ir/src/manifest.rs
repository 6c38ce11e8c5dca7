// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model manifest parsing.
//!
//! The manifest (`model.json`) describes the network's layer chain and maps
//! each layer to its weight and bias tensors in the SafeTensors file.
//!
//! # Format
//! ```json
//! {
//!   "name": "iris-mlp",
//!   "format_version": 1,
//!   "input_size": 4,
//!   "dtype": "f32",
//!   "layers": [
//!     {
//!       "name": "Dense Layer",
//!       "units": 8,
//!       "activation": "relu",
//!       "weight": "dense.weight",
//!       "bias": "dense.bias"
//!     },
//!     ...
//!   ]
//! }
//! ```

use crate::ModelError;
use std::path::Path;
use tensor_core::{Activation, DType};

/// Manifest format version written and accepted by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// Top-level model manifest, deserialized from `model.json`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    /// Human-readable model name.
    pub name: String,
    /// Artifact format version.
    pub format_version: u32,
    /// Number of input features the first layer consumes.
    pub input_size: usize,
    /// Storage type of the weight tensors (e.g., `"f32"`).
    #[serde(default = "default_dtype")]
    pub dtype: String,
    /// Layers in execution order.
    pub layers: Vec<ManifestLayer>,
}

fn default_dtype() -> String {
    "f32".to_string()
}

fn default_activation() -> String {
    "identity".to_string()
}

/// A single layer entry in the manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ManifestLayer {
    /// Layer name, unique within the model (e.g., `"Output Layer"`).
    pub name: String,
    /// Number of output units.
    pub units: usize,
    /// Activation name (e.g., `"relu"`, `"softmax"`).
    #[serde(default = "default_activation")]
    pub activation: String,
    /// Weight tensor name in the SafeTensors file, shape `[in, units]`.
    pub weight: String,
    /// Bias tensor name in the SafeTensors file, shape `[units]`.
    pub bias: String,
}

impl ModelManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Serialises the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates that the manifest is internally consistent.
    ///
    /// Checks:
    /// - The format version is supported.
    /// - The input size and every layer's unit count are non-zero.
    /// - At least one layer is defined, with no duplicate names.
    /// - All activation names and the dtype are recognised.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }

        if self.input_size == 0 {
            return Err(ModelError::InvalidGraph("input_size must be positive".into()));
        }

        if self.layers.is_empty() {
            return Err(ModelError::InvalidGraph("manifest contains no layers".into()));
        }

        self.parse_dtype()?;

        let mut seen_names = std::collections::HashSet::new();
        let mut seen_tensors = std::collections::HashSet::new();
        for layer in &self.layers {
            if !seen_names.insert(&layer.name) {
                return Err(ModelError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: "duplicate layer name".into(),
                });
            }

            for tensor in [&layer.weight, &layer.bias] {
                if !seen_tensors.insert(tensor) {
                    return Err(ModelError::InvalidLayer {
                        layer: layer.name.clone(),
                        detail: format!("tensor '{tensor}' is already used by another parameter"),
                    });
                }
            }

            if layer.units == 0 {
                return Err(ModelError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: "layer has zero units".into(),
                });
            }

            layer.parse_activation()?;
        }

        Ok(())
    }

    /// Parses the manifest's dtype string.
    pub(crate) fn parse_dtype(&self) -> Result<DType, ModelError> {
        DType::parse(&self.dtype).ok_or_else(|| ModelError::InvalidLayer {
            layer: self.name.clone(),
            detail: format!("unsupported dtype '{}'", self.dtype),
        })
    }
}

impl ManifestLayer {
    /// Parses this layer's activation name.
    pub(crate) fn parse_activation(&self) -> Result<Activation, ModelError> {
        Activation::from_str_loose(&self.activation).ok_or_else(|| ModelError::InvalidLayer {
            layer: self.name.clone(),
            detail: format!("unrecognised activation '{}'", self.activation),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest_json() -> &'static str {
        r#"{
            "name": "iris-mlp",
            "format_version": 1,
            "input_size": 4,
            "dtype": "f32",
            "layers": [
                { "name": "Dense Layer", "units": 8, "activation": "relu",
                  "weight": "dense.weight", "bias": "dense.bias" },
                { "name": "Output Layer", "units": 3, "activation": "softmax",
                  "weight": "output.weight", "bias": "output.bias" }
            ]
        }"#
    }

    #[test]
    fn test_parse_manifest() {
        let m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        assert_eq!(m.name, "iris-mlp");
        assert_eq!(m.input_size, 4);
        assert_eq!(m.layers.len(), 2);
        assert_eq!(m.layers[1].name, "Output Layer");
    }

    #[test]
    fn test_validate_shared_tensor_name() {
        let mut m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        m.layers[1].weight = "dense.weight".into();
        assert!(matches!(
            m.validate(),
            Err(ModelError::InvalidLayer { layer, detail })
                if layer == "Output Layer" && detail.contains("dense.weight")
        ));

        let mut m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        m.layers[0].bias = "dense.weight".into();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        m.validate().unwrap();
    }

    #[test]
    fn test_validate_wrong_version() {
        let mut m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        m.format_version = 7;
        assert!(matches!(
            m.validate(),
            Err(ModelError::UnsupportedVersion { found: 7, supported: 1 })
        ));
    }

    #[test]
    fn test_validate_empty_layers() {
        let json = r#"{ "name": "empty", "format_version": 1, "input_size": 4, "layers": [] }"#;
        let m = ModelManifest::from_json(json).unwrap();
        assert!(matches!(m.validate(), Err(ModelError::InvalidGraph(_))));
    }

    #[test]
    fn test_validate_bad_activation() {
        let json = r#"{
            "name": "bad", "format_version": 1, "input_size": 4,
            "layers": [{ "name": "l0", "units": 2, "activation": "bogus",
                         "weight": "w", "bias": "b" }]
        }"#;
        let m = ModelManifest::from_json(json).unwrap();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_names() {
        let json = r#"{
            "name": "dup", "format_version": 1, "input_size": 4,
            "layers": [
                { "name": "l0", "units": 2, "weight": "w1", "bias": "b1" },
                { "name": "l0", "units": 2, "weight": "w2", "bias": "b2" }
            ]
        }"#;
        let m = ModelManifest::from_json(json).unwrap();
        assert!(matches!(m.validate(), Err(ModelError::InvalidLayer { .. })));
    }

    #[test]
    fn test_validate_zero_units() {
        let json = r#"{
            "name": "zero", "format_version": 1, "input_size": 4,
            "layers": [{ "name": "l0", "units": 0, "weight": "w", "bias": "b" }]
        }"#;
        let m = ModelManifest::from_json(json).unwrap();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let json = r#"{
            "name": "defaults", "format_version": 1, "input_size": 2,
            "layers": [{ "name": "l0", "units": 1, "weight": "w", "bias": "b" }]
        }"#;
        let m = ModelManifest::from_json(json).unwrap();
        assert_eq!(m.dtype, "f32");
        assert_eq!(m.layers[0].activation, "identity");
    }

    #[test]
    fn test_truncated_json() {
        let json = &sample_manifest_json()[..40];
        assert!(matches!(
            ModelManifest::from_json(json),
            Err(ModelError::ManifestParseError(_))
        ));
    }
}
