// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The network: an ordered chain of dense layers.
//!
//! # Type-State Pattern
//!
//! ```text
//! Network<Loaded>     layers assembled, not yet checked.
//!       │  .validate()
//!       ▼
//! Network<Validated>  widths chained, shapes verified, ready to evaluate.
//! ```
//!
//! Only a validated network can be evaluated, so the forward pass never has
//! to re-check layer widths. The markers are zero-sized.

use crate::{DenseLayer, LayerDef, ModelError, ModelManifest, FORMAT_VERSION};
use std::fmt;
use tensor_core::Tensor;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: network has been assembled but not validated.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: network has been validated and can be evaluated.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for network states.
pub trait NetworkState: fmt::Debug + Clone {}
impl NetworkState for Loaded {}
impl NetworkState for Validated {}

// ── Network ────────────────────────────────────────────────────────

/// A feed-forward network. `S` encodes the validation state.
#[derive(Debug, Clone)]
pub struct Network<S: NetworkState = Loaded> {
    /// Human-readable model name.
    pub name: String,
    /// Number of input features.
    pub input_size: usize,
    /// Layers in execution order.
    pub layers: Vec<DenseLayer>,
    _state: std::marker::PhantomData<S>,
}

// ── Loaded state ───────────────────────────────────────────────────

impl Network<Loaded> {
    /// Creates a new network in the `Loaded` state.
    pub fn new(name: impl Into<String>, input_size: usize, layers: Vec<DenseLayer>) -> Self {
        Self {
            name: name.into(),
            input_size,
            layers,
            _state: std::marker::PhantomData,
        }
    }

    /// Validates the network and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - The network is non-empty.
    /// - Layer indices are consecutive starting from 0.
    /// - Layer names are unique.
    /// - The first layer consumes `input_size` features and every later
    ///   layer consumes its predecessor's units.
    /// - Every weight and bias tensor matches its layer's widths.
    pub fn validate(self) -> Result<Network<Validated>, ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::InvalidGraph("network contains no layers".into()));
        }

        let mut seen = std::collections::HashSet::new();
        let mut tensors = std::collections::HashSet::new();
        let mut expected_input = self.input_size;

        for (i, layer) in self.layers.iter().enumerate() {
            let def = &layer.def;
            if def.index != i {
                return Err(ModelError::InvalidLayer {
                    layer: def.name.clone(),
                    detail: format!("expected index {i}, got {}", def.index),
                });
            }
            if !seen.insert(def.name.as_str()) {
                return Err(ModelError::InvalidLayer {
                    layer: def.name.clone(),
                    detail: "duplicate layer name".into(),
                });
            }
            for tensor in [&def.weight_name, &def.bias_name] {
                if !tensors.insert(tensor.as_str()) {
                    return Err(ModelError::InvalidLayer {
                        layer: def.name.clone(),
                        detail: format!("tensor '{tensor}' is already used by another parameter"),
                    });
                }
            }
            if def.input_units != expected_input {
                return Err(ModelError::InvalidLayer {
                    layer: def.name.clone(),
                    detail: format!(
                        "consumes {} features but receives {expected_input}",
                        def.input_units
                    ),
                });
            }
            layer.check_shapes()?;
            expected_input = def.units;
        }

        Ok(Network {
            name: self.name,
            input_size: self.input_size,
            layers: self.layers,
            _state: std::marker::PhantomData,
        })
    }
}

// ── Validated state ────────────────────────────────────────────────

impl Network<Validated> {
    /// Returns the total number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Returns the total number of parameters.
    pub fn total_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.def.num_parameters()).sum()
    }

    /// Returns an iterator over the layer definitions in execution order.
    pub fn iter_layers(&self) -> impl Iterator<Item = &LayerDef> {
        self.layers.iter().map(|l| &l.def)
    }

    /// Looks up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&LayerDef> {
        self.iter_layers().find(|l| l.name == name)
    }

    /// Evaluates the network on a `[rows, input_size]` batch, stopping after
    /// the layer named `layer` and returning its `[rows, units]` output.
    pub fn forward_to(&self, layer: &str, batch: &Tensor) -> Result<Tensor, ModelError> {
        let target = self
            .layers
            .iter()
            .position(|l| l.def.name == layer)
            .ok_or_else(|| ModelError::UnknownLayer {
                layer: layer.to_string(),
            })?;

        if batch.shape().rank() != 2 || batch.cols() != self.input_size {
            return Err(ModelError::InputWidthMismatch {
                expected: self.input_size,
                actual: batch.cols(),
            });
        }

        let mut activations = batch.clone();
        for dense in &self.layers[..=target] {
            activations = dense.forward(&activations).map_err(|source| ModelError::Compute {
                layer: dense.def.name.clone(),
                source,
            })?;
        }

        Ok(activations)
    }

    /// Builds the manifest describing this network.
    pub fn to_manifest(&self) -> ModelManifest {
        ModelManifest {
            name: self.name.clone(),
            format_version: FORMAT_VERSION,
            input_size: self.input_size,
            dtype: "f32".to_string(),
            layers: self
                .iter_layers()
                .map(|l| crate::ManifestLayer {
                    name: l.name.clone(),
                    units: l.units,
                    activation: l.activation.as_str().to_string(),
                    weight: l.weight_name.clone(),
                    bias: l.bias_name.clone(),
                })
                .collect(),
        }
    }

    /// Returns a summary string describing the network.
    pub fn summary(&self) -> String {
        format!(
            "Model '{}': {} inputs, {} layers, {} parameters",
            self.name,
            self.input_size,
            self.num_layers(),
            self.total_parameters(),
        )
    }
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: NetworkState> fmt::Display for Network<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network '{}' ({} layers):", self.name, self.layers.len())?;
        for layer in &self.layers {
            writeln!(f, "  {}", layer.def.summary())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{Activation, Shape};

    /// Helper: a 2 → 3 → 2 network with simple, hand-checkable weights.
    fn sample_layers() -> Vec<DenseLayer> {
        let w0 = Tensor::from_vec(Shape::matrix(2, 3), vec![1.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        let b0 = Tensor::from_vec(Shape::vector(3), vec![0.0, 0.0, -1.0]).unwrap();
        let w1 = Tensor::from_vec(Shape::matrix(3, 2), vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let b1 = Tensor::zeros(Shape::vector(2));
        vec![
            DenseLayer::new("Hidden Layer", 0, Activation::Relu, w0, b0),
            DenseLayer::new("Output Layer", 1, Activation::Identity, w1, b1),
        ]
    }

    fn sample_network() -> Network<Validated> {
        Network::new("test", 2, sample_layers()).validate().unwrap()
    }

    #[test]
    fn test_validate_ok() {
        let net = sample_network();
        assert_eq!(net.num_layers(), 2);
        assert_eq!(net.total_parameters(), (2 * 3 + 3) + (3 * 2 + 2));
    }

    #[test]
    fn test_validate_empty() {
        assert!(Network::new("empty", 2, vec![]).validate().is_err());
    }

    #[test]
    fn test_validate_bad_index() {
        let mut layers = sample_layers();
        layers[1].def.index = 5;
        assert!(Network::new("bad", 2, layers).validate().is_err());
    }

    #[test]
    fn test_validate_broken_chain() {
        assert!(matches!(
            Network::new("bad", 3, sample_layers()).validate(),
            Err(ModelError::InvalidLayer { .. })
        ));
    }

    #[test]
    fn test_validate_colliding_tensor_names() {
        // Distinct layer names that slug to the same tensor names.
        let w = Tensor::zeros(Shape::matrix(2, 2));
        let b = Tensor::zeros(Shape::vector(2));
        let layers = vec![
            DenseLayer::new("Hidden Layer", 0, Activation::Relu, w.clone(), b.clone()),
            DenseLayer::new("hidden layer", 1, Activation::Relu, w, b),
        ];
        match Network::new("collide", 2, layers).validate() {
            Err(ModelError::InvalidLayer { layer, detail }) => {
                assert_eq!(layer, "hidden layer");
                assert!(detail.contains("hidden_layer.weight"));
            }
            other => panic!("expected InvalidLayer, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_duplicate_name() {
        let mut layers = sample_layers();
        layers[1].def.name = "Hidden Layer".into();
        assert!(Network::new("dup", 2, layers).validate().is_err());
    }

    #[test]
    fn test_forward_to_hidden() {
        let net = sample_network();
        let x = Tensor::from_vec(Shape::matrix(2, 2), vec![1.0, 2.0, 0.0, 0.0]).unwrap();
        let y = net.forward_to("Hidden Layer", &x).unwrap();
        // Row 0: [1, 2, 3 - 1] ; Row 1: relu([0, 0, -1]) = [0, 0, 0].
        assert_eq!(y.as_slice(), &[1.0, 2.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_forward_to_output() {
        let net = sample_network();
        let x = Tensor::from_vec(Shape::matrix(1, 2), vec![1.0, 2.0]).unwrap();
        let y = net.forward_to("Output Layer", &x).unwrap();
        // Hidden [1, 2, 2] @ W1 = [1 + 2, 2 + 2].
        assert_eq!(y.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_forward_empty_batch() {
        let net = sample_network();
        let y = net.forward_to("Hidden Layer", &Tensor::zeros(Shape::matrix(0, 2))).unwrap();
        assert_eq!(y.shape(), &Shape::matrix(0, 3));
    }

    #[test]
    fn test_forward_unknown_layer() {
        let net = sample_network();
        let x = Tensor::zeros(Shape::matrix(1, 2));
        assert!(matches!(
            net.forward_to("NoSuchLayer", &x),
            Err(ModelError::UnknownLayer { .. })
        ));
    }

    #[test]
    fn test_forward_width_mismatch() {
        let net = sample_network();
        let x = Tensor::zeros(Shape::matrix(1, 5));
        assert!(matches!(
            net.forward_to("Output Layer", &x),
            Err(ModelError::InputWidthMismatch { expected: 2, actual: 5 })
        ));
    }

    #[test]
    fn test_to_manifest() {
        let m = sample_network().to_manifest();
        m.validate().unwrap();
        assert_eq!(m.layers.len(), 2);
        assert_eq!(m.layers[0].activation, "relu");
        assert_eq!(m.layers[1].weight, "output_layer.weight");
    }

    #[test]
    fn test_display() {
        let display = format!("{}", Network::new("test", 2, sample_layers()));
        assert!(display.contains("Hidden Layer"));
        assert!(display.contains("Output Layer"));
    }
}
