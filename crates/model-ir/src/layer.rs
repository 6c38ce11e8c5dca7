// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer definitions.
//!
//! A [`LayerDef`] is the metadata of one dense layer: its name, position,
//! widths, activation, and the tensor names it was loaded from. A
//! [`DenseLayer`] pairs that metadata with the weights themselves.

use crate::ModelError;
use tensor_core::{dense, Activation, Shape, Tensor, TensorError};

/// Metadata describing a single dense layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerDef {
    /// Unique name within the network (e.g., `"Output Layer"`).
    pub name: String,
    /// Index in the execution order (0-based).
    pub index: usize,
    /// Activation applied after the affine projection.
    pub activation: Activation,
    /// Width of the layer's input.
    pub input_units: usize,
    /// Width of the layer's output.
    pub units: usize,
    /// Name of the weight tensor in the SafeTensors file.
    pub weight_name: String,
    /// Name of the bias tensor in the SafeTensors file.
    pub bias_name: String,
}

impl LayerDef {
    /// Number of trainable parameters (weights plus biases).
    pub fn num_parameters(&self) -> usize {
        self.input_units * self.units + self.units
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} ({}): {} → {} units, {} parameters",
            self.index,
            self.name,
            self.activation,
            self.input_units,
            self.units,
            self.num_parameters(),
        )
    }
}

/// A dense layer with its weights: `activation(x @ weight + bias)`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    /// Layer metadata.
    pub def: LayerDef,
    /// Weight matrix `[input_units, units]`.
    pub weight: Tensor,
    /// Bias vector `[units]`.
    pub bias: Tensor,
}

impl DenseLayer {
    /// Builds a layer, deriving its widths from the weight matrix.
    pub fn new(
        name: impl Into<String>,
        index: usize,
        activation: Activation,
        weight: Tensor,
        bias: Tensor,
    ) -> Self {
        let name = name.into();
        let slug = name.to_lowercase().replace(' ', "_");
        let def = LayerDef {
            weight_name: format!("{slug}.weight"),
            bias_name: format!("{slug}.bias"),
            name,
            index,
            activation,
            input_units: weight.rows(),
            units: weight.cols(),
        };
        Self { def, weight, bias }
    }

    /// Returns the layer's name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Checks the stored tensors against the declared widths.
    pub fn check_shapes(&self) -> Result<(), ModelError> {
        let expected_weight = Shape::matrix(self.def.input_units, self.def.units);
        if self.weight.shape() != &expected_weight {
            return Err(ModelError::InvalidLayer {
                layer: self.def.name.clone(),
                detail: format!(
                    "weight '{}' has shape {}, expected {expected_weight}",
                    self.def.weight_name,
                    self.weight.shape(),
                ),
            });
        }

        let expected_bias = Shape::vector(self.def.units);
        if self.bias.shape() != &expected_bias {
            return Err(ModelError::InvalidLayer {
                layer: self.def.name.clone(),
                detail: format!(
                    "bias '{}' has shape {}, expected {expected_bias}",
                    self.def.bias_name,
                    self.bias.shape(),
                ),
            });
        }

        Ok(())
    }

    /// Runs the layer on a `[rows, input_units]` batch.
    pub fn forward(&self, input: &Tensor) -> Result<Tensor, TensorError> {
        let mut output = dense(input, &self.weight, &self.bias)?;
        self.def.activation.apply(&mut output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layer() -> DenseLayer {
        let weight = Tensor::from_vec(Shape::matrix(2, 3), vec![1.0, 0.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
        let bias = Tensor::from_vec(Shape::vector(3), vec![0.0, 0.5, 0.0]).unwrap();
        DenseLayer::new("Hidden Layer", 0, Activation::Relu, weight, bias)
    }

    #[test]
    fn test_new_derives_widths() {
        let layer = sample_layer();
        assert_eq!(layer.def.input_units, 2);
        assert_eq!(layer.def.units, 3);
        assert_eq!(layer.def.weight_name, "hidden_layer.weight");
        assert_eq!(layer.def.bias_name, "hidden_layer.bias");
        layer.check_shapes().unwrap();
    }

    #[test]
    fn test_num_parameters() {
        assert_eq!(sample_layer().def.num_parameters(), 2 * 3 + 3);
    }

    #[test]
    fn test_forward() {
        let layer = sample_layer();
        let x = Tensor::from_vec(Shape::matrix(1, 2), vec![1.0, 2.0]).unwrap();
        let y = layer.forward(&x).unwrap();
        // [1, 2] @ W = [1, 2, 3]; + b = [1, 2.5, 3]; relu unchanged.
        assert_eq!(y.as_slice(), &[1.0, 2.5, 3.0]);
    }

    #[test]
    fn test_forward_applies_activation() {
        let layer = sample_layer();
        let x = Tensor::from_vec(Shape::matrix(1, 2), vec![3.0, -2.0]).unwrap();
        let y = layer.forward(&x).unwrap();
        // [3, -2] @ W = [3, -2, -7]; + b = [3, -1.5, -7]; relu → [3, 0, 0].
        assert_eq!(y.as_slice(), &[3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_check_shapes_bad_bias() {
        let mut layer = sample_layer();
        layer.bias = Tensor::zeros(Shape::vector(2));
        assert!(matches!(layer.check_shapes(), Err(ModelError::InvalidLayer { .. })));
    }

    #[test]
    fn test_summary() {
        let s = sample_layer().def.summary();
        assert!(s.contains("[0]"));
        assert!(s.contains("Hidden Layer"));
        assert!(s.contains("relu"));
        assert!(s.contains("9 parameters"));
    }
}
