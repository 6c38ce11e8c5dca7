// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The capability a trained model exposes to feature extractors.

use crate::network::Validated;
use crate::{ModelError, Network};
use tensor_core::Tensor;

/// A trained model whose intermediate layer outputs can be read.
///
/// Implementations must be pure: evaluating a layer never changes the model.
/// [`Network<Validated>`] is the provided implementation; hosts may plug in
/// their own.
pub trait ActivationModel: std::fmt::Debug {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Number of features each input row must have.
    fn input_width(&self) -> usize;

    /// Names of all layers whose output can be requested, in execution order.
    fn layer_names(&self) -> Vec<&str>;

    /// Computes the output of `layer` for a `[rows, input_width]` batch.
    ///
    /// A zero-row batch must be accepted and yields a zero-row output whose
    /// width is the layer's unit count.
    fn compute_layer_output(&self, layer: &str, batch: &Tensor) -> Result<Tensor, ModelError>;
}

impl ActivationModel for Network<Validated> {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_width(&self) -> usize {
        self.input_size
    }

    fn layer_names(&self) -> Vec<&str> {
        self.iter_layers().map(|l| l.name.as_str()).collect()
    }

    fn compute_layer_output(&self, layer: &str, batch: &Tensor) -> Result<Tensor, ModelError> {
        self.forward_to(layer, batch)
    }
}

impl<M: ActivationModel + ?Sized> ActivationModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn input_width(&self) -> usize {
        (**self).input_width()
    }

    fn layer_names(&self) -> Vec<&str> {
        (**self).layer_names()
    }

    fn compute_layer_output(&self, layer: &str, batch: &Tensor) -> Result<Tensor, ModelError> {
        (**self).compute_layer_output(layer, batch)
    }
}
