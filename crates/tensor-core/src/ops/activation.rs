// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Activation functions applied after a dense projection.

use crate::{Tensor, TensorError};

/// Coefficient `sqrt(2/π)`.
const SQRT_2_OVER_PI: f32 = 0.797_884_6;

/// Cubic coefficient in the tanh approximation of GELU.
const GELU_COEFF: f32 = 0.044715;

/// The non-linearity a layer applies to its affine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// `f(x) = x`.
    #[default]
    Identity,
    /// `f(x) = max(0, x)`.
    Relu,
    /// `f(x) = 1 / (1 + e^-x)`.
    Sigmoid,
    /// Hyperbolic tangent.
    Tanh,
    /// Gaussian Error Linear Unit, tanh approximation.
    Gelu,
    /// Row-wise softmax.
    Softmax,
}

impl Activation {
    /// Parses an activation name, accepting common aliases
    /// (`"linear"`, `"logistic"`, `"rectifier"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "identity" | "linear" | "none" => Some(Self::Identity),
            "relu" | "rectifier" => Some(Self::Relu),
            "sigmoid" | "logistic" => Some(Self::Sigmoid),
            "tanh" => Some(Self::Tanh),
            "gelu" => Some(Self::Gelu),
            "softmax" => Some(Self::Softmax),
            _ => None,
        }
    }

    /// Returns the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Relu => "relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Gelu => "gelu",
            Self::Softmax => "softmax",
        }
    }

    /// Applies the activation in place.
    pub fn apply(&self, tensor: &mut Tensor) -> Result<(), TensorError> {
        match self {
            Self::Identity => {}
            Self::Softmax => crate::softmax(tensor)?,
            Self::Relu => map_in_place(tensor, |x| x.max(0.0)),
            Self::Sigmoid => map_in_place(tensor, |x| 1.0 / (1.0 + (-x).exp())),
            Self::Tanh => map_in_place(tensor, f32::tanh),
            Self::Gelu => map_in_place(tensor, gelu_scalar),
        }
        Ok(())
    }
}

fn map_in_place(tensor: &mut Tensor, f: impl Fn(f32) -> f32) {
    tensor.as_mut_slice().iter_mut().for_each(|x| *x = f(*x));
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GELU(x) ≈ 0.5 * x * (1 + tanh(sqrt(2/π) * (x + 0.044715 * x³)))`
#[inline(always)]
fn gelu_scalar(x: f32) -> f32 {
    let inner = SQRT_2_OVER_PI * (x + GELU_COEFF * x * x * x);
    0.5 * x * (1.0 + inner.tanh())
}
