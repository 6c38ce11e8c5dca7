// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor kernels for dense feed-forward layers.
//!
//! All kernels accept zero-row inputs and produce zero-row outputs of the
//! correct width.

mod activation;
mod matmul_op;
mod softmax_op;

pub use activation::Activation;
pub use matmul_op::{dense, matmul};
pub use softmax_op::softmax;
