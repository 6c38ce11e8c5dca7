// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Minimal tensor types and kernels for running small feed-forward
//! networks over tabular records.
//!
//! This crate provides:
//! - [`Tensor`]: a row-major `f32` tensor; batches are `[rows, features]`.
//! - [`Shape`]: runtime shape descriptors.
//! - [`DType`]: element types accepted when decoding stored weights.
//! - [`Activation`]: the element-wise / row-wise activation functions.
//! - Kernels: matrix multiplication, dense (affine) projection, softmax.
//!
//! # Design Goals
//! - Zero-row batches are valid everywhere, so callers can read output
//!   widths without any data.
//! - Kernels write into caller-owned outputs where practical.
//! - Clean error types via `thiserror`.

mod dtype;
mod error;
mod ops;
mod shape;
mod tensor;

pub use dtype::DType;
pub use error::TensorError;
pub use ops::{dense, matmul, softmax, Activation};
pub use shape::Shape;
pub use tensor::Tensor;
