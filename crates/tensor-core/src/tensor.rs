// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type.

use crate::{DType, Shape, TensorError};

/// An owned, n-dimensional `f32` tensor stored in contiguous memory.
///
/// Data is stored in row-major (C) order. A batch of records is a rank-2
/// tensor `[rows, features]`, and [`row`](Tensor::row) borrows one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::zeros(Shape::matrix(2, 3));
    /// assert_eq!(t.as_slice().len(), 6);
    /// ```
    pub fn zeros(shape: Shape) -> Self {
        let n = shape.num_elements();
        Self {
            shape,
            data: vec![0.0; n],
        }
    }

    /// Creates a tensor from owned `f32` values.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::from_vec(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_vec(shape: Shape, data: Vec<f32>) -> Result<Self, TensorError> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected: expected * DType::F32.size_bytes(),
                actual: data.len() * DType::F32.size_bytes(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Decodes a tensor from little-endian bytes of the given dtype.
    ///
    /// `F64` input is narrowed to `f32`.
    pub fn from_le_bytes(shape: Shape, dtype: DType, bytes: &[u8]) -> Result<Self, TensorError> {
        let expected = shape.size_bytes(dtype);
        if bytes.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let data = match dtype {
            DType::F32 => bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            DType::F64 => bytes
                .chunks_exact(8)
                .map(|c| {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(c);
                    f64::from_le_bytes(buf) as f32
                })
                .collect(),
        };
        Ok(Self { shape, data })
    }

    /// Encodes the tensor as little-endian `f32` bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of rows of a rank-2 tensor (the batch size).
    pub fn rows(&self) -> usize {
        self.shape.dim(0).unwrap_or(0)
    }

    /// Number of columns of a rank-2 tensor (the feature width).
    pub fn cols(&self) -> usize {
        self.shape.dim(1).unwrap_or(0)
    }

    /// Borrows one row of a rank-2 tensor.
    ///
    /// # Panics
    /// Panics if `index >= self.rows()`.
    pub fn row(&self, index: usize) -> &[f32] {
        let cols = self.cols();
        &self.data[index * cols..(index + 1) * cols]
    }

    /// Returns the elements in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the elements mutably in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the memory footprint of this tensor in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len() * DType::F32.size_bytes()
    }
}
