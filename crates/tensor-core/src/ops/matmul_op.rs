// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication and the dense (affine) projection built on it.

use crate::{Shape, Tensor, TensorError};

/// Performs matrix multiplication: `output = lhs @ rhs`.
///
/// `lhs` is `[M, K]`, `rhs` is `[K, N]`, and `output` must be `[M, N]`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if dimensions are incompatible.
pub fn matmul(lhs: &Tensor, rhs: &Tensor, output: &mut Tensor) -> Result<(), TensorError> {
    if !lhs.shape().is_matmul_compatible(rhs.shape()) {
        return Err(TensorError::ShapeMismatch {
            op: "matmul",
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }

    let m = lhs.rows();
    let k = lhs.cols();
    let n = rhs.cols();

    let expected_shape = Shape::matrix(m, n);
    if output.shape() != &expected_shape {
        return Err(TensorError::ShapeMismatch {
            op: "matmul (output)",
            lhs: expected_shape,
            rhs: output.shape().clone(),
        });
    }

    matmul_f32_generic(lhs.as_slice(), rhs.as_slice(), output.as_mut_slice(), m, k, n);

    Ok(())
}

/// Affine projection `input @ weight + bias`, the forward pass of a dense layer
/// before its activation.
///
/// `input` is `[rows, in]`, `weight` is `[in, units]`, `bias` is `[units]`.
/// Returns a new `[rows, units]` tensor.
pub fn dense(input: &Tensor, weight: &Tensor, bias: &Tensor) -> Result<Tensor, TensorError> {
    let units = weight.cols();
    if bias.shape() != &Shape::vector(units) {
        return Err(TensorError::ShapeMismatch {
            op: "dense (bias)",
            lhs: Shape::vector(units),
            rhs: bias.shape().clone(),
        });
    }

    let mut output = Tensor::zeros(Shape::matrix(input.rows(), units));
    matmul(input, weight, &mut output)?;

    let b = bias.as_slice();
    for row in output.as_mut_slice().chunks_exact_mut(units.max(1)) {
        for (x, &bj) in row.iter_mut().zip(b) {
            *x += bj;
        }
    }

    Ok(output)
}

/// Portable f32 matrix multiplication.
///
/// ikj loop order keeps the inner loop a saxpy over a contiguous row of `c`.
fn matmul_f32_generic(a: &[f32], b: &[f32], c: &mut [f32], m: usize, k: usize, n: usize) {
    c.iter_mut().for_each(|x| *x = 0.0);

    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (cj, &bj) in c_row.iter_mut().zip(b_row) {
                *cj += a_ip * bj;
            }
        }
    }
}
