// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row-wise softmax.

use crate::{Tensor, TensorError};

/// Computes softmax in place along the last dimension of a rank-2 tensor:
/// `x[i] = exp(x[i] - max) / sum(exp(x - max))` for each row.
///
/// Subtracting the row maximum before exponentiation prevents overflow.
///
/// # Errors
/// Returns [`TensorError::RankMismatch`] if the tensor is not rank 2.
pub fn softmax(tensor: &mut Tensor) -> Result<(), TensorError> {
    if tensor.shape().rank() != 2 {
        return Err(TensorError::RankMismatch {
            op: "softmax",
            expected: 2,
            shape: tensor.shape().clone(),
        });
    }

    let width = tensor.cols();
    if width == 0 {
        return Ok(());
    }

    for row in tensor.as_mut_slice().chunks_exact_mut(width) {
        let max_val = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut sum = 0.0f32;
        for x in row.iter_mut() {
            *x = (*x - max_val).exp();
            sum += *x;
        }

        if sum > 0.0 {
            let inv_sum = 1.0 / sum;
            row.iter_mut().for_each(|x| *x *= inv_sum);
        }
    }

    Ok(())
}
