// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the layer-activation filter.

use std::path::PathBuf;

/// Errors surfaced by schema derivation and transformation.
///
/// None of these are retried internally: each names a bad artifact, a bad
/// configuration, a call-order violation, or bad data.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The model artifact could not be opened, parsed, or validated.
    #[error("could not load model from '{}': {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: model_ir::ModelError,
    },

    /// The configured layer does not exist in the model.
    #[error("unknown layer '{layer}' in model '{model}' (available: {})", .available.join(", "))]
    UnknownLayer {
        layer: String,
        model: String,
        available: Vec<String>,
    },

    /// `transform` was called before `derive_schema` succeeded.
    #[error("filter is not ready: derive the output schema before transforming data")]
    NotReady,

    /// The model failed on the given data.
    #[error("transform failed at record {record}: {detail}")]
    Transform { record: usize, detail: String },

    /// The input schema cannot be fed to the model, or differs from the one
    /// the output schema was derived from.
    #[error("incompatible input schema: {0}")]
    IncompatibleSchema(String),

    /// The configuration is unreadable or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}
