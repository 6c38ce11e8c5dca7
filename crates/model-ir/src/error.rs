// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model loading and evaluation.

/// Errors that can occur when loading or evaluating a network.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model manifest or weight file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// The manifest was written by an incompatible version of the format.
    #[error("unsupported model format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A tensor referenced in the manifest was not found in the SafeTensors file.
    #[error("weight tensor not found: {name}")]
    WeightNotFound { name: String },

    /// The SafeTensors file could not be read, parsed, or written.
    #[error("SafeTensors error: {0}")]
    SafeTensorsError(String),

    /// A layer definition is invalid (e.g., incompatible shapes).
    #[error("invalid layer '{layer}': {detail}")]
    InvalidLayer { layer: String, detail: String },

    /// The network as a whole is malformed.
    #[error("invalid network: {0}")]
    InvalidGraph(String),

    /// No layer with the requested name exists.
    #[error("no layer named '{layer}'")]
    UnknownLayer { layer: String },

    /// The batch fed to the network does not have the network's input width.
    #[error("input width mismatch: network expects {expected} features, batch has {actual}")]
    InputWidthMismatch { expected: usize, actual: usize },

    /// A kernel failed while evaluating a layer.
    #[error("computation failed in layer '{layer}': {source}")]
    Compute {
        layer: String,
        #[source]
        source: tensor_core::TensorError,
    },
}
