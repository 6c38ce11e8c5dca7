// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-ir
//!
//! In-memory representation of a trained feed-forward network, and the
//! loader that reads one from disk.
//!
//! - [`LayerDef`] / [`DenseLayer`]: a named dense layer and its weights.
//! - [`Network`]: the ordered layer chain, with a **type-state pattern**
//!   (`Loaded` → `Validated`).
//! - [`ActivationModel`]: the capability consumers rely on (list layers and
//!   compute the output of a named layer for a batch).
//! - [`ModelLoader`] / [`ModelWriter`]: read and write a model artifact.
//! - [`ModelManifest`]: the JSON model descriptor.
//!
//! # Artifact Format
//! A model artifact is a directory holding:
//! - `model.json`: the manifest (name, format version, input width, layers).
//! - `model.safetensors`: weights and biases in SafeTensors format.
//!
//! # Example
//! ```no_run
//! use model_ir::{ActivationModel, ModelLoader};
//! use std::path::Path;
//!
//! let network = ModelLoader::load(Path::new("./models/iris-mlp")).unwrap();
//! println!("{}", network.summary());
//! for name in network.layer_names() {
//!     println!("  {name}");
//! }
//! ```

mod error;
mod layer;
mod loader;
pub(crate) mod manifest;
mod model;
pub mod network;
mod writer;

pub use error::ModelError;
pub use layer::{DenseLayer, LayerDef};
pub use loader::ModelLoader;
pub use manifest::{ManifestLayer, ModelManifest, FORMAT_VERSION};
pub use model::ActivationModel;
pub use network::Network;
pub use writer::ModelWriter;
