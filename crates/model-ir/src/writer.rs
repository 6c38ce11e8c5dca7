// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Writing a network back to disk as a model artifact.
//!
//! Produces exactly the layout [`crate::ModelLoader`] reads: `model.json`
//! plus `model.safetensors` with `f32` tensors.

use crate::loader::{MANIFEST_FILE, WEIGHTS_FILE};
use crate::network::Validated;
use crate::{ModelError, Network};
use std::path::Path;

/// Saves validated networks as model artifacts.
pub struct ModelWriter;

impl ModelWriter {
    /// Writes `network` into `model_dir`, creating the directory if needed.
    ///
    /// Existing artifact files in the directory are overwritten. Nothing is
    /// written if the network's manifest does not validate.
    pub fn save(model_dir: &Path, network: &Network<Validated>) -> Result<(), ModelError> {
        // `layers` is public, so re-check what the loader will insist on.
        let manifest = network.to_manifest();
        manifest.validate()?;

        std::fs::create_dir_all(model_dir)?;
        std::fs::write(model_dir.join(MANIFEST_FILE), manifest.to_json()?)?;

        // Encode first so the views below can borrow the buffers.
        let encoded: Vec<(String, Vec<usize>, Vec<u8>)> = network
            .layers
            .iter()
            .flat_map(|l| {
                [
                    (l.def.weight_name.clone(), &l.weight),
                    (l.def.bias_name.clone(), &l.bias),
                ]
            })
            .map(|(name, t)| (name, t.shape().dims().to_vec(), t.to_le_bytes()))
            .collect();

        let mut views = Vec::with_capacity(encoded.len());
        for (name, shape, bytes) in &encoded {
            let view = safetensors::tensor::TensorView::new(
                safetensors::Dtype::F32,
                shape.clone(),
                bytes,
            )
            .map_err(|e| ModelError::SafeTensorsError(format!("tensor '{name}': {e}")))?;
            views.push((name.clone(), view));
        }

        let weights_path = model_dir.join(WEIGHTS_FILE);
        safetensors::serialize_to_file(views, &None, &weights_path).map_err(|e| {
            ModelError::SafeTensorsError(format!(
                "cannot write '{}': {e}",
                weights_path.display()
            ))
        })?;

        tracing::info!("saved {} to '{}'", network.summary(), model_dir.display());
        Ok(())
    }
}
