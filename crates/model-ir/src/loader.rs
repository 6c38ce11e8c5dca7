// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model loading from manifest + SafeTensors files.
//!
//! The loader reads a model directory containing:
//! - `model.json`: the network manifest (see [`ModelManifest`]).
//! - `model.safetensors`: weights and biases.
//!
//! The weight file is memory-mapped only for the duration of
//! [`ModelLoader::load`]: every tensor the manifest references is copied into
//! an owned [`Tensor`], and the map and file handle are dropped before the
//! call returns, on success and on every error path.

use crate::network::Validated;
use crate::{DenseLayer, LayerDef, ModelError, ModelManifest, Network};
use std::collections::HashMap;
use std::path::Path;
use tensor_core::{DType, Shape, Tensor};

/// Default manifest filename.
pub(crate) const MANIFEST_FILE: &str = "model.json";

/// Default SafeTensors filename.
pub(crate) const WEIGHTS_FILE: &str = "model.safetensors";

/// Loads a model artifact from disk into a validated [`Network`].
///
/// # Example
/// ```no_run
/// use model_ir::ModelLoader;
/// use std::path::Path;
///
/// let network = ModelLoader::load(Path::new("./models/iris-mlp")).unwrap();
/// println!("Loaded {} layers", network.num_layers());
/// ```
pub struct ModelLoader;

impl ModelLoader {
    /// Loads and validates a model from the given directory.
    ///
    /// Steps:
    /// 1. Parse `model.json` and validate it.
    /// 2. Read every referenced tensor out of `model.safetensors`.
    /// 3. Build [`DenseLayer`]s, chaining widths from the input size.
    /// 4. Construct and validate the [`Network`].
    pub fn load(model_dir: &Path) -> Result<Network<Validated>, ModelError> {
        let manifest = ModelManifest::from_file(&model_dir.join(MANIFEST_FILE))?;
        manifest.validate()?;

        let tensors = Self::read_tensors(&model_dir.join(WEIGHTS_FILE), &manifest)?;

        let network = Self::from_manifest_and_tensors(&manifest, tensors)?;
        tracing::info!("loaded {} from '{}'", network.summary(), model_dir.display());
        Ok(network)
    }

    /// Builds a network from a manifest and already-decoded tensors.
    ///
    /// Useful for testing without files on disk.
    pub fn from_manifest_and_tensors(
        manifest: &ModelManifest,
        mut tensors: HashMap<String, Tensor>,
    ) -> Result<Network<Validated>, ModelError> {
        manifest.validate()?;

        let mut layers = Vec::with_capacity(manifest.layers.len());
        let mut input_units = manifest.input_size;

        for (index, ml) in manifest.layers.iter().enumerate() {
            let weight = take_tensor(&mut tensors, &ml.weight)?;
            let bias = take_tensor(&mut tensors, &ml.bias)?;

            layers.push(DenseLayer {
                def: LayerDef {
                    name: ml.name.clone(),
                    index,
                    activation: ml.parse_activation()?,
                    input_units,
                    units: ml.units,
                    weight_name: ml.weight.clone(),
                    bias_name: ml.bias.clone(),
                },
                weight,
                bias,
            });
            input_units = ml.units;
        }

        if !tensors.is_empty() {
            tracing::warn!(
                "model '{}': {} tensors in the weight file are not referenced by any layer",
                manifest.name,
                tensors.len(),
            );
        }

        Network::new(manifest.name.clone(), manifest.input_size, layers).validate()
    }

    /// Reads the tensors named in the manifest from a SafeTensors file.
    ///
    /// The file is memory-mapped; the map lives only inside this function.
    fn read_tensors(
        weights_path: &Path,
        manifest: &ModelManifest,
    ) -> Result<HashMap<String, Tensor>, ModelError> {
        let file = std::fs::File::open(weights_path).map_err(|e| {
            ModelError::SafeTensorsError(format!("cannot open '{}': {e}", weights_path.display()))
        })?;

        // SAFETY: the map is read-only and dropped before this function
        // returns; the artifact is not expected to change during the load.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| ModelError::SafeTensorsError(format!("mmap failed: {e}")))?;

        let st = safetensors::SafeTensors::deserialize(&mmap)
            .map_err(|e| ModelError::SafeTensorsError(format!("SafeTensors parse error: {e}")))?;

        let declared = manifest.parse_dtype()?;
        let mut tensors = HashMap::new();

        for name in manifest.layers.iter().flat_map(|l| [&l.weight, &l.bias]) {
            let view = st
                .tensor(name)
                .map_err(|_| ModelError::WeightNotFound { name: name.clone() })?;

            let dtype = convert_safetensor_dtype(view.dtype())?;
            if dtype != declared {
                tracing::warn!(
                    "tensor '{name}' stored as {dtype} but manifest declares {declared}"
                );
            }

            let tensor = Tensor::from_le_bytes(Shape::new(view.shape().to_vec()), dtype, view.data())
                .map_err(|e| ModelError::SafeTensorsError(format!("tensor '{name}': {e}")))?;
            tensors.insert(name.clone(), tensor);
        }

        tracing::debug!(
            "read {} tensors ({:.1} KB) from '{}'",
            tensors.len(),
            mmap.len() as f64 / 1024.0,
            weights_path.display(),
        );

        Ok(tensors)
    }
}

fn take_tensor(tensors: &mut HashMap<String, Tensor>, name: &str) -> Result<Tensor, ModelError> {
    tensors
        .remove(name)
        .ok_or_else(|| ModelError::WeightNotFound { name: name.to_string() })
}

/// Converts a SafeTensors `Dtype` to our [`DType`].
fn convert_safetensor_dtype(st_dtype: safetensors::Dtype) -> Result<DType, ModelError> {
    match st_dtype {
        safetensors::Dtype::F32 => Ok(DType::F32),
        safetensors::Dtype::F64 => Ok(DType::F64),
        other => Err(ModelError::SafeTensorsError(format!(
            "unsupported SafeTensors dtype: {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelWriter;

    fn sample_manifest() -> ModelManifest {
        ModelManifest::from_json(
            r#"{
                "name": "tiny", "format_version": 1, "input_size": 2,
                "layers": [
                    { "name": "Hidden Layer", "units": 3, "activation": "tanh",
                      "weight": "h.w", "bias": "h.b" },
                    { "name": "Output Layer", "units": 2, "activation": "softmax",
                      "weight": "o.w", "bias": "o.b" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn sample_tensors() -> HashMap<String, Tensor> {
        let mut t = HashMap::new();
        t.insert("h.w".into(), Tensor::zeros(Shape::matrix(2, 3)));
        t.insert("h.b".into(), Tensor::zeros(Shape::vector(3)));
        t.insert("o.w".into(), Tensor::zeros(Shape::matrix(3, 2)));
        t.insert("o.b".into(), Tensor::zeros(Shape::vector(2)));
        t
    }

    #[test]
    fn test_build_from_manifest_and_tensors() {
        let net = ModelLoader::from_manifest_and_tensors(&sample_manifest(), sample_tensors()).unwrap();
        assert_eq!(net.num_layers(), 2);
        assert_eq!(net.layer("Output Layer").unwrap().input_units, 3);
    }

    #[test]
    fn test_missing_tensor() {
        let mut tensors = sample_tensors();
        tensors.remove("o.b");
        let result = ModelLoader::from_manifest_and_tensors(&sample_manifest(), tensors);
        assert!(matches!(result, Err(ModelError::WeightNotFound { name }) if name == "o.b"));
    }

    #[test]
    fn test_shared_tensor_name_is_invalid_layer() {
        let mut manifest = sample_manifest();
        manifest.layers[1].bias = "h.b".into();
        let result = ModelLoader::from_manifest_and_tensors(&manifest, sample_tensors());
        assert!(matches!(result, Err(ModelError::InvalidLayer { layer, .. }) if layer == "Output Layer"));
    }

    #[test]
    fn test_wrong_weight_shape() {
        let mut tensors = sample_tensors();
        tensors.insert("o.w".into(), Tensor::zeros(Shape::matrix(4, 2)));
        let result = ModelLoader::from_manifest_and_tensors(&sample_manifest(), tensors);
        assert!(matches!(result, Err(ModelError::InvalidLayer { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let net = ModelLoader::from_manifest_and_tensors(&sample_manifest(), sample_tensors()).unwrap();
        ModelWriter::save(dir.path(), &net).unwrap();

        let loaded = ModelLoader::load(dir.path()).unwrap();
        assert_eq!(loaded.name, "tiny");
        assert_eq!(loaded.num_layers(), 2);
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelLoader::load(&dir.path().join("does-not-exist"));
        assert!(matches!(result, Err(ModelError::Io(_))));
    }

    #[test]
    fn test_load_missing_weights() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), sample_manifest().to_json().unwrap()).unwrap();
        let result = ModelLoader::load(dir.path());
        assert!(matches!(result, Err(ModelError::SafeTensorsError(_))));
    }

    #[test]
    fn test_load_corrupt_weights() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), sample_manifest().to_json().unwrap()).unwrap();
        std::fs::write(dir.path().join(WEIGHTS_FILE), b"definitely not safetensors").unwrap();
        let result = ModelLoader::load(dir.path());
        assert!(matches!(result, Err(ModelError::SafeTensorsError(_))));
    }

    #[test]
    fn test_convert_dtype() {
        assert_eq!(convert_safetensor_dtype(safetensors::Dtype::F32).unwrap(), DType::F32);
        assert_eq!(convert_safetensor_dtype(safetensors::Dtype::F64).unwrap(), DType::F64);
        assert!(convert_safetensor_dtype(safetensors::Dtype::I8).is_err());
    }
}
