// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model loading from manifest + SafeTensors files.
//!
//! The loader reads a model directory containing:
//! - `model.json`: the layer list and weight order (see [`ModelManifest`]).
//! - `model.safetensors`: the trained tensors, keyed by the manifest's weight names.
//!
//! Tensors are read in manifest order, which becomes the positional order of
//! the flat weight list. The SafeTensors file is optional when the manifest
//! lists no weights.

use crate::model::Validated;
use crate::{ModelError, ModelManifest, SourceModel};
use std::collections::HashMap;
use std::path::Path;
use tensor_core::{DType, Shape, Tensor};

/// Default manifest filename.
pub const MANIFEST_FILE: &str = "model.json";

/// Default SafeTensors filename.
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// Loads a source model from disk into a validated [`SourceModel`].
///
/// # Example
/// ```no_run
/// use model_ir::ModelLoader;
/// use std::path::Path;
///
/// let model = ModelLoader::load(Path::new("./models/mnist-mlp")).unwrap();
/// println!("{}", model.summary());
/// ```
pub struct ModelLoader;

impl ModelLoader {
    /// Loads and validates a model from the given directory.
    ///
    /// Steps:
    /// 1. Parse `model.json` and validate it.
    /// 2. Memory-map `model.safetensors` and decode each listed tensor.
    /// 3. Build and validate the [`SourceModel`].
    pub fn load(model_dir: &Path) -> Result<SourceModel<Validated>, ModelError> {
        let manifest = ModelManifest::from_file(&model_dir.join(MANIFEST_FILE))?;
        manifest.validate()?;

        let weights = if manifest.weights.is_empty() {
            HashMap::new()
        } else {
            Self::read_weights(&model_dir.join(WEIGHTS_FILE), &manifest.weights)?
        };

        Self::from_manifest_and_weights(&manifest, weights)
    }

    /// Builds a model from a manifest and pre-decoded tensors keyed by name.
    ///
    /// Useful for testing and for callers that obtain tensors elsewhere.
    pub fn from_manifest_and_weights(
        manifest: &ModelManifest,
        mut weights: HashMap<String, Tensor>,
    ) -> Result<SourceModel<Validated>, ModelError> {
        manifest.validate()?;

        let mut ordered = Vec::with_capacity(manifest.weights.len());
        for name in &manifest.weights {
            let tensor = weights
                .remove(name)
                .ok_or_else(|| ModelError::WeightNotFound { name: name.clone() })?;
            ordered.push(tensor);
        }

        if !weights.is_empty() {
            tracing::warn!(
                "{} tensors present but not listed in the manifest are ignored",
                weights.len()
            );
        }

        SourceModel::with_weight_names(
            manifest.name.clone(),
            manifest.layers.clone(),
            ordered,
            manifest.weights.clone(),
        )
        .validate()
    }

    /// Decodes the named tensors from a SafeTensors file.
    fn read_weights(path: &Path, names: &[String]) -> Result<HashMap<String, Tensor>, ModelError> {
        let file = std::fs::File::open(path).map_err(|e| {
            ModelError::SafeTensorsError(format!("cannot open '{}': {e}", path.display()))
        })?;

        // SAFETY: the map is read-only and dropped before this function returns.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| ModelError::SafeTensorsError(format!("mmap failed: {e}")))?;

        let st = safetensors::SafeTensors::deserialize(&mmap)
            .map_err(|e| ModelError::SafeTensorsError(format!("SafeTensors parse error: {e}")))?;

        let mut weights = HashMap::with_capacity(names.len());
        for name in names {
            let view = st
                .tensor(name)
                .map_err(|_| ModelError::WeightNotFound { name: name.clone() })?;
            let dtype = convert_safetensor_dtype(view.dtype())?;
            let tensor = Tensor::from_le_bytes(Shape::from(view.shape()), dtype, view.data())
                .map_err(|source| ModelError::TensorError {
                    name: name.clone(),
                    source,
                })?;
            tracing::debug!("loaded weight '{name}' {}", tensor.shape());
            weights.insert(name.clone(), tensor);
        }

        tracing::info!(
            "read {} tensors from {} ({:.2} MB)",
            weights.len(),
            path.display(),
            mmap.len() as f64 / (1024.0 * 1024.0),
        );

        Ok(weights)
    }
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
    use safetensors::tensor::TensorView;
    use std::path::PathBuf;

    fn sample_manifest() -> ModelManifest {
        ModelManifest::from_json(
            r#"{
                "name": "tiny",
                "layers": [
                    { "class_name": "Dense", "config": {
                        "units": 2, "use_bias": true, "activation": "relu",
                        "batch_input_shape": [null, 3] } }
                ],
                "weights": ["dense/kernel:0", "dense/bias:0"]
            }"#,
        )
        .unwrap()
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("model_ir_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn le_bytes_f32(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_from_manifest_and_weights_orders_by_manifest() {
        let mut weights = HashMap::new();
        weights.insert(
            "dense/bias:0".to_string(),
            Tensor::from_f32(Shape::vector(2), vec![1.0, 2.0]).unwrap(),
        );
        weights.insert(
            "dense/kernel:0".to_string(),
            Tensor::from_f32(Shape::matrix(3, 2), vec![0.0; 6]).unwrap(),
        );

        let model = ModelLoader::from_manifest_and_weights(&sample_manifest(), weights).unwrap();
        assert_eq!(model.weights().len(), 2);
        assert_eq!(model.weights()[0].shape(), &Shape::matrix(3, 2));
        assert_eq!(model.weights()[1].shape(), &Shape::vector(2));
        assert_eq!(model.weight_name(1), Some("dense/bias:0"));
    }

    #[test]
    fn test_missing_weight_tensor() {
        let result = ModelLoader::from_manifest_and_weights(&sample_manifest(), HashMap::new());
        assert!(matches!(result, Err(ModelError::WeightNotFound { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = scratch_dir("load");
        let manifest = sample_manifest();
        std::fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_string(&manifest).unwrap(),
        )
        .unwrap();

        let kernel = le_bytes_f32(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let bias: Vec<u8> = [1.0f64, -1.0].iter().flat_map(|v| v.to_le_bytes()).collect();
        let views = vec![
            (
                "dense/kernel:0".to_string(),
                TensorView::new(safetensors::Dtype::F32, vec![3, 2], &kernel).unwrap(),
            ),
            (
                "dense/bias:0".to_string(),
                TensorView::new(safetensors::Dtype::F64, vec![2], &bias).unwrap(),
            ),
        ];
        let bytes = safetensors::serialize(views.iter().map(|(n, v)| (n.clone(), v)), &None).unwrap();
        std::fs::write(dir.join(WEIGHTS_FILE), bytes).unwrap();

        let model = ModelLoader::load(&dir).unwrap();
        assert_eq!(model.name, "tiny");
        assert_eq!(model.weights()[0].get(&[2, 1]), Some(0.6));
        assert_eq!(model.weights()[1].values(), &[1.0, -1.0]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_without_weights_file() {
        let dir = scratch_dir("noweights");
        std::fs::write(
            dir.join(MANIFEST_FILE),
            r#"{"layers": [{"class_name": "Flatten", "config": {"batch_input_shape": [null, 4, 4, 1]}}]}"#,
        )
        .unwrap();
        std::fs::remove_file(dir.join(WEIGHTS_FILE)).ok();

        let model = ModelLoader::load(&dir).unwrap();
        assert!(model.weights().is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = scratch_dir("nomanifest");
        std::fs::remove_file(dir.join(MANIFEST_FILE)).ok();
        assert!(matches!(
            ModelLoader::load(&dir),
            Err(ModelError::ManifestReadError(_))
        ));
    }

    #[test]
    fn test_unsupported_dtype() {
        assert!(convert_safetensor_dtype(safetensors::Dtype::I8).is_err());
        assert_eq!(convert_safetensor_dtype(safetensors::Dtype::F64).unwrap(), DType::F64);
    }
}
