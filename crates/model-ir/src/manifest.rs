// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON model manifest parsing.
//!
//! The manifest (`model.json`) carries the source framework's layer list and
//! the order in which trained tensors appear in the flat weight list.
//!
//! # Format
//! ```json
//! {
//!   "name": "mnist-mlp",
//!   "layers": [
//!     { "class_name": "Flatten", "config": { "batch_input_shape": [null, 28, 28, 1] } },
//!     { "class_name": "Dense", "config": { "units": 10, "use_bias": true, "activation": "softmax" } }
//!   ],
//!   "weights": ["dense/kernel:0", "dense/bias:0"]
//! }
//! ```

use crate::{ModelError, SourceLayer};
use std::path::Path;

/// Top-level model manifest, deserialized from `model.json`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModelManifest {
    /// Human-readable model name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Layer configurations in graph order.
    pub layers: Vec<SourceLayer>,
    /// Trained tensor names, in flat weight-list order.
    #[serde(default)]
    pub weights: Vec<String>,
}

fn default_name() -> String {
    "model".to_string()
}

impl ModelManifest {
    /// Loads a manifest from a JSON file path.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let manifest: Self = serde_json::from_str(json)?;
        Ok(manifest)
    }

    /// Validates that the manifest is internally consistent.
    ///
    /// Checks:
    /// - At least one layer is defined.
    /// - No weight name is listed twice (each position is a distinct tensor).
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::InvalidModel("manifest contains no layers".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.weights {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::InvalidModel(format!(
                    "weight '{name}' listed more than once"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest_json() -> &'static str {
        r#"{
            "name": "conv-net",
            "layers": [
                {
                    "class_name": "Conv2D",
                    "config": {
                        "name": "conv2d_1", "filters": 8, "kernel_size": [3, 3],
                        "strides": [1, 1], "padding": "valid", "activation": "relu",
                        "use_bias": true, "batch_input_shape": [null, 28, 28, 1]
                    }
                },
                { "class_name": "MaxPooling2D", "config": { "pool_size": [2, 2], "strides": [2, 2] } },
                { "class_name": "Flatten", "config": {} },
                {
                    "class_name": "Dense",
                    "config": { "units": 10, "use_bias": true, "activation": "softmax" }
                }
            ],
            "weights": ["conv2d_1/kernel:0", "conv2d_1/bias:0", "dense_1/kernel:0", "dense_1/bias:0"]
        }"#
    }

    #[test]
    fn test_parse_manifest() {
        let m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        assert_eq!(m.name, "conv-net");
        assert_eq!(m.layers.len(), 4);
        assert_eq!(m.layers[1].class_name, "MaxPooling2D");
        assert_eq!(m.weights.len(), 4);
        m.validate().unwrap();
    }

    #[test]
    fn test_default_name_and_weights() {
        let m = ModelManifest::from_json(r#"{"layers": [{"class_name": "Flatten"}]}"#).unwrap();
        assert_eq!(m.name, "model");
        assert!(m.weights.is_empty());
    }

    #[test]
    fn test_validate_empty_layers() {
        let m = ModelManifest::from_json(r#"{"name": "e", "layers": []}"#).unwrap();
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_weights() {
        let json = r#"{"layers": [{"class_name": "Dense"}], "weights": ["w", "w"]}"#;
        let m = ModelManifest::from_json(json).unwrap();
        assert!(matches!(m.validate(), Err(ModelError::InvalidModel(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ModelManifest::from_json("{ not json"),
            Err(ModelError::ManifestParseError(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = ModelManifest::from_json(sample_manifest_json()).unwrap();
        let json = serde_json::to_string_pretty(&m).unwrap();
        let back = ModelManifest::from_json(&json).unwrap();
        assert_eq!(back.layers, m.layers);
        assert_eq!(back.weights, m.weights);
    }
}
