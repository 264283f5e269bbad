// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Conversion settings loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/mnist-mlp"
//! output_path = "./mnist-mlp.json"
//! strict_weight_count = true
//! pretty = false
//! ```

use crate::{ConvertError, Converter};
use std::path::{Path, PathBuf};

/// Configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConvertConfig {
    /// Directory holding `model.json` and `model.safetensors`.
    pub model_path: PathBuf,
    /// Where the JSON document is written.
    pub output_path: PathBuf,
    /// Fail when the layers do not consume every source weight.
    #[serde(default = "default_true")]
    pub strict_weight_count: bool,
    /// Indent the output JSON.
    #[serde(default)]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl ConvertConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConvertError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConvertError> {
        toml::from_str(toml_str)
            .map_err(|e| ConvertError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConvertError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConvertError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Builds a [`Converter`] with these settings.
    pub fn converter(&self) -> Converter {
        Converter::new()
            .strict_weight_count(self.strict_weight_count)
            .pretty(self.pretty)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./model"),
            output_path: PathBuf::from("./model.json"),
            strict_weight_count: true,
            pretty: false,
        }
    }
}
