// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Source layer configurations.
//!
//! A [`SourceLayer`] is one entry of the model-building framework's layer
//! list: a `class_name` tag plus a kind-specific `config` mapping. Only the
//! keys the converter reads are modelled in [`LayerConfig`]; everything else
//! in the mapping is ignored on deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// One layer of the source graph, exactly as the framework describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLayer {
    /// Layer kind tag (e.g., `"Conv2D"`, `"Dense"`).
    pub class_name: String,
    /// Kind-specific parameters.
    #[serde(default)]
    pub config: LayerConfig,
}

impl SourceLayer {
    /// Creates a layer from a kind tag and its config.
    pub fn new(class_name: impl Into<String>, config: LayerConfig) -> Self {
        Self {
            class_name: class_name.into(),
            config,
        }
    }

    /// Returns the configured layer name, or `"<class_name>#<index>"` when absent.
    pub fn display_name(&self, index: usize) -> String {
        match &self.config.name {
            Some(name) => name.clone(),
            None => format!("{}#{index}", self.class_name),
        }
    }
}

/// Cropping amounts: a `(begin, end)` pair for 1-D layers, or
/// `((top, bottom), (left, right))` for 2-D layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cropping {
    Pair([usize; 2]),
    Grid([[usize; 2]; 2]),
}

/// The subset of a layer's config mapping that drives translation.
///
/// Every field is optional here; which ones are required depends on the
/// layer kind and is checked by the translator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub name: Option<String>,
    pub filters: Option<usize>,
    pub units: Option<usize>,
    #[serde(deserialize_with = "one_or_many")]
    pub kernel_size: Option<Vec<usize>>,
    #[serde(deserialize_with = "one_or_many")]
    pub strides: Option<Vec<usize>>,
    #[serde(deserialize_with = "one_or_many")]
    pub pool_size: Option<Vec<usize>>,
    pub padding: Option<String>,
    pub activation: Option<String>,
    pub use_bias: Option<bool>,
    pub cropping: Option<Cropping>,
    /// Entries may be `-1` (inferred dimension).
    pub target_shape: Option<Vec<i64>>,
    pub dims: Option<Vec<usize>>,
    pub n: Option<usize>,
    /// Declared input shape; the leading batch entry is usually `null`.
    #[serde(alias = "batch_shape")]
    pub batch_input_shape: Option<Vec<Option<usize>>>,
}

/// Accepts either a bare integer or a list of integers.
fn one_or_many<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<usize>>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(usize),
        Many(Vec<usize>),
    }

    Ok(Option::<OneOrMany>::deserialize(d)?.map(|v| match v {
        OneOrMany::One(x) => vec![x],
        OneOrMany::Many(xs) => xs,
    }))
}
