// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Source model: ordered layer configs plus the flat weight list.
//!
//! # Type-State Pattern
//!
//! ```text
//! SourceModel<Loaded>  : layers and weights read, not yet checked.
//!       │  .validate()
//!       ▼
//! SourceModel<Validated>  : non-empty, input shape declared, ready to convert.
//! ```
//!
//! The converter only accepts `SourceModel<Validated>`, so a model without a
//! declared input shape can never reach translation.

use crate::{ModelError, SourceLayer};
use std::fmt;
use tensor_core::Tensor;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: model has been loaded but not validated.
#[derive(Debug, Clone)]
pub struct Loaded;

/// Marker: model has been validated and is ready for conversion.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for model states.
pub trait ModelState: fmt::Debug + Clone {}
impl ModelState for Loaded {}
impl ModelState for Validated {}

// ── SourceModel ────────────────────────────────────────────────────

/// A trained sequential model as read from the source framework.
///
/// `weights` is positional: tensor `i` belongs to whichever layer consumes
/// position `i` when the layers are walked in order.
#[derive(Debug, Clone)]
pub struct SourceModel<S: ModelState = Loaded> {
    /// Human-readable model name.
    pub name: String,
    layers: Vec<SourceLayer>,
    weights: Vec<Tensor>,
    weight_names: Vec<String>,
    _state: std::marker::PhantomData<S>,
}

impl SourceModel<Loaded> {
    /// Creates a model with anonymous weights (named `"weight.<i>"`).
    pub fn new(name: impl Into<String>, layers: Vec<SourceLayer>, weights: Vec<Tensor>) -> Self {
        let weight_names = (0..weights.len()).map(|i| format!("weight.{i}")).collect();
        Self::with_weight_names(name, layers, weights, weight_names)
    }

    /// Creates a model whose weights carry their original tensor names.
    ///
    /// `weight_names` must be parallel to `weights`; this is checked by
    /// [`validate`](Self::validate).
    pub fn with_weight_names(
        name: impl Into<String>,
        layers: Vec<SourceLayer>,
        weights: Vec<Tensor>,
        weight_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            layers,
            weights,
            weight_names,
            _state: std::marker::PhantomData,
        }
    }

    /// Validates the model and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - At least one layer.
    /// - Every layer has a non-empty `class_name`.
    /// - The first layer declares `batch_input_shape`.
    /// - Weight names are parallel to weights.
    pub fn validate(self) -> Result<SourceModel<Validated>, ModelError> {
        let Some(first) = self.layers.first() else {
            return Err(ModelError::InvalidModel("model contains no layers".into()));
        };

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.class_name.trim().is_empty() {
                return Err(ModelError::InvalidLayer {
                    layer: layer.display_name(i),
                    detail: "empty class_name".into(),
                });
            }
        }

        if first.config.batch_input_shape.is_none() {
            return Err(ModelError::InvalidLayer {
                layer: first.display_name(0),
                detail: "first layer does not declare batch_input_shape".into(),
            });
        }

        if self.weight_names.len() != self.weights.len() {
            return Err(ModelError::InvalidModel(format!(
                "{} weight names for {} weight tensors",
                self.weight_names.len(),
                self.weights.len()
            )));
        }

        Ok(SourceModel {
            name: self.name,
            layers: self.layers,
            weights: self.weights,
            weight_names: self.weight_names,
            _state: std::marker::PhantomData,
        })
    }
}

// ── Validated state ────────────────────────────────────────────────

impl SourceModel<Validated> {
    /// Returns the declared input shape of the first layer.
    pub fn input_shape(&self) -> &[Option<usize>] {
        self.layers[0]
            .config
            .batch_input_shape
            .as_deref()
            .unwrap_or_default()
    }

    /// Total number of scalar parameters across all weights.
    pub fn total_parameters(&self) -> usize {
        self.weights.iter().map(|w| w.shape().num_elements()).sum()
    }

    /// Returns a summary string describing the model.
    pub fn summary(&self) -> String {
        format!(
            "Model '{}': {} layers, {} weight tensors, {} parameters",
            self.name,
            self.num_layers(),
            self.weights.len(),
            self.total_parameters(),
        )
    }
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: ModelState> SourceModel<S> {
    /// Returns the number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Returns the layers in graph order.
    pub fn layers(&self) -> &[SourceLayer] {
        &self.layers
    }

    /// Returns the flat, ordered weight list.
    pub fn weights(&self) -> &[Tensor] {
        &self.weights
    }

    /// Returns the original name of weight `index`.
    pub fn weight_name(&self, index: usize) -> Option<&str> {
        self.weight_names.get(index).map(String::as_str)
    }
}

impl<S: ModelState> fmt::Display for SourceModel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SourceModel '{}' ({} layers):", self.name, self.layers.len())?;
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "  [{i}] {} ({})", layer.display_name(i), layer.class_name)?;
        }
        Ok(())
    }
}
