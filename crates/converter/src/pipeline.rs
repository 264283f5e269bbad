// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The conversion pass.
//!
//! ```text
//! SourceModel<Validated>
//!     │  resolve_input(first layer)         → Input2D
//!     │  for each layer:
//!     │      translate_layer                → LayerPlan
//!     │      cursor.take(plan.weight_count) → source tensors
//!     │      reshape_layer                  → rank-4 tensors
//!     │  cursor.finish(strict)
//!     ▼
//!   Document
//! ```
//!
//! One [`WeightCursor`] per call; nothing is shared between conversions.

use crate::document::{Document, DocumentBuilder};
use crate::input::resolve_input;
use crate::reshape::{reshape_layer, WeightCursor};
use crate::translate::translate_layer;
use crate::ConvertError;
use model_ir::model::Validated;
use model_ir::SourceModel;
use std::path::Path;
use std::time::Instant;

/// Converts validated source models into [`Document`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    strict_weight_count: bool,
    pretty: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            strict_weight_count: true,
            pretty: false,
        }
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `false`, unconsumed trailing weights are logged and dropped
    /// instead of failing the conversion.
    pub fn strict_weight_count(mut self, strict: bool) -> Self {
        self.strict_weight_count = strict;
        self
    }

    /// Indent the JSON written by [`Converter::convert_to_file`].
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict_weight_count
    }

    /// Converts `model` into a document.
    pub fn convert(&self, model: &SourceModel<Validated>) -> Result<Document, ConvertError> {
        let start = Instant::now();
        tracing::info!("converting {}", model.summary());

        let mut builder = DocumentBuilder::new(resolve_input(model.input_shape())?);
        let mut cursor = WeightCursor::new(model.weights());

        for (index, layer) in model.layers().iter().enumerate() {
            let name = layer.display_name(index);
            let plan = translate_layer(layer, index)?;
            let sources = cursor.take(plan.weight_count(), &name)?;
            let weights = reshape_layer(&plan.weights, sources, &name)?;

            tracing::debug!(
                "layer {index} '{name}' ({}) -> [{}], {} weights",
                layer.class_name,
                plan.descriptors
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>()
                    .join(", "),
                weights.len()
            );
            builder.push_layer(plan.descriptors, weights);
        }

        let consumed = cursor.finish(self.strict_weight_count)?;
        let doc = builder.finish()?;

        tracing::info!(
            "{} ({consumed} source tensors consumed) in {:.2?}",
            doc.summary(),
            start.elapsed()
        );
        Ok(doc)
    }

    /// Converts `model` and writes the document to `path`.
    ///
    /// On any conversion error the file is left untouched.
    pub fn convert_to_file(
        &self,
        model: &SourceModel<Validated>,
        path: &Path,
    ) -> Result<Document, ConvertError> {
        let doc = self.convert(model)?;
        doc.write_to(path, self.pretty)?;
        Ok(doc)
    }
}

/// Converts `model` with the default (strict) settings.
pub fn convert(model: &SourceModel<Validated>) -> Result<Document, ConvertError> {
    Converter::default().convert(model)
}
