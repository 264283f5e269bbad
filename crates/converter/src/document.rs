// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The output document and its assembly.
//!
//! ```json
//! {
//!   "model_type": "Sequential",
//!   "descriptors": [ {"layer": "Input2D", ...}, ... ],
//!   "weights": [ [[[[...]]]], ... ]
//! }
//! ```
//!
//! `weights[k]` belongs to the k-th weight-owning descriptor, in descriptor
//! order. Every weight is a rank-4 nested array.

use crate::reshape::TARGET_RANK;
use crate::{ConvertError, TargetDescriptor};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tensor_core::Tensor;

/// Model topology tag. Only sequential models exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelType {
    Sequential,
}

/// A converted model, ready to be written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub model_type: ModelType,
    pub descriptors: Vec<TargetDescriptor>,
    pub weights: Vec<Tensor>,
}

impl Document {
    /// Number of weight entries the descriptors call for.
    pub fn expected_weight_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.owns_weights()).count()
    }

    /// Checks the structural invariants of the document.
    pub fn validate(&self) -> Result<(), ConvertError> {
        match self.descriptors.first() {
            Some(TargetDescriptor::Input2D { .. }) => {}
            Some(other) => {
                return Err(ConvertError::InvalidDocument(format!(
                    "first descriptor must be Input2D, found {other}"
                )))
            }
            None => return Err(ConvertError::InvalidDocument("no descriptors".into())),
        }

        if let Some(pos) = self
            .descriptors
            .iter()
            .skip(1)
            .position(|d| matches!(d, TargetDescriptor::Input2D { .. }))
        {
            return Err(ConvertError::InvalidDocument(format!(
                "Input2D repeated at position {}",
                pos + 1
            )));
        }

        let expected = self.expected_weight_count();
        if self.weights.len() != expected {
            return Err(ConvertError::InvalidDocument(format!(
                "{} weight entries for {expected} weight-owning descriptors",
                self.weights.len()
            )));
        }

        if let Some((i, w)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| w.rank() != TARGET_RANK)
        {
            return Err(ConvertError::InvalidDocument(format!(
                "weight {i} has shape {}, expected rank {TARGET_RANK}",
                w.shape()
            )));
        }

        Ok(())
    }

    /// Encodes the document as JSON text.
    pub fn to_json(&self, pretty: bool) -> Result<String, ConvertError> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Writes the document to `path`, replacing any existing file.
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over `path`, so `path` never holds a partial document.
    pub fn write_to(&self, path: &Path, pretty: bool) -> Result<(), ConvertError> {
        let text = self.to_json(pretty)?;
        let tmp = staging_path(path);
        if let Err(e) = std::fs::write(&tmp, text).and_then(|()| std::fs::rename(&tmp, path)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::info!("wrote {} to {}", self.summary(), path.display());
        Ok(())
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "{:?} document: {} descriptors, {} weights",
            self.model_type,
            self.descriptors.len(),
            self.weights.len()
        )
    }
}

/// `<dir>/.<file name>.<pid>.tmp`, next to `path` so the rename stays on one filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.json".into());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Accumulates descriptors and weights layer by layer.
#[derive(Debug)]
pub struct DocumentBuilder {
    descriptors: Vec<TargetDescriptor>,
    weights: Vec<Tensor>,
}

impl DocumentBuilder {
    /// Starts a document with its `Input2D` descriptor.
    pub fn new(input: TargetDescriptor) -> Self {
        Self {
            descriptors: vec![input],
            weights: Vec::new(),
        }
    }

    /// Appends one layer's descriptors and its reshaped weights.
    pub fn push_layer(
        &mut self,
        descriptors: impl IntoIterator<Item = TargetDescriptor>,
        weights: impl IntoIterator<Item = Tensor>,
    ) {
        self.descriptors.extend(descriptors);
        self.weights.extend(weights);
    }

    pub fn num_descriptors(&self) -> usize {
        self.descriptors.len()
    }

    /// Seals the document after checking its invariants.
    pub fn finish(self) -> Result<Document, ConvertError> {
        let doc = Document {
            model_type: ModelType::Sequential,
            descriptors: self.descriptors,
            weights: self.weights,
        };
        doc.validate()?;
        Ok(doc)
    }
}
