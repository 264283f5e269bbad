// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model conversion.
//!
//! Every variant is fatal: conversion stops at the first error and no
//! document is produced.

use tensor_core::Shape;

/// Errors that can occur while converting a source model.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The layer's `class_name` is not one of the supported kinds.
    #[error("unsupported layer kind '{kind}' (layer '{layer}')")]
    UnsupportedLayerKind { kind: String, layer: String },

    /// The activation name is not one of the supported activations.
    #[error("unsupported activation '{activation}' in layer '{layer}'")]
    UnsupportedActivation { layer: String, activation: String },

    /// The declared input shape cannot be mapped onto an `Input2D` descriptor.
    #[error("unsupported input shape {shape:?}: {reason}")]
    UnsupportedInputShape {
        shape: Vec<Option<usize>>,
        reason: &'static str,
    },

    /// The traversal did not consume exactly the source weight list.
    #[error("weight count mismatch: consumed {consumed} of {available} source tensors")]
    WeightCountMismatch { consumed: usize, available: usize },

    /// A layer needs more tensors than remain in the source weight list.
    #[error("layer '{layer}' needs {needed} weight tensors, only {remaining} remain")]
    WeightsExhausted {
        layer: String,
        needed: usize,
        remaining: usize,
    },

    /// A source tensor does not have the shape its role requires.
    #[error("layer '{layer}': {role} expects {expected}, got shape {actual}")]
    WeightShapeMismatch {
        layer: String,
        role: &'static str,
        expected: String,
        actual: Shape,
    },

    /// A source tensor holds NaN or an infinity, which JSON cannot carry.
    #[error("layer '{layer}': {role} has non-finite value {value} at flat index {index}")]
    NonFiniteWeight {
        layer: String,
        role: &'static str,
        index: usize,
        value: f32,
    },

    /// A config key required by the layer kind is absent.
    #[error("layer '{layer}' is missing required config key '{field}'")]
    MissingField { layer: String, field: &'static str },

    /// A config value is present but unusable.
    #[error("layer '{layer}': {detail}")]
    InvalidParameter { layer: String, detail: String },

    /// The assembled document violates a structural invariant.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A tensor re-layout failed.
    #[error("tensor error: {0}")]
    TensorError(#[from] tensor_core::TensorError),

    /// Loading the source model failed.
    #[error("model error: {0}")]
    ModelError(#[from] model_ir::ModelError),

    /// Writing the output document failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Encoding the output document failed.
    #[error("JSON encoding failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
