// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and re-layout.

use crate::{DType, Shape};

/// Errors that can occur when building or reshaping a [`crate::Tensor`].
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer size does not match the expected size for the given shape and dtype.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The number of values does not match the element count of the shape.
    #[error("expected {expected} elements for shape {shape}, got {actual}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    /// A reshape was requested between shapes with different element counts.
    #[error("cannot reshape {from} into {to}")]
    IncompatibleReshape { from: Shape, to: Shape },

    /// Rank lifting was asked to shrink a tensor.
    #[error("cannot lift rank {rank} tensor to rank {target}")]
    RankTooHigh { rank: usize, target: usize },

    /// The requested data type cannot be decoded.
    #[error("unsupported dtype {dtype:?} for operation {op}")]
    UnsupportedDType { op: &'static str, dtype: DType },
}
