// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Weight re-layout into the fixed rank-4 convention.
//!
//! Every source tensor is lifted to rank 4 by prepending size-1 axes:
//!
//! | role | source shape | target shape |
//! |---|---|---|
//! | Conv1D kernel | `(k, in, out)` | `(1, k, in, out)` |
//! | Conv2D kernel | `(kh, kw, in, out)` | unchanged |
//! | Dense kernel | `(in, out)` | `(1, 1, in, out)` |
//! | bias | `(out,)` | `(1, 1, 1, out)` |
//!
//! Values keep their row-major order, so `target[0][0][i][j] == source[i][j]`.
//!
//! The flat source list is walked with a [`WeightCursor`] owned by a single
//! conversion call; it only moves forward.

use crate::ConvertError;
use tensor_core::Tensor;

/// Rank of every tensor in the output document.
pub const TARGET_RANK: usize = 4;

/// What a source tensor is, and therefore how it must be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightRole {
    Conv1DKernel { filters: usize },
    Conv2DKernel { filters: usize },
    DenseKernel { units: usize },
    Bias { units: usize },
}

impl WeightRole {
    /// Rank the source tensor must have.
    pub fn source_rank(self) -> usize {
        match self {
            Self::Conv1DKernel { .. } => 3,
            Self::Conv2DKernel { .. } => 4,
            Self::DenseKernel { .. } => 2,
            Self::Bias { .. } => 1,
        }
    }

    /// Size of the trailing (output) axis.
    pub fn out_channels(self) -> usize {
        match self {
            Self::Conv1DKernel { filters } | Self::Conv2DKernel { filters } => filters,
            Self::DenseKernel { units } | Self::Bias { units } => units,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Conv1DKernel { .. } => "Conv1D kernel",
            Self::Conv2DKernel { .. } => "Conv2D kernel",
            Self::DenseKernel { .. } => "Dense kernel",
            Self::Bias { .. } => "bias",
        }
    }

    /// Checks `tensor` against this role and lifts it to [`TARGET_RANK`].
    ///
    /// Every value must be finite; NaN and infinities have no JSON encoding.
    pub fn reshape(self, tensor: Tensor, layer: &str) -> Result<Tensor, ConvertError> {
        let shape = tensor.shape();
        if shape.rank() != self.source_rank() || shape.last_dim() != Some(self.out_channels()) {
            return Err(ConvertError::WeightShapeMismatch {
                layer: layer.to_string(),
                role: self.label(),
                expected: format!(
                    "rank {} with trailing dimension {}",
                    self.source_rank(),
                    self.out_channels()
                ),
                actual: shape.clone(),
            });
        }
        if let Some((index, &value)) = tensor
            .values()
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ConvertError::NonFiniteWeight {
                layer: layer.to_string(),
                role: self.label(),
                index,
                value,
            });
        }
        Ok(tensor.lift_rank(TARGET_RANK)?)
    }
}

/// Reshapes the tensors consumed by one layer, pairing them with their roles.
///
/// `tensors` must hold exactly one tensor per role, as returned by
/// [`WeightCursor::take`].
pub fn reshape_layer(
    roles: &[WeightRole],
    tensors: &[Tensor],
    layer: &str,
) -> Result<Vec<Tensor>, ConvertError> {
    debug_assert_eq!(roles.len(), tensors.len());
    roles
        .iter()
        .zip(tensors)
        .map(|(role, tensor)| role.reshape(tensor.clone(), layer))
        .collect()
}

/// Forward-only position in the flat source weight list.
#[derive(Debug)]
pub struct WeightCursor<'a> {
    weights: &'a [Tensor],
    position: usize,
}

impl<'a> WeightCursor<'a> {
    pub fn new(weights: &'a [Tensor]) -> Self {
        Self {
            weights,
            position: 0,
        }
    }

    /// Number of tensors consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of tensors not yet consumed.
    pub fn remaining(&self) -> usize {
        self.weights.len() - self.position
    }

    /// Consumes the next `count` tensors.
    pub fn take(&mut self, count: usize, layer: &str) -> Result<&'a [Tensor], ConvertError> {
        if count > self.remaining() {
            return Err(ConvertError::WeightsExhausted {
                layer: layer.to_string(),
                needed: count,
                remaining: self.remaining(),
            });
        }
        let start = self.position;
        self.position += count;
        Ok(&self.weights[start..self.position])
    }

    /// Ends the traversal, returning the number of tensors consumed.
    ///
    /// With `strict`, leftover tensors are a [`ConvertError::WeightCountMismatch`];
    /// otherwise they are logged and dropped.
    pub fn finish(self, strict: bool) -> Result<usize, ConvertError> {
        let leftover = self.remaining();
        if leftover > 0 {
            if strict {
                return Err(ConvertError::WeightCountMismatch {
                    consumed: self.position,
                    available: self.weights.len(),
                });
            }
            tracing::warn!(
                "{leftover} source weight tensors were not consumed and are omitted from the document"
            );
        }
        Ok(self.position)
    }
}
