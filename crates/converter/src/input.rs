// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Derives the `Input2D` descriptor from the declared input shape.
//!
//! | declared shape | height | width | channel |
//! |---|---|---|---|
//! | `(batch, h, w, c)` | `h` | `w` | `c` |
//! | `(batch, w, c)` | 1 | `w` | `c` |
//! | `(batch, c)` | 1 | 1 | `c` |
//!
//! An unspecified batch becomes 1.

use crate::{ConvertError, TargetDescriptor};

/// Resolves a declared `batch_input_shape` into an `Input2D` descriptor.
pub fn resolve_input(shape: &[Option<usize>]) -> Result<TargetDescriptor, ConvertError> {
    let dim = |i: usize| {
        shape[i].ok_or_else(|| ConvertError::UnsupportedInputShape {
            shape: shape.to_vec(),
            reason: "only the batch dimension may be unspecified",
        })
    };

    let (height, width, channel) = match shape.len() {
        4 => (dim(1)?, dim(2)?, dim(3)?),
        3 => (1, dim(1)?, dim(2)?),
        2 => (1, 1, dim(1)?),
        _ => {
            return Err(ConvertError::UnsupportedInputShape {
                shape: shape.to_vec(),
                reason: "expected 2, 3 or 4 dimensions",
            })
        }
    };

    Ok(TargetDescriptor::Input2D {
        height,
        width,
        channel,
        batch: shape[0].unwrap_or(1),
    })
}
