// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Minimal tensor types for moving trained weights between layouts.
//!
//! This crate provides:
//! - [`Tensor`]: an owned, row-major `f32` tensor.
//! - [`Shape`]: row-major shapes with rank, offset and leading-axis padding helpers.
//! - [`DType`]: element types accepted when decoding raw weight bytes.
//!
//! Tensors serialize (via `serde`) as nested arrays whose nesting depth is
//! the tensor rank, which is the form downstream JSON consumers read.

mod dtype;
mod error;
mod shape;
mod tensor;

pub use dtype::DType;
pub use error::TensorError;
pub use shape::Shape;
pub use tensor::Tensor;
