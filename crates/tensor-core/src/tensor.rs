// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned tensor type and its nested-array serialization.

use crate::{DType, Shape, TensorError};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// An owned, n-dimensional `f32` tensor stored in contiguous memory.
///
/// # Memory Layout
/// Values are stored in row-major (C) order. Reshaping only rewrites the
/// shape; the value buffer is moved, never copied or permuted.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor from `f32` values in row-major order.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::from_f32(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.values(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_f32(shape: Shape, values: Vec<f32>) -> Result<Self, TensorError> {
        let expected = shape.num_elements();
        if values.len() != expected {
            return Err(TensorError::ElementCountMismatch {
                shape,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            shape,
            data: values,
        })
    }

    /// Decodes a tensor from little-endian bytes of the given element type.
    ///
    /// `F64` values are narrowed to `f32`.
    pub fn from_le_bytes(shape: Shape, dtype: DType, bytes: &[u8]) -> Result<Self, TensorError> {
        let expected = shape.size_bytes(dtype);
        if bytes.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let data: Vec<f32> = match dtype {
            DType::F32 => bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            DType::F64 => bytes
                .chunks_exact(8)
                .map(|c| {
                    f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f32
                })
                .collect(),
        };
        Ok(Self { shape, data })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor rank.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the values in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Returns the element at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        self.shape.offset(index).map(|o| self.data[o])
    }

    /// Reinterprets the tensor under a new shape with the same element count.
    pub fn reshape(self, shape: Shape) -> Result<Self, TensorError> {
        if shape.num_elements() != self.shape.num_elements() {
            return Err(TensorError::IncompatibleReshape {
                from: self.shape,
                to: shape,
            });
        }
        Ok(Self {
            shape,
            data: self.data,
        })
    }

    /// Inserts leading size-1 axes until the tensor has rank `rank`.
    ///
    /// A tensor already at `rank` is returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let bias = Tensor::from_f32(Shape::vector(2), vec![0.5, -0.5]).unwrap();
    /// let lifted = bias.lift_rank(4).unwrap();
    /// assert_eq!(lifted.shape().dims(), &[1, 1, 1, 2]);
    /// assert_eq!(lifted.get(&[0, 0, 0, 1]), Some(-0.5));
    /// ```
    pub fn lift_rank(self, rank: usize) -> Result<Self, TensorError> {
        let shape = self
            .shape
            .with_leading_ones(rank)
            .ok_or(TensorError::RankTooHigh {
                rank: self.rank(),
                target: rank,
            })?;
        self.reshape(shape)
    }
}

/// Serializes as nested sequences, one nesting level per axis.
impl Serialize for Tensor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Nested {
            dims: self.shape.dims(),
            data: &self.data,
        }
        .serialize(serializer)
    }
}

/// A row-major sub-block of a tensor: `data` holds exactly `product(dims)` values.
struct Nested<'a> {
    dims: &'a [usize],
    data: &'a [f32],
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some((&outer, inner_dims)) = self.dims.split_first() else {
            return serializer.serialize_f32(self.data[0]);
        };
        let inner: usize = inner_dims.iter().product();
        let mut seq = serializer.serialize_seq(Some(outer))?;
        for i in 0..outer {
            seq.serialize_element(&Nested {
                dims: inner_dims,
                data: &self.data[i * inner..(i + 1) * inner],
            })?;
        }
        seq.end()
    }
}
