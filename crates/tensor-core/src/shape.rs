// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row-major tensor shapes.
//!
//! A [`Shape`] is just its axis lengths. Weight conversion only ever needs
//! three things from it: the element count, the trailing (output) axis, and
//! a left-padded copy with extra unit axes.

use std::fmt;

/// Axis lengths of a [`crate::Tensor`], outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// ```
    /// use tensor_core::Shape;
    /// let kernel = Shape::new(vec![3, 3, 1, 8]);
    /// assert_eq!(kernel.rank(), 4);
    /// assert_eq!(kernel.num_elements(), 72);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Rank-1 shape, e.g. a bias.
    pub fn vector(len: usize) -> Self {
        Self::new(vec![len])
    }

    /// Rank-2 shape, e.g. a dense kernel `(inputs, units)`.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self::new(vec![rows, cols])
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product of all axis lengths; 1 for rank 0.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Length of the innermost axis, or `None` for a scalar.
    pub fn last_dim(&self) -> Option<usize> {
        self.dims.last().copied()
    }

    /// Bytes needed to store this many elements of `dtype`.
    pub fn size_bytes(&self, dtype: super::DType) -> usize {
        self.num_elements() * dtype.size_bytes()
    }

    /// Returns this shape padded on the left with size-1 axes up to `rank`.
    ///
    /// Returns `None` when the shape already has more than `rank` axes.
    /// Prepending unit axes never moves an element in row-major order.
    ///
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::matrix(8, 16).with_leading_ones(4).unwrap();
    /// assert_eq!(s.dims(), &[1, 1, 8, 16]);
    /// ```
    pub fn with_leading_ones(&self, rank: usize) -> Option<Shape> {
        let pad = rank.checked_sub(self.rank())?;
        let dims = std::iter::repeat(1).take(pad).chain(self.dims.iter().copied());
        Some(Shape::new(dims.collect()))
    }

    /// Flat row-major position of `index`.
    ///
    /// `None` if the index has the wrong rank or any coordinate is out of range.
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.rank() {
            return None;
        }
        index
            .iter()
            .zip(&self.dims)
            .try_fold(0usize, |acc, (&i, &len)| (i < len).then(|| acc * len + i))
    }
}

impl fmt::Display for Shape {
    /// Tuple notation: `(1, 1, 784, 10)`, `(10,)`, `()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner: Vec<String> = self.dims.iter().map(usize::to_string).collect();
        match inner.as_slice() {
            [only] => write!(f, "({only},)"),
            _ => write!(f, "({})", inner.join(", ")),
        }
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}
