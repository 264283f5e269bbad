// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Activation name lookup shared by every layer kind that carries one.

use crate::{ConvertError, TargetDescriptor};

/// Name of the identity activation; it emits no descriptor.
pub const IDENTITY: &str = "linear";

/// Exact-match table from source activation name to target descriptor.
const ACTIVATIONS: &[(&str, TargetDescriptor)] = &[
    ("relu", TargetDescriptor::ReLu),
    ("softmax", TargetDescriptor::Softmax),
    ("elu", TargetDescriptor::ELu),
    ("hard_sigmoid", TargetDescriptor::HardSigmoid),
    ("sigmoid", TargetDescriptor::Sigmoid),
    ("softplus", TargetDescriptor::SoftPlus),
    ("softsign", TargetDescriptor::SoftSign),
    ("tanh", TargetDescriptor::TanH),
];

/// Maps an activation name to at most one descriptor.
///
/// `"linear"` yields `None`; any name outside the table is an
/// [`ConvertError::UnsupportedActivation`] attributed to `layer`.
pub fn activation_descriptor(
    name: &str,
    layer: &str,
) -> Result<Option<TargetDescriptor>, ConvertError> {
    if name == IDENTITY {
        return Ok(None);
    }
    ACTIVATIONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, descriptor)| Some(descriptor.clone()))
        .ok_or_else(|| ConvertError::UnsupportedActivation {
            layer: layer.to_string(),
            activation: name.to_string(),
        })
}

/// Returns the supported activation names, identity included.
pub fn supported_activations() -> impl Iterator<Item = &'static str> {
    std::iter::once(IDENTITY).chain(ACTIVATIONS.iter().map(|(name, _)| *name))
}
