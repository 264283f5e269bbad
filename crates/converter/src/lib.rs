// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # converter
//!
//! Translates a trained sequential model into the simplified JSON format read
//! by the embedded inference engine.
//!
//! - [`translate_layer`]: maps one source layer onto target descriptors.
//! - [`WeightRole`] / [`WeightCursor`]: lifts source weights to rank 4 and
//!   walks the flat weight list in step with the layers.
//! - [`Document`]: the output `{model_type, descriptors, weights}` object.
//! - [`Converter`]: the full pass over a validated [`SourceModel`](model_ir::SourceModel).
//! - [`ConvertConfig`]: TOML-backed settings.
//!
//! # Example
//! ```no_run
//! use converter::Converter;
//! use model_ir::ModelLoader;
//! use std::path::Path;
//!
//! let model = ModelLoader::load(Path::new("./models/mnist-mlp")).unwrap();
//! let doc = Converter::new().pretty(true)
//!     .convert_to_file(&model, Path::new("mnist-mlp.json"))
//!     .unwrap();
//! println!("{}", doc.summary());
//! ```

mod activation;
mod config;
mod descriptor;
mod document;
mod error;
mod input;
mod pipeline;
mod reshape;
mod translate;

pub use activation::{activation_descriptor, supported_activations, IDENTITY};
pub use config::ConvertConfig;
pub use descriptor::TargetDescriptor;
pub use document::{Document, DocumentBuilder, ModelType};
pub use error::ConvertError;
pub use input::resolve_input;
pub use pipeline::{convert, Converter};
pub use reshape::{reshape_layer, WeightCursor, WeightRole, TARGET_RANK};
pub use translate::{translate_layer, LayerKind, LayerPlan};
