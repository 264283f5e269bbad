// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-ir
//!
//! Read-only view of a trained sequential model as its source framework
//! describes it:
//!
//! - [`SourceLayer`] / [`LayerConfig`]: one layer's `class_name` and config mapping.
//! - [`SourceModel`]: the ordered layers plus the flat, positional weight list,
//!   with a **type-state pattern** (`Loaded` → `Validated`).
//! - [`ModelLoader`]: loads models from a JSON manifest + SafeTensors weight file.
//! - [`ModelManifest`]: the JSON model descriptor.
//!
//! # Supported Model Format
//! A model is stored as:
//! - `model.json`: layer configs and the weight order.
//! - `model.safetensors`: weights in HuggingFace SafeTensors format (f32 or f64).
//!
//! # Example
//! ```no_run
//! use model_ir::ModelLoader;
//! use std::path::Path;
//!
//! let model = ModelLoader::load(Path::new("./models/mnist-mlp")).unwrap();
//! println!("{}", model.summary());
//! for layer in model.layers() {
//!     println!("  {}", layer.class_name);
//! }
//! ```

mod error;
mod layer;
mod loader;
mod manifest;
pub mod model;

pub use error::ModelError;
pub use layer::{Cropping, LayerConfig, SourceLayer};
pub use loader::{ModelLoader, MANIFEST_FILE, WEIGHTS_FILE};
pub use manifest::ModelManifest;
pub use model::SourceModel;
