// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: Convert a small in-memory MNIST classifier and print its document.
//!
//! Builds the model programmatically, so no files are needed:
//!
//! ```bash
//! cargo run -p converter --example mnist_mlp
//! ```

use converter::{translate_layer, Converter};
use model_ir::{SourceLayer, SourceModel};
use serde_json::json;
use tensor_core::{Shape, Tensor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let layers: Vec<SourceLayer> = serde_json::from_value(json!([
        {"class_name": "InputLayer", "config": {"batch_input_shape": [null, 28, 28, 1]}},
        {"class_name": "Flatten", "config": {"name": "flatten"}},
        {"class_name": "Dense", "config": {
            "name": "hidden", "units": 16, "use_bias": true, "activation": "relu"}},
        {"class_name": "Dense", "config": {
            "name": "logits", "units": 10, "use_bias": true, "activation": "softmax"}}
    ]))?;

    let weights = vec![
        Tensor::from_f32(Shape::matrix(784, 16), vec![0.01; 784 * 16])?,
        Tensor::from_f32(Shape::vector(16), vec![0.0; 16])?,
        Tensor::from_f32(Shape::matrix(16, 10), vec![0.1; 160])?,
        Tensor::from_f32(Shape::vector(10), vec![0.0; 10])?,
    ];

    let model = SourceModel::new("mnist-mlp", layers, weights).validate()?;
    println!("{}\n", model.summary());

    println!("{:<4} {:<12} {:<12} {}", "#", "Layer", "Class", "Descriptors");
    println!("{}", "-".repeat(60));
    for (i, layer) in model.layers().iter().enumerate() {
        let plan = translate_layer(layer, i)?;
        let tags: Vec<_> = plan.descriptors.iter().map(|d| d.name()).collect();
        println!(
            "{:<4} {:<12} {:<12} {}",
            i,
            layer.display_name(i),
            layer.class_name,
            tags.join(", ")
        );
    }

    let doc = Converter::new().convert(&model)?;
    println!("\n{}", doc.summary());
    println!("{}", serde_json::to_string_pretty(&doc.descriptors)?);
    for (i, w) in doc.weights.iter().enumerate() {
        println!("  weight {i}: {}", w.shape());
    }

    Ok(())
}
