// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for model conversion and document encoding.

use converter::Converter;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use model_ir::{model::Validated, SourceLayer, SourceModel};
use serde_json::json;
use tensor_core::{Shape, Tensor};

/// An MLP over a flattened 28x28 input with `hidden` units per layer.
fn mlp(hidden: usize, depth: usize) -> SourceModel<Validated> {
    let layer = |class: &str, config: serde_json::Value| -> SourceLayer {
        serde_json::from_value(json!({ "class_name": class, "config": config })).unwrap()
    };
    let filled = |dims: &[usize]| {
        let shape = Shape::from(dims);
        let n = shape.num_elements();
        Tensor::from_f32(shape, (0..n).map(|i| (i % 97) as f32 * 0.01).collect()).unwrap()
    };

    let mut layers = vec![
        layer("InputLayer", json!({"batch_input_shape": [null, 28, 28, 1]})),
        layer("Flatten", json!({})),
    ];
    let mut weights = Vec::new();
    let mut fan_in = 784;
    for _ in 0..depth {
        layers.push(layer(
            "Dense",
            json!({"units": hidden, "use_bias": true, "activation": "relu"}),
        ));
        weights.push(filled(&[fan_in, hidden]));
        weights.push(filled(&[hidden]));
        fan_in = hidden;
    }
    SourceModel::new("bench-mlp", layers, weights).validate().unwrap()
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    for hidden in [32, 128, 512] {
        let model = mlp(hidden, 3);
        group.bench_with_input(BenchmarkId::from_parameter(hidden), &model, |b, m| {
            b.iter(|| Converter::new().convert(m).unwrap())
        });
    }
    group.finish();
}

fn bench_to_json(c: &mut Criterion) {
    let doc = Converter::new().convert(&mlp(128, 3)).unwrap();
    c.bench_function("to_json/compact", |b| b.iter(|| doc.to_json(false).unwrap()));
    c.bench_function("to_json/pretty", |b| b.iter(|| doc.to_json(true).unwrap()));
}

criterion_group!(benches, bench_convert, bench_to_json);
criterion_main!(benches);
