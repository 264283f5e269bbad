// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kerasjson inspect` command: display the layer-by-layer translation.
//!
//! Loads the model and prints, for each layer, the target descriptors it
//! would produce and the source tensors it consumes. Untranslatable layers
//! are reported inline rather than aborting the listing.

use converter::{resolve_input, translate_layer};
use std::path::PathBuf;

pub fn execute(model: PathBuf) -> anyhow::Result<()> {
    let source = model_ir::ModelLoader::load(&model).map_err(|e| {
        anyhow::anyhow!("failed to load model from '{}': {e}", model.display())
    })?;

    // ── Summary ────────────────────────────────────────────────
    println!("  {}", source.summary());
    match resolve_input(source.input_shape()) {
        Ok(input) => println!("  Input: {}", serde_json::to_string(&input)?),
        Err(e) => println!("  Input: ERROR {e}"),
    }
    println!();

    // ── Per-Layer Detail ───────────────────────────────────────
    println!(
        "  {:<4} {:<24} {:<20} {:<4} {}",
        "Idx", "Name", "Class", "#W", "Descriptors",
    );
    println!("  {}", "-".repeat(82));

    let mut next_weight = 0;
    for (i, layer) in source.layers().iter().enumerate() {
        let name = layer.display_name(i);
        match translate_layer(layer, i) {
            Ok(plan) => {
                let tags: Vec<_> = plan.descriptors.iter().map(|d| d.name()).collect();
                println!(
                    "  {:<4} {:<24} {:<20} {:<4} {}",
                    i,
                    truncate(&name, 24),
                    layer.class_name,
                    plan.weight_count(),
                    tags.join(", "),
                );
                for role in &plan.weights {
                    let shape = source
                        .weights()
                        .get(next_weight)
                        .map(|t| t.shape().to_string())
                        .unwrap_or_else(|| "<missing>".into());
                    println!(
                        "  {:<4} {:<24} {} {}",
                        "",
                        source.weight_name(next_weight).unwrap_or("?"),
                        role.label(),
                        shape,
                    );
                    next_weight += 1;
                }
            }
            Err(e) => println!(
                "  {:<4} {:<24} {:<20} {:<4} ERROR {e}",
                i,
                truncate(&name, 24),
                layer.class_name,
                "-",
            ),
        }
    }

    if next_weight != source.weights().len() {
        println!();
        println!(
            "  Warning: layers consume {next_weight} of {} source tensors",
            source.weights().len()
        );
    }
    println!();
    Ok(())
}

/// Truncates a string to `max_len` with ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
