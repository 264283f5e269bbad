// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kerasjson convert` command: load a model directory and write its document.

use anyhow::Context;
use converter::ConvertConfig;
use std::path::PathBuf;

pub fn execute(
    config: Option<PathBuf>,
    model: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    lenient: bool,
) -> anyhow::Result<()> {
    let config = resolve_config(config, model, output, pretty, lenient)?;
    tracing::debug!("effective config: {config:?}");

    let source = model_ir::ModelLoader::load(&config.model_path).with_context(|| {
        format!("failed to load model from '{}'", config.model_path.display())
    })?;

    let doc = config
        .converter()
        .convert_to_file(&source, &config.output_path)
        .with_context(|| format!("failed to convert '{}'", source.name))?;

    println!(
        "{} -> {} ({} descriptors, {} weights)",
        config.model_path.display(),
        config.output_path.display(),
        doc.descriptors.len(),
        doc.weights.len(),
    );
    Ok(())
}

/// Merges the optional TOML file with the command-line flags.
///
/// Flags given on the command line override the file; `--pretty` and
/// `--lenient` only switch options on.
fn resolve_config(
    config: Option<PathBuf>,
    model: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    lenient: bool,
) -> anyhow::Result<ConvertConfig> {
    let mut resolved = match config {
        Some(path) => {
            let mut file = ConvertConfig::from_file(&path)?;
            if let Some(model) = model {
                tracing::info!(
                    "--model overrides model_path '{}' from {}",
                    file.model_path.display(),
                    path.display()
                );
                file.model_path = model;
            }
            if let Some(output) = output {
                tracing::info!(
                    "--output overrides output_path '{}' from {}",
                    file.output_path.display(),
                    path.display()
                );
                file.output_path = output;
            }
            file
        }
        None => ConvertConfig {
            model_path: model.context("--model is required without --config")?,
            output_path: output.context("--output is required without --config")?,
            ..ConvertConfig::default()
        },
    };
    resolved.pretty |= pretty;
    if lenient {
        resolved.strict_weight_count = false;
    }
    Ok(resolved)
}
