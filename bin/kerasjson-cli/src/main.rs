// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # kerasjson
//!
//! Command-line interface for converting sequential models into the flat
//! JSON inference format.
//!
//! ## Usage
//! ```bash
//! # Convert a model directory
//! kerasjson convert --model ./models/mnist-mlp --output mnist-mlp.json --pretty
//!
//! # Same, with settings from a TOML file
//! kerasjson --config convert.toml convert
//!
//! # Show how each layer will be translated
//! kerasjson inspect --model ./models/mnist-mlp
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kerasjson",
    about = "Convert sequential models into flat rank-4 JSON inference documents",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file; `--model`/`--output` take precedence over it.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a model directory into a JSON document.
    Convert {
        /// Path to the model directory (model.json + model.safetensors).
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output JSON file; overwritten if it exists.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the output JSON.
        #[arg(long)]
        pretty: bool,

        /// Drop unconsumed trailing weights with a warning instead of failing.
        #[arg(long)]
        lenient: bool,
    },

    /// Inspect a model: print each layer and the descriptors it maps to.
    Inspect {
        /// Path to the model directory.
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            model,
            output,
            pretty,
            lenient,
        } => commands::convert::execute(cli.config, model, output, pretty, lenient),
        Commands::Inspect { model } => commands::inspect::execute(model),
    }
}
