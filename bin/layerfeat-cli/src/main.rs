// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # layerfeat
//!
//! Command-line interface for layer-activation feature extraction.
//!
//! ## Usage
//! ```bash
//! # Replace every record of a CSV file with a hidden layer's activations
//! layerfeat transform --model ./models/iris-mlp --layer "Hidden Layer" \
//!     --input iris.csv --output iris-hidden.csv --class species
//!
//! # Inspect model structure
//! layerfeat inspect --model ./models/iris-mlp
//!
//! # Write a demo model and dataset to try the other commands on
//! layerfeat sample --output ./demo
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "layerfeat",
    about = "Turns datasets into the activations of a trained network's layer",
    version,
    author
)]
struct Cli {
    /// Path to a TOML filter configuration; command-line options override it.
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
    /// Transform a CSV dataset into layer activations.
    Transform {
        /// Path to the model directory.
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Name of the layer whose outputs become the new attributes.
        #[arg(short, long)]
        layer: Option<String>,

        /// Input CSV file (header row required).
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file.
        #[arg(short, long)]
        output: PathBuf,

        /// Column to carry through unchanged as the class attribute.
        #[arg(long)]
        class: Option<String>,

        /// Records per forward pass.
        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Inspect a model: print its layers, widths, and activations.
    Inspect {
        /// Path to the model directory.
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Write a small demo model and a matching labelled CSV dataset.
    Sample {
        /// Directory to write `model/` and `points.csv` into.
        #[arg(short, long)]
        output: PathBuf,

        /// Number of records to generate.
        #[arg(short = 'n', long, default_value_t = 150)]
        records: usize,

        /// Seed for the deterministic generator.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Transform {
            model,
            layer,
            input,
            output,
            class,
            batch_size,
        } => {
            let config = commands::resolve_config(cli.config.as_deref(), model, layer, batch_size)?;
            commands::transform::execute(config, input, output, class)
        }
        Commands::Inspect { model } => {
            let config = commands::resolve_config(cli.config.as_deref(), model, None, None)?;
            commands::inspect::execute(config.model_path)
        }
        Commands::Sample {
            output,
            records,
            seed,
        } => commands::sample::execute(output, records, seed),
    }
}
