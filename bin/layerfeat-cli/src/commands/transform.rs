// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `layerfeat transform` command: CSV in, layer activations out.
//!
//! ```text
//! read CSV → derive_schema (load model, check layer) → transform → write CSV
//! ```

use anyhow::Context;
use layer_filter::{FilterConfig, LayerActivationFilter};
use std::path::PathBuf;
use std::time::Instant;

pub fn execute(
    config: FilterConfig,
    input: PathBuf,
    output: PathBuf,
    class: Option<String>,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            layerfeat · Layer Transformer            ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!("  Config:");
    println!("   Model:      {}", config.model_path.display());
    println!("   Layer:      {}", config.layer_name);
    println!("   Batch size: {}", config.batch_size);
    println!("   Input:      {}", input.display());
    println!("   Output:     {}", output.display());
    if let Some(class) = &class {
        println!("   Class:      {class}");
    }
    println!();

    // Step 1: read the dataset.
    println!("  [1/3] Reading dataset...");
    let data = dataset::csv_io::read_path(&input, class.as_deref())
        .with_context(|| format!("reading '{}'", input.display()))?;
    println!("        {} records, schema {}", data.len(), data.schema());
    println!();

    // Step 2: Unconfigured → Ready (load model, check layer, measure width).
    println!("  [2/3] Loading model and deriving output schema...");
    let mut filter = LayerActivationFilter::new(config);
    let schema = filter.derive_schema(data.schema())?;
    println!("        Output schema: {schema}");
    println!();

    // Step 3: run every record through the model.
    println!("  [3/3] Transforming...");
    let start = Instant::now();
    let features = filter.transform(&data)?;
    let elapsed = start.elapsed();

    dataset::csv_io::write_path(&features, &output)
        .with_context(|| format!("writing '{}'", output.display()))?;

    let per_sec = if elapsed.as_secs_f64() > 0.0 {
        features.len() as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    println!(
        "        {} records → {} attributes in {:.2}ms ({per_sec:.0} rec/s)",
        features.len(),
        schema.num_attributes(),
        elapsed.as_secs_f64() * 1000.0,
    );
    println!("        Wrote {}", output.display());
    println!();

    Ok(())
}
