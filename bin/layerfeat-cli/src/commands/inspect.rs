// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `layerfeat inspect` command: display model structure.
//!
//! Loads the manifest + SafeTensors weights and prints the layer names that
//! can be passed to `--layer`, with their widths and activations.

use std::path::PathBuf;

pub fn execute(model: PathBuf) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             layerfeat · Model Inspector             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let network = model_ir::ModelLoader::load(&model).map_err(|e| {
        anyhow::anyhow!("failed to load model from '{}': {e}", model.display())
    })?;

    // ── Summary ────────────────────────────────────────────────
    println!("  Model: {}", network.name);
    println!("  Inputs: {}", network.input_size);
    println!("  Layers: {}", network.num_layers());
    println!("  Parameters: {}", network.total_parameters());
    println!();

    // ── Per-Layer Detail ───────────────────────────────────────
    println!(
        "  {:<4} {:<30} {:>6} {:>6} {:<10} {:>10}",
        "Idx", "Name", "In", "Units", "Activ.", "#Params",
    );
    println!("  {}", "-".repeat(72));

    for layer in network.iter_layers() {
        println!(
            "  {:<4} {:<30} {:>6} {:>6} {:<10} {:>10}",
            layer.index,
            truncate(&layer.name, 30),
            layer.input_units,
            layer.units,
            layer.activation.as_str(),
            layer.num_parameters(),
        );
    }
    println!();

    Ok(())
}

/// Truncates a string to `max_len` characters with ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Output Layer", 30), "Output Layer");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
    }

    #[test]
    fn test_inspect_missing_model() {
        let err = execute(PathBuf::from("/no/such/model")).unwrap_err();
        assert!(err.to_string().contains("/no/such/model"));
    }
}
