// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `layerfeat sample` command: write a demo model and dataset.
//!
//! Produces `<output>/model/` (a 4 → 8 → 3 network) and
//! `<output>/points.csv` (Gaussian clusters, one per label). Both are fully
//! determined by the seed.

use anyhow::Context;
use dataset::{Attribute, Dataset, Schema, Value};
use model_ir::{DenseLayer, ModelWriter, Network};
use std::path::PathBuf;
use tensor_core::{Activation, Shape, Tensor};

pub const INPUTS: usize = 4;
pub const HIDDEN_UNITS: usize = 8;
pub const HIDDEN_LAYER: &str = "Hidden Layer";
pub const OUTPUT_LAYER: &str = "Output Layer";

const LABELS: [&str; 3] = ["alpha", "beta", "gamma"];

pub fn execute(output: PathBuf, records: usize, seed: u64) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            layerfeat · Sample Generator             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let mut rng = SimpleRng::new(seed);

    let model_dir = output.join("model");
    let network = sample_network(&mut rng)?;
    ModelWriter::save(&model_dir, &network)
        .with_context(|| format!("writing model to '{}'", model_dir.display()))?;
    println!("  Model:   {} → {}", network.summary(), model_dir.display());

    let csv_path = output.join("points.csv");
    let data = sample_points(&mut rng, records)?;
    dataset::csv_io::write_path(&data, &csv_path)
        .with_context(|| format!("writing '{}'", csv_path.display()))?;
    println!("  Dataset: {} records → {}", data.len(), csv_path.display());
    println!();

    println!("  Try:");
    println!(
        "   layerfeat transform --model {} --layer \"{HIDDEN_LAYER}\" --input {} --output hidden.csv --class label",
        model_dir.display(),
        csv_path.display(),
    );
    println!();
    Ok(())
}

fn sample_network(rng: &mut SimpleRng) -> anyhow::Result<Network<model_ir::network::Validated>> {
    let mut dense = |name: &str,
                     index: usize,
                     rows: usize,
                     cols: usize,
                     act: Activation|
     -> anyhow::Result<DenseLayer> {
        let scale = (2.0 / rows as f64).sqrt();
        let w = (0..rows * cols)
            .map(|_| rng.gauss(0.0, scale) as f32)
            .collect();
        let b = (0..cols).map(|_| rng.gauss(0.0, 0.1) as f32).collect();
        Ok(DenseLayer::new(
            name,
            index,
            act,
            Tensor::from_vec(Shape::matrix(rows, cols), w)?,
            Tensor::from_vec(Shape::vector(cols), b)?,
        ))
    };

    let layers = vec![
        dense(HIDDEN_LAYER, 0, INPUTS, HIDDEN_UNITS, Activation::Relu)?,
        dense(OUTPUT_LAYER, 1, HIDDEN_UNITS, LABELS.len(), Activation::Softmax)?,
    ];
    Ok(Network::new("sample-mlp", INPUTS, layers).validate()?)
}

fn sample_points(rng: &mut SimpleRng, records: usize) -> anyhow::Result<Dataset> {
    let mut attributes: Vec<Attribute> = (0..INPUTS)
        .map(|i| Attribute::numeric(format!("x{i}")))
        .collect();
    attributes.push(Attribute::nominal("label", LABELS));
    let schema = Schema::new("points", attributes).with_class_index(INPUTS)?;

    let mut data = Dataset::with_capacity(schema, records);
    for r in 0..records {
        let class = r % LABELS.len();
        let mut row: Vec<Value> = (0..INPUTS)
            .map(|i| {
                let centre = if i % LABELS.len() == class { 2.0 } else { -1.0 };
                Value::Numeric(round3(rng.gauss(centre, 0.5)))
            })
            .collect();
        row.push(Value::Nominal(class));
        data.push(row)?;
    }
    Ok(data)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Minimal deterministic PRNG (xoshiro256**).
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `(0, 1]`.
    fn uniform(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 + 1.0) / (1u64 << 53) as f64
    }

    /// Box-Muller.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.uniform();
        let u2 = self.uniform();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
