// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for schema derivation and batch transformation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dataset::{Attribute, Dataset, Schema, Value};
use layer_filter::{FilterConfig, LayerActivationFilter};
use model_ir::{DenseLayer, ModelWriter, Network};
use tensor_core::{Activation, Shape, Tensor};

const INPUTS: usize = 16;

fn network() -> Network<model_ir::network::Validated> {
    let dense = |name: &str, index: usize, rows: usize, cols: usize, act: Activation| {
        let w = (0..rows * cols).map(|i| ((i % 7) as f32 - 3.0) * 0.1).collect();
        let weight = Tensor::from_vec(Shape::matrix(rows, cols), w).unwrap();
        DenseLayer::new(name, index, act, weight, Tensor::zeros(Shape::vector(cols)))
    };
    Network::new(
        "bench-mlp",
        INPUTS,
        vec![
            dense("Hidden Layer", 0, INPUTS, 64, Activation::Relu),
            dense("Output Layer", 1, 64, 4, Activation::Softmax),
        ],
    )
    .validate()
    .unwrap()
}

fn dataset(rows: usize) -> Dataset {
    let mut attributes: Vec<Attribute> = (0..INPUTS)
        .map(|i| Attribute::numeric(format!("f{i}")))
        .collect();
    attributes.push(Attribute::nominal("class", ["a", "b"]));
    let schema = Schema::new("bench", attributes)
        .with_class_index(INPUTS)
        .unwrap();

    let data = (0..rows)
        .map(|r| {
            let mut row: Vec<Value> = (0..INPUTS)
                .map(|c| Value::Numeric(((r * 31 + c) % 17) as f64 / 17.0))
                .collect();
            row.push(Value::Nominal(r % 2));
            row
        })
        .collect();
    Dataset::from_rows(schema, data).unwrap()
}

fn bench_derive_schema(c: &mut Criterion) {
    let tmp = tempfile::TempDir::new().unwrap();
    ModelWriter::save(tmp.path(), &network()).unwrap();
    let schema = dataset(0).schema().clone();

    c.bench_function("derive_schema_from_disk", |b| {
        b.iter(|| {
            let mut filter =
                LayerActivationFilter::new(FilterConfig::new(tmp.path(), "Hidden Layer"));
            black_box(filter.derive_schema(&schema).unwrap())
        })
    });
}

fn bench_transform(c: &mut Criterion) {
    let data = dataset(1000);
    let mut group = c.benchmark_group("transform_1000");

    for batch_size in [1usize, 32, 100, 1000] {
        let mut filter = LayerActivationFilter::new(FilterConfig {
            batch_size,
            ..FilterConfig::new("<in-memory>", "Hidden Layer")
        });
        filter
            .derive_schema_with_model(data.schema(), Box::new(network()))
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &data, |b, d| {
            b.iter(|| black_box(filter.transform(d).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive_schema, bench_transform);
criterion_main!(benches);
