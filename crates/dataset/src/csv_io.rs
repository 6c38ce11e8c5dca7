// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CSV reading and writing.
//!
//! Layout: a header row with attribute names, then one line per row.
//! On read, a column whose non-missing cells all parse as numbers becomes a
//! numeric attribute; any other column becomes nominal, with labels in the
//! order they first appear. An empty cell or `?` is a missing value.

use crate::{Attribute, AttributeKind, Dataset, DatasetError, Schema, Value};
use std::io::{Read, Write};
use std::path::Path;

/// Token written for missing values.
const MISSING: &str = "?";

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell == MISSING
}

/// Reads a dataset from CSV, optionally designating a class column.
pub fn read<R: Read>(reader: R, relation: &str, class: Option<&str>) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;

    let attributes: Vec<Attribute> = headers
        .iter()
        .enumerate()
        .map(|(col, name)| infer_attribute(name, records.iter().map(|r| &r[col])))
        .collect();

    let mut schema = Schema::new(relation, attributes);
    if let Some(class) = class {
        schema = schema.with_class_name(class)?;
    }

    let mut dataset = Dataset::with_capacity(schema, records.len());
    for record in &records {
        let row = dataset
            .schema()
            .attributes()
            .iter()
            .zip(record.iter())
            .map(|(attr, cell)| parse_cell(attr, cell))
            .collect();
        dataset.push(row)?;
    }

    tracing::debug!(
        "read relation '{relation}': {} rows, {} attributes",
        dataset.len(),
        dataset.schema().num_attributes(),
    );
    Ok(dataset)
}

/// Reads a dataset from a CSV file; the relation is named after the file stem.
pub fn read_path(path: &Path, class: Option<&str>) -> Result<Dataset, DatasetError> {
    let relation = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string();
    let file = std::fs::File::open(path)?;
    read(file, &relation, class)
}

/// Writes a dataset as CSV with a header row.
pub fn write<W: Write>(dataset: &Dataset, writer: W) -> Result<(), DatasetError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(dataset.schema().attributes().iter().map(|a| a.name.as_str()))?;

    for row in dataset.rows() {
        let cells = row.iter().enumerate().map(|(col, value)| match value {
            Value::Missing => MISSING.to_string(),
            other => dataset.format_value(col, other),
        });
        wtr.write_record(cells)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a dataset to a CSV file, replacing any existing file.
pub fn write_path(dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
    let file = std::fs::File::create(path)?;
    write(dataset, std::io::BufWriter::new(file))
}

fn infer_attribute<'a>(name: &str, cells: impl Iterator<Item = &'a str> + Clone) -> Attribute {
    let numeric = cells
        .clone()
        .filter(|c| !is_missing(c))
        .all(|c| c.parse::<f64>().is_ok());

    if numeric {
        return Attribute::numeric(name);
    }

    let mut labels: Vec<String> = Vec::new();
    for cell in cells.filter(|c| !is_missing(c)) {
        if !labels.iter().any(|l| l == cell) {
            labels.push(cell.to_string());
        }
    }
    Attribute::nominal(name, labels)
}

fn parse_cell(attr: &Attribute, cell: &str) -> Value {
    if is_missing(cell) {
        return Value::Missing;
    }
    match &attr.kind {
        AttributeKind::Numeric => cell.parse().map(Value::Numeric).unwrap_or(Value::Missing),
        AttributeKind::Nominal(_) => attr
            .label_index(cell)
            .map(Value::Nominal)
            .unwrap_or(Value::Missing),
    }
}
