// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Encodes dataset records into the `f32` rows a network consumes.
//!
//! Non-class attributes are laid out in column order: a numeric attribute
//! takes one column, a nominal attribute one column per declared label
//! (one-hot).

use crate::FilterError;
use dataset::{AttributeKind, Schema, Value};
use tensor_core::{Shape, Tensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Numeric,
    OneHot { labels: usize },
}

#[derive(Debug, Clone)]
struct Feature {
    index: usize,
    name: String,
    column: Column,
    width: usize,
}

/// Per-schema encoding plan, built once at schema derivation.
#[derive(Debug, Clone)]
pub(crate) struct RecordEncoder {
    features: Vec<Feature>,
    width: usize,
}

impl RecordEncoder {
    pub(crate) fn new(schema: &Schema) -> Self {
        let features: Vec<Feature> = schema
            .feature_attributes()
            .map(|(index, attr)| Feature {
                index,
                name: attr.name.clone(),
                column: match &attr.kind {
                    AttributeKind::Numeric => Column::Numeric,
                    AttributeKind::Nominal(labels) => Column::OneHot {
                        labels: labels.len(),
                    },
                },
                width: attr.encoded_width(),
            })
            .collect();
        let width = features.iter().map(|f| f.width).sum();
        Self { features, width }
    }

    /// Number of `f32` columns per encoded record.
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    /// Encodes `rows` into a `[rows.len(), width]` tensor. `first_record` is
    /// the dataset index of `rows[0]`, used in error messages.
    pub(crate) fn encode_batch(
        &self,
        rows: &[Vec<Value>],
        first_record: usize,
    ) -> Result<Tensor, FilterError> {
        let mut data = vec![0.0f32; rows.len() * self.width];
        for (offset, row) in rows.iter().enumerate() {
            let start = offset * self.width;
            self.encode_into(row, first_record + offset, &mut data[start..start + self.width])?;
        }

        Tensor::from_vec(Shape::matrix(rows.len(), self.width), data).map_err(|e| {
            FilterError::Transform {
                record: first_record,
                detail: e.to_string(),
            }
        })
    }

    fn encode_into(&self, row: &[Value], record: usize, out: &mut [f32]) -> Result<(), FilterError> {
        let mut col = 0;
        for feature in &self.features {
            let value = row.get(feature.index).copied().unwrap_or(Value::Missing);
            match (feature.column, value) {
                (_, Value::Missing) => {
                    return Err(FilterError::Transform {
                        record,
                        detail: format!("missing value for attribute '{}'", feature.name),
                    });
                }
                (Column::Numeric, Value::Numeric(x)) => {
                    out[col] = x as f32;
                    col += 1;
                }
                (Column::OneHot { labels }, Value::Nominal(i)) if i < labels => {
                    out[col + i] = 1.0;
                    col += feature.width;
                }
                (_, other) => {
                    return Err(FilterError::Transform {
                        record,
                        detail: format!(
                            "value {other} does not fit attribute '{}'",
                            feature.name
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::Attribute;

    fn schema() -> Schema {
        Schema::new(
            "weather",
            vec![
                Attribute::numeric("temperature"),
                Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]),
                Attribute::numeric("humidity"),
                Attribute::nominal("play", ["yes", "no"]),
            ],
        )
        .with_class_name("play")
        .unwrap()
    }

    #[test]
    fn test_width_excludes_class() {
        let enc = RecordEncoder::new(&schema());
        assert_eq!(enc.width(), 5);
    }

    #[test]
    fn test_encode_one_hot() {
        let enc = RecordEncoder::new(&schema());
        let rows = vec![
            vec![
                Value::Numeric(21.5),
                Value::Nominal(2),
                Value::Numeric(0.8),
                Value::Nominal(0),
            ],
            vec![
                Value::Numeric(-3.0),
                Value::Nominal(0),
                Value::Numeric(0.1),
                Value::Missing,
            ],
        ];
        let t = enc.encode_batch(&rows, 0).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(2, 5));
        assert_eq!(t.row(0), &[21.5, 0.0, 0.0, 1.0, 0.8]);
        // A missing class value does not matter to the encoder.
        assert_eq!(t.row(1), &[-3.0, 1.0, 0.0, 0.0, 0.1]);
    }

    #[test]
    fn test_missing_feature_names_record() {
        let enc = RecordEncoder::new(&schema());
        let rows = vec![
            vec![
                Value::Numeric(1.0),
                Value::Nominal(1),
                Value::Numeric(0.5),
                Value::Nominal(1),
            ],
            vec![
                Value::Numeric(1.0),
                Value::Nominal(1),
                Value::Missing,
                Value::Nominal(1),
            ],
        ];
        let err = enc.encode_batch(&rows, 40).unwrap_err();
        match err {
            FilterError::Transform { record, detail } => {
                assert_eq!(record, 41);
                assert!(detail.contains("humidity"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_width_schema_still_checks_cells() {
        // Only a nominal attribute with no labels feeds the model.
        let schema = Schema::new(
            "degenerate",
            vec![
                Attribute::nominal("empty", Vec::<String>::new()),
                Attribute::nominal("play", ["yes", "no"]),
            ],
        )
        .with_class_name("play")
        .unwrap();
        let enc = RecordEncoder::new(&schema);
        assert_eq!(enc.width(), 0);

        let rows = vec![
            vec![Value::Missing, Value::Nominal(0)],
            vec![Value::Missing, Value::Nominal(1)],
        ];
        let err = enc.encode_batch(&rows, 7).unwrap_err();
        assert!(matches!(err, FilterError::Transform { record: 7, .. }));
    }

    #[test]
    fn test_encode_empty_batch() {
        let enc = RecordEncoder::new(&schema());
        let t = enc.encode_batch(&[], 0).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(0, 5));
    }
}
