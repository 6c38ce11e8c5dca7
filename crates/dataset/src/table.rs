// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rows of typed values sharing one schema.

use crate::{AttributeKind, DatasetError, Schema};
use std::fmt;

/// A single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A real number (numeric attributes).
    Numeric(f64),
    /// Index into the attribute's labels (nominal attributes).
    Nominal(usize),
    /// No value recorded.
    Missing,
}

impl Value {
    /// The value as a number: the number itself for numeric cells, the
    /// label index for nominal ones.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            Value::Nominal(i) => Some(*i as f64),
            Value::Missing => None,
        }
    }

    /// Returns `true` for missing cells.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(v) => write!(f, "{v}"),
            Value::Nominal(i) => write!(f, "#{i}"),
            Value::Missing => f.write_str("?"),
        }
    }
}

/// An ordered collection of rows with a shared [`Schema`].
///
/// Every row has exactly one value per attribute, and each value matches its
/// attribute's kind; [`push`](Dataset::push) enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Creates an empty dataset with room for `capacity` rows.
    pub fn with_capacity(schema: Schema, capacity: usize) -> Self {
        Self {
            schema,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Builds a dataset from rows, validating each one.
    pub fn from_rows(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self, DatasetError> {
        let mut dataset = Self::with_capacity(schema, rows.len());
        for row in rows {
            dataset.push(row)?;
        }
        Ok(dataset)
    }

    /// Appends a row after checking it against the schema.
    pub fn push(&mut self, row: Vec<Value>) -> Result<(), DatasetError> {
        let index = self.rows.len();
        if row.len() != self.schema.num_attributes() {
            return Err(DatasetError::ArityMismatch {
                row: index,
                expected: self.schema.num_attributes(),
                actual: row.len(),
            });
        }

        for (attr, value) in self.schema.attributes().iter().zip(&row) {
            let detail = match (&attr.kind, value) {
                (_, Value::Missing) | (AttributeKind::Numeric, Value::Numeric(_)) => None,
                (AttributeKind::Nominal(labels), Value::Nominal(i)) if *i < labels.len() => None,
                (AttributeKind::Nominal(labels), Value::Nominal(i)) => Some(format!(
                    "label index {i} out of range for {} labels",
                    labels.len()
                )),
                (AttributeKind::Numeric, Value::Nominal(_)) => {
                    Some("nominal value in numeric attribute".to_string())
                }
                (AttributeKind::Nominal(_), Value::Numeric(_)) => {
                    Some("numeric value in nominal attribute".to_string())
                }
            };
            if let Some(detail) = detail {
                return Err(DatasetError::InvalidValue {
                    row: index,
                    attribute: attr.name.clone(),
                    detail,
                });
            }
        }

        self.rows.push(row);
        Ok(())
    }

    /// The dataset's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// The row at `index`.
    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The class value of row `index`, if the schema has a class attribute.
    pub fn class_value(&self, index: usize) -> Option<Value> {
        let class = self.schema.class_index()?;
        self.rows.get(index).map(|r| r[class])
    }

    /// Renders a cell using its attribute's labels.
    pub fn format_value(&self, attribute: usize, value: &Value) -> String {
        match (self.schema.attribute(attribute), value) {
            (Some(attr), Value::Nominal(i)) => attr
                .labels()
                .get(*i)
                .cloned()
                .unwrap_or_else(|| value.to_string()),
            _ => value.to_string(),
        }
    }
}
