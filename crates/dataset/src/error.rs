// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for dataset construction and I/O.

/// Errors that can occur when building, reading, or writing datasets.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A row has the wrong number of values.
    #[error("row {row}: expected {expected} values, got {actual}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A value does not fit its attribute's kind.
    #[error("row {row}, attribute '{attribute}': {detail}")]
    InvalidValue {
        row: usize,
        attribute: String,
        detail: String,
    },

    /// No attribute with the given name exists.
    #[error("no attribute named '{0}'")]
    UnknownAttribute(String),

    /// The schema itself is inconsistent.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
