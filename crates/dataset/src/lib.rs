// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dataset
//!
//! In-memory tabular data exchanged with the feature filter.
//!
//! - [`Schema`]: relation name, ordered [`Attribute`]s, optional class attribute.
//! - [`Value`]: one typed cell: numeric, nominal label index, or missing.
//! - [`Dataset`]: a schema plus rows, validated on insertion.
//! - [`csv_io`]: reading and writing datasets as CSV with a header row.
//!
//! ```text
//!   CSV file ──csv_io::read──▶ Dataset { Schema, rows } ──csv_io::write──▶ CSV file
//! ```

pub mod csv_io;
mod error;
mod schema;
mod table;

pub use error::DatasetError;
pub use schema::{Attribute, AttributeKind, Schema};
pub use table::{Dataset, Value};
