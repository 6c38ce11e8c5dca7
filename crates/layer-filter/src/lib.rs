// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # layer-filter
//!
//! Reuses a trained network as a fixed feature extractor: every record of a
//! dataset is replaced by the activations of one named layer.
//!
//! The filter has two phases:
//! ```text
//! LayerActivationFilter (Unconfigured)
//!     │  .derive_schema(&input_schema)   loads the model, checks the layer,
//!     ▼                                   measures the output width
//! LayerActivationFilter (Ready)
//!     │  .transform(&dataset)            any number of times
//!     ▼
//!   Dataset { transformedAttribute0.., class }
//! ```
//!
//! Configuration errors (unreadable model, unknown layer, mismatched input
//! width) surface from `derive_schema`, before any record is processed.

mod config;
mod encode;
mod error;
mod filter;

pub use config::FilterConfig;
pub use error::FilterError;
pub use filter::{FilterStatus, LayerActivationFilter, TRANSFORMED_ATTRIBUTE_PREFIX};
