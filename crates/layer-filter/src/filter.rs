// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The layer-activation filter and its two-phase pipeline.
//!
//! ```text
//! LayerActivationFilter { Unconfigured }
//!     │  .derive_schema(&schema)           load + layer check + width check
//!     ▼
//! LayerActivationFilter { Ready }
//!     │  .transform(&dataset)              repeatable
//!     ▼
//!   Dataset
//! ```
//!
//! The transition happens at most once. A failed derivation leaves the
//! filter `Unconfigured`, so it can be retried with the same configuration.

use crate::encode::RecordEncoder;
use crate::{FilterConfig, FilterError};
use dataset::{Attribute, Dataset, Schema, Value};
use model_ir::{ActivationModel, ModelError, ModelLoader};
use tensor_core::{Shape, Tensor};

/// Name prefix of the generated output attributes.
pub const TRANSFORMED_ATTRIBUTE_PREFIX: &str = "transformedAttribute";

// ── State ──────────────────────────────────────────────────────

/// Externally visible phase of a [`LayerActivationFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    /// No model loaded, no output schema derived.
    Unconfigured,
    /// Model cached, output schema fixed.
    Ready,
}

/// Everything fixed by a successful derivation.
struct Prepared {
    model: Box<dyn ActivationModel>,
    input_schema: Schema,
    output_schema: Schema,
    encoder: RecordEncoder,
    units: usize,
}

enum FilterState {
    Unconfigured,
    Ready(Prepared),
}

// ── Filter ─────────────────────────────────────────────────────

/// Replaces every record of a dataset with the activations of one layer of
/// a trained network.
///
/// # Example
/// ```no_run
/// use layer_filter::{FilterConfig, LayerActivationFilter};
///
/// # fn example(data: &dataset::Dataset) -> Result<(), layer_filter::FilterError> {
/// let mut filter = LayerActivationFilter::new(FilterConfig::new("./models/iris", "hidden_layer"));
/// let schema = filter.derive_schema(data.schema())?;
/// let features = filter.transform(data)?;
/// assert_eq!(features.schema(), &schema);
/// # Ok(())
/// # }
/// ```
pub struct LayerActivationFilter {
    config: FilterConfig,
    state: FilterState,
}

impl LayerActivationFilter {
    /// Creates an unconfigured filter. Nothing is loaded until
    /// [`derive_schema`](Self::derive_schema).
    pub fn new(config: FilterConfig) -> Self {
        tracing::debug!(
            "filter created for layer '{}' of '{}'",
            config.layer_name,
            config.model_path.display()
        );
        Self {
            config,
            state: FilterState::Unconfigured,
        }
    }

    /// The configuration this filter was created with.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn status(&self) -> FilterStatus {
        match self.state {
            FilterState::Unconfigured => FilterStatus::Unconfigured,
            FilterState::Ready(_) => FilterStatus::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == FilterStatus::Ready
    }

    /// The derived output schema, once `Ready`.
    pub fn output_schema(&self) -> Option<&Schema> {
        match &self.state {
            FilterState::Ready(p) => Some(&p.output_schema),
            FilterState::Unconfigured => None,
        }
    }

    /// The cached model, once `Ready`.
    pub fn model(&self) -> Option<&dyn ActivationModel> {
        match &self.state {
            FilterState::Ready(p) => Some(p.model.as_ref()),
            FilterState::Unconfigured => None,
        }
    }

    /// Loads the configured model and derives the output schema for
    /// `input`.
    ///
    /// Fails with [`FilterError::ModelLoad`] if the artifact cannot be read,
    /// [`FilterError::UnknownLayer`] if the layer does not exist, and
    /// [`FilterError::IncompatibleSchema`] if the encoded input width differs
    /// from the model's. Once `Ready`, an identical `input` returns the
    /// cached output schema and anything else is rejected.
    pub fn derive_schema(&mut self, input: &Schema) -> Result<Schema, FilterError> {
        if let FilterState::Ready(prepared) = &self.state {
            return rederive(prepared, input);
        }

        self.config.validate()?;
        let path = self.config.model_path.clone();
        let network = ModelLoader::load(&path)
            .map_err(|source| FilterError::ModelLoad { path, source })?;
        self.prepare(input, Box::new(network))
    }

    /// Like [`derive_schema`](Self::derive_schema), but with a model that is
    /// already in memory. `model_path` is not read.
    pub fn derive_schema_with_model(
        &mut self,
        input: &Schema,
        model: Box<dyn ActivationModel>,
    ) -> Result<Schema, FilterError> {
        if let FilterState::Ready(prepared) = &self.state {
            return rederive(prepared, input);
        }

        self.config.validate()?;
        self.prepare(input, model)
    }

    /// Replaces every record of `data` with the configured layer's
    /// activations, keeping row order and the class value.
    ///
    /// Rows are fed to the model `batch_size` at a time. Any failure aborts
    /// the call; no partial dataset is returned.
    pub fn transform(&self, data: &Dataset) -> Result<Dataset, FilterError> {
        let prepared = match &self.state {
            FilterState::Ready(p) => p,
            FilterState::Unconfigured => return Err(FilterError::NotReady),
        };

        check_compatible(&prepared.input_schema, data.schema())?;

        let mut output = Dataset::with_capacity(prepared.output_schema.clone(), data.len());
        if data.is_empty() {
            return Ok(output);
        }

        let layer = self.config.layer_name.as_str();
        let class_index = data.schema().class_index();
        let batch_size = self.config.batch_size;

        for (chunk_index, chunk) in data.rows().chunks(batch_size).enumerate() {
            let first = chunk_index * batch_size;
            let batch = prepared.encoder.encode_batch(chunk, first)?;

            let activations = prepared
                .model
                .compute_layer_output(layer, &batch)
                .map_err(|e| FilterError::Transform {
                    record: first,
                    detail: format!("records {first}..{}: {e}", first + chunk.len()),
                })?;

            let expected = Shape::matrix(chunk.len(), prepared.units);
            if activations.shape() != &expected {
                return Err(FilterError::Transform {
                    record: first,
                    detail: format!(
                        "model returned {} for layer '{layer}', expected {expected}",
                        activations.shape()
                    ),
                });
            }

            for (offset, row) in chunk.iter().enumerate() {
                let mut values: Vec<Value> = activations
                    .row(offset)
                    .iter()
                    .map(|&a| Value::Numeric(f64::from(a)))
                    .collect();
                if let Some(class) = class_index {
                    values.push(row[class]);
                }
                output.push(values).map_err(|e| FilterError::Transform {
                    record: first + offset,
                    detail: e.to_string(),
                })?;
            }

            tracing::debug!(
                "transformed records {first}..{} through '{layer}'",
                first + chunk.len()
            );
        }

        tracing::info!(
            "transformed {} records of '{}' into {} features",
            output.len(),
            data.schema().relation(),
            prepared.units
        );
        Ok(output)
    }

    // ── Private helpers ────────────────────────────────────────

    fn prepare(
        &mut self,
        input: &Schema,
        model: Box<dyn ActivationModel>,
    ) -> Result<Schema, FilterError> {
        let layer = self.config.layer_name.as_str();

        let names = model.layer_names();
        if !names.contains(&layer) {
            return Err(FilterError::UnknownLayer {
                layer: layer.to_string(),
                model: model.name().to_string(),
                available: names.iter().map(|s| s.to_string()).collect(),
            });
        }

        let encoder = RecordEncoder::new(input);
        if encoder.width() != model.input_width() {
            return Err(FilterError::IncompatibleSchema(format!(
                "'{}' encodes to {} inputs but model '{}' expects {}",
                input.relation(),
                encoder.width(),
                model.name(),
                model.input_width()
            )));
        }

        // Empty forward pass: yields the layer's width without touching data.
        let empty = Tensor::zeros(Shape::matrix(0, encoder.width()));
        let units = model
            .compute_layer_output(layer, &empty)
            .map_err(|e| self.derive_error(model.as_ref(), e))?
            .cols();
        if units == 0 {
            tracing::warn!("layer '{layer}' of '{}' has no outputs", model.name());
        }

        let output_schema = output_schema_for(input, layer, units)?;
        tracing::info!(
            "filter ready: model '{}', layer '{layer}', {} -> {units} features",
            model.name(),
            encoder.width()
        );

        self.state = FilterState::Ready(Prepared {
            model,
            input_schema: input.clone(),
            output_schema: output_schema.clone(),
            encoder,
            units,
        });
        Ok(output_schema)
    }

    fn derive_error(&self, model: &dyn ActivationModel, error: ModelError) -> FilterError {
        match error {
            ModelError::UnknownLayer { layer } => FilterError::UnknownLayer {
                layer,
                model: model.name().to_string(),
                available: model.layer_names().iter().map(|s| s.to_string()).collect(),
            },
            ModelError::InputWidthMismatch { expected, actual } => {
                FilterError::IncompatibleSchema(format!(
                    "model '{}' expects {expected} inputs, got {actual}",
                    model.name()
                ))
            }
            other => FilterError::ModelLoad {
                path: self.config.model_path.clone(),
                source: other,
            },
        }
    }
}

fn rederive(prepared: &Prepared, input: &Schema) -> Result<Schema, FilterError> {
    if input == &prepared.input_schema {
        Ok(prepared.output_schema.clone())
    } else {
        Err(FilterError::IncompatibleSchema(format!(
            "filter is already configured for {}; got {input}",
            prepared.input_schema
        )))
    }
}

/// Accepts `actual` when it feeds the model exactly like `expected`: same
/// attribute count, same kinds and labels in column order, same class
/// column. Relation and attribute names are not compared.
fn check_compatible(expected: &Schema, actual: &Schema) -> Result<(), FilterError> {
    if actual.num_attributes() != expected.num_attributes() {
        return Err(FilterError::IncompatibleSchema(format!(
            "'{}' has {} attributes, the filter was configured for {}",
            actual.relation(),
            actual.num_attributes(),
            expected.num_attributes()
        )));
    }
    if actual.class_index() != expected.class_index() {
        return Err(FilterError::IncompatibleSchema(format!(
            "'{}' has class index {:?}, the filter was configured for {:?}",
            actual.relation(),
            actual.class_index(),
            expected.class_index()
        )));
    }
    let mismatch = expected
        .attributes()
        .iter()
        .zip(actual.attributes())
        .position(|(e, a)| e.kind != a.kind);
    if let Some(i) = mismatch {
        return Err(FilterError::IncompatibleSchema(format!(
            "attribute {i} of '{}' is {}, the filter was configured for {}",
            actual.relation(),
            actual.attributes()[i],
            expected.attributes()[i]
        )));
    }
    Ok(())
}

/// `units` numeric attributes, then the input's class attribute (if any) as
/// the class.
fn output_schema_for(input: &Schema, layer: &str, units: usize) -> Result<Schema, FilterError> {
    let mut attributes: Vec<Attribute> = (0..units)
        .map(|i| Attribute::numeric(format!("{TRANSFORMED_ATTRIBUTE_PREFIX}{i}")))
        .collect();

    let relation = format!("{}-{layer}", input.relation());
    match input.class_attribute() {
        Some(class) => {
            attributes.push(class.clone());
            Schema::new(relation, attributes)
                .with_class_index(units)
                .map_err(|e| FilterError::IncompatibleSchema(e.to_string()))
        }
        None => Ok(Schema::new(relation, attributes)),
    }
}

impl std::fmt::Debug for LayerActivationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerActivationFilter")
            .field("status", &self.status())
            .field("model_path", &self.config.model_path)
            .field("layer", &self.config.layer_name)
            .field("batch_size", &self.config.batch_size)
            .field("model", &self.model().map(|m| m.name()))
            .finish()
    }
}
