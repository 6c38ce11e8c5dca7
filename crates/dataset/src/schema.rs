// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Attribute and schema definitions.

use crate::DatasetError;
use std::fmt;

/// The type of values an attribute holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Real-valued.
    Numeric,
    /// One of a fixed, ordered set of labels.
    Nominal(Vec<String>),
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Column name.
    pub name: String,
    /// Value type.
    pub kind: AttributeKind,
}

impl Attribute {
    /// Creates a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    /// Creates a nominal attribute with the given labels.
    pub fn nominal<S: Into<String>>(name: impl Into<String>, labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal(labels.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns `true` for numeric attributes.
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric)
    }

    /// Labels of a nominal attribute; empty for numeric ones.
    pub fn labels(&self) -> &[String] {
        match &self.kind {
            AttributeKind::Numeric => &[],
            AttributeKind::Nominal(labels) => labels,
        }
    }

    /// Position of `label` among this attribute's labels.
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels().iter().position(|l| l == label)
    }

    /// Number of model inputs this attribute occupies when encoded:
    /// one for numeric, one per label (one-hot) for nominal.
    pub fn encoded_width(&self) -> usize {
        match &self.kind {
            AttributeKind::Numeric => 1,
            AttributeKind::Nominal(labels) => labels.len(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AttributeKind::Numeric => write!(f, "{} numeric", self.name),
            AttributeKind::Nominal(labels) => write!(f, "{} {{{}}}", self.name, labels.join(",")),
        }
    }
}

/// The shape of a dataset: relation name, attributes, and the optional class
/// (label/target) attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
}

impl Schema {
    /// Creates a schema without a class attribute.
    pub fn new(relation: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            relation: relation.into(),
            attributes,
            class_index: None,
        }
    }

    /// Designates the attribute at `index` as the class attribute.
    pub fn with_class_index(mut self, index: usize) -> Result<Self, DatasetError> {
        if index >= self.attributes.len() {
            return Err(DatasetError::InvalidSchema(format!(
                "class index {index} out of range for {} attributes",
                self.attributes.len()
            )));
        }
        self.class_index = Some(index);
        Ok(self)
    }

    /// Designates the attribute called `name` as the class attribute.
    pub fn with_class_name(self, name: &str) -> Result<Self, DatasetError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| DatasetError::UnknownAttribute(name.to_string()))?;
        self.with_class_index(index)
    }

    /// Relation (dataset) name.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// All attributes in column order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute at a column index.
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// Number of attributes, including the class attribute.
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Column index of the attribute called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Column index of the class attribute, if one is designated.
    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// The class attribute, if one is designated.
    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.class_index.and_then(|i| self.attributes.get(i))
    }

    /// Column indices and attributes of everything except the class attribute.
    pub fn feature_attributes(&self) -> impl Iterator<Item = (usize, &Attribute)> {
        let class = self.class_index;
        self.attributes
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != class)
    }

    /// Total encoded width of the non-class attributes.
    pub fn encoded_width(&self) -> usize {
        self.feature_attributes().map(|(_, a)| a.encoded_width()).sum()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "relation {}", self.relation)?;
        for (i, attr) in self.attributes.iter().enumerate() {
            let marker = if Some(i) == self.class_index { " (class)" } else { "" };
            writeln!(f, "  {attr}{marker}")?;
        }
        Ok(())
    }
}
