//! Typed column projection for stop queries
//!
//! Callers select which stop columns a query materializes. The selection is
//! a typed, ordered, de-duplicated field list rather than a set of boolean
//! flags, and the result shape is an explicit discriminated union:
//!
//! - exactly one field selected → [`Projected::Scalar`]
//! - more than one field → [`Projected::Record`] in the projection's order
//!
//! Multi-row queries return `Vec<Projected>`; every element shares the same
//! shape by construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A selectable stop column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopField {
    /// The surrogate stop id
    StopId,
    /// The owning bus id
    BusId,
    /// The stop label
    StopName,
    /// The 1-based position within the route
    StopOrder,
}

impl StopField {
    /// The store column this field maps to
    pub fn column(self) -> &'static str {
        match self {
            StopField::StopId => "stop_id",
            StopField::BusId => "bus_id",
            StopField::StopName => "stop_name",
            StopField::StopOrder => "stop_order",
        }
    }

    /// Whether the column carries text (as opposed to an integer)
    pub fn is_text(self) -> bool {
        matches!(self, StopField::StopName)
    }
}

/// An ordered, non-empty selection of stop columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<StopField>,
}

impl Projection {
    /// Build a projection from a field list.
    ///
    /// Duplicate fields collapse to their first occurrence. An empty list
    /// fails with `InvalidArgument`: a query must materialize something.
    pub fn new(fields: &[StopField]) -> Result<Self> {
        let mut deduped: Vec<StopField> = Vec::with_capacity(fields.len());
        for &field in fields {
            if !deduped.contains(&field) {
                deduped.push(field);
            }
        }
        if deduped.is_empty() {
            return Err(Error::invalid("projection", "no fields requested"));
        }
        Ok(Self { fields: deduped })
    }

    /// A projection of exactly one field
    pub fn single(field: StopField) -> Self {
        Self {
            fields: vec![field],
        }
    }

    /// The selected fields, in materialization order
    pub fn fields(&self) -> &[StopField] {
        &self.fields
    }

    /// True when results take the scalar shape
    pub fn is_scalar(&self) -> bool {
        self.fields.len() == 1
    }

    /// Comma-separated column list for a SELECT statement
    pub fn column_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.column())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Shape one row's values per this projection's cardinality.
    ///
    /// `values` must have exactly one entry per selected field.
    pub fn shape(&self, mut values: Vec<FieldValue>) -> Projected {
        debug_assert_eq!(values.len(), self.fields.len());
        if self.is_scalar() {
            Projected::Scalar(values.remove(0))
        } else {
            Projected::Record(values)
        }
    }
}

/// A single materialized column value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Integer column (ids and order)
    Int(i64),
    /// Text column (stop name)
    Text(String),
}

impl FieldValue {
    /// The integer value, if this is an integer column
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    /// The text value, if this is a text column
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Int(_) => None,
            FieldValue::Text(v) => Some(v),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// One query row, shaped by its projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projected {
    /// Single-field projection result
    Scalar(FieldValue),
    /// Multi-field projection result, in projection order
    Record(Vec<FieldValue>),
}

impl Projected {
    /// The scalar value, if this row has the scalar shape
    pub fn as_scalar(&self) -> Option<&FieldValue> {
        match self {
            Projected::Scalar(v) => Some(v),
            Projected::Record(_) => None,
        }
    }

    /// The record values, if this row has the record shape
    pub fn as_record(&self) -> Option<&[FieldValue]> {
        match self {
            Projected::Scalar(_) => None,
            Projected::Record(vs) => Some(vs),
        }
    }
}
