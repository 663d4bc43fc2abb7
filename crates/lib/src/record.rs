//! Mapping between schemaless store records and sequenced items.
//!
//! Hosted object stores return records as untyped JSON objects in which the
//! identifier and the position live under configurable field names. This
//! module extracts both while keeping the full record as the item payload.

use serde_json::Value;
use thiserror::Error;

use crate::Result;
use crate::sequence::SequencedItem;

/// Errors raised while mapping raw records.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record lacks the configured id field, or it is not a string.
    #[error("Record is missing required string field '{field}'")]
    MissingField { field: String },

    /// The configured position field holds something other than a
    /// non-negative integer.
    #[error("Field '{field}' is not a valid position: {value}")]
    InvalidPosition { field: String, value: String },
}

impl RecordError {
    /// Check if this error is a missing id field.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, RecordError::MissingField { .. })
    }

    /// Check if this error is a malformed position value.
    pub fn is_invalid_position(&self) -> bool {
        matches!(self, RecordError::InvalidPosition { .. })
    }
}

// Conversion from RecordError to the main Error type
impl From<RecordError> for crate::Error {
    fn from(err: RecordError) -> Self {
        crate::Error::Record(err)
    }
}

/// Field names used to extract identity and rank from a raw record.
///
/// Defaults match the hosted-backend convention of `_id` for the primary key
/// and `sequence_number` for the rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMapping {
    /// Field holding the record's unique string id.
    pub id_field: String,
    /// Field holding the record's integer position.
    pub position_field: String,
}

impl Default for RecordMapping {
    fn default() -> Self {
        Self {
            id_field: "_id".to_string(),
            position_field: "sequence_number".to_string(),
        }
    }
}

impl RecordMapping {
    /// Create a mapping with explicit field names.
    pub fn new(id_field: impl Into<String>, position_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            position_field: position_field.into(),
        }
    }

    /// Convert one raw record into a [`SequencedItem`].
    ///
    /// An absent or `null` position maps to 0; records edited out-of-band
    /// often lack the field, and 0 sorts them to the front until the next
    /// move normalizes the sequence. The whole record, id and position
    /// fields included, is retained as the payload.
    ///
    /// # Errors
    /// Returns [`RecordError::MissingField`] if the id field is absent or not
    /// a string, and [`RecordError::InvalidPosition`] if the position field
    /// holds anything other than a non-negative integer.
    pub fn item_from_value(&self, record: Value) -> Result<SequencedItem<Value>> {
        let id = record
            .get(&self.id_field)
            .and_then(Value::as_str)
            .ok_or_else(|| RecordError::MissingField {
                field: self.id_field.clone(),
            })?
            .to_string();

        let position = match record.get(&self.position_field) {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_u64().ok_or_else(|| RecordError::InvalidPosition {
                field: self.position_field.clone(),
                value: value.to_string(),
            })?,
        };

        Ok(SequencedItem::new(id, position, record))
    }

    /// Convert a fetched page of raw records, failing on the first bad one.
    pub fn items_from_values(&self, records: Vec<Value>) -> Result<Vec<SequencedItem<Value>>> {
        records
            .into_iter()
            .map(|record| self.item_from_value(record))
            .collect()
    }
}
