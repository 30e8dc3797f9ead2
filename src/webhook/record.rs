//! Records and the payloads they are turned into.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::SerializationError;
use super::options::Mode;

/// Ordered field mapping dumped from a record.
///
/// Field order follows the record's declaration order.
pub type Fields = Map<String, Value>;

/// A typed value that can be delivered as a webhook.
///
/// Implemented for every `Serialize + Debug` type; the `Debug` form is what
/// gets logged when a record enters the pipeline.
pub trait Record: fmt::Debug {
    /// Dumps the record into an ordered field mapping.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the record fails to serialize or
    /// does not produce a mapping.
    fn dump(&self, mode: Mode) -> Result<Fields, SerializationError>;
}

impl<T: Serialize + fmt::Debug + ?Sized> Record for T {
    // serde has a single data model, so both modes dump the same tree.
    fn dump(&self, _mode: Mode) -> Result<Fields, SerializationError> {
        match serde_json::to_value(self).map_err(SerializationError::Dump)? {
            Value::Object(fields) => Ok(fields),
            other => Err(SerializationError::NotAMapping {
                kind: value_kind(&other),
            }),
        }
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// The wire representation produced by a serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A field mapping, sent as a JSON object.
    Fields(Fields),
    /// Pre-rendered text such as an XML document.
    Text(String),
}

impl Payload {
    /// Returns the field mapping, if this payload is one.
    #[must_use]
    pub const fn as_fields(&self) -> Option<&Fields> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::Text(_) => None,
        }
    }

    /// Returns the rendered text, if this payload is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Fields(_) => None,
        }
    }

    /// Encodes the payload into bytes: JSON for mappings, UTF-8 for text.
    ///
    /// # Errors
    ///
    /// Returns the JSON encoder's error for a mapping that cannot be written.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Fields(fields) => serde_json::to_vec(fields),
            Self::Text(text) => Ok(text.as_bytes().to_vec()),
        }
    }
}
