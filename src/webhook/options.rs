//! Component configuration and per-call serialization options.
//!
//! Every concrete serializer and deliverer builds its [`SerializerConfig`] or
//! [`DelivererConfig`] from an explicit literal at construction time and keeps
//! it read-only for the rest of its life.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde_json::Value;

use super::record::Fields;

/// Representation mode used when dumping a record to a field mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Values as the record's own types produce them.
    Native,
    /// Values restricted to what JSON can carry.
    Json,
}

impl Mode {
    /// Returns the mode identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static configuration of a serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Format tag checked against deliverers' accepted formats.
    pub format: String,
    /// Dump mode.
    pub mode: Mode,
}

impl SerializerConfig {
    /// Creates a serializer configuration.
    #[must_use]
    pub fn new(format: impl Into<String>, mode: Mode) -> Self {
        Self {
            format: format.into(),
            mode,
        }
    }
}

/// Static configuration of a deliverer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelivererConfig {
    /// Formats this deliverer can transmit.
    pub formats: BTreeSet<String>,
}

impl DelivererConfig {
    /// Creates a configuration accepting the given formats.
    #[must_use]
    pub fn accepting<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `format` is one of the accepted formats.
    #[must_use]
    pub fn accepts(&self, format: &str) -> bool {
        self.formats.contains(format)
    }
}

/// Per-call options controlling which fields are sent and under what names.
///
/// `include`, `exclude` and aliases act on top-level fields; `exclude_none`
/// also drops nulls inside nested mappings. Filters run before aliasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Only these fields are kept, when set.
    pub include: Option<HashSet<String>>,
    /// These fields are dropped, when set.
    pub exclude: Option<HashSet<String>>,
    /// Output names for fields, keyed by field name.
    pub aliases: HashMap<String, String>,
    /// Drop fields whose value is null, at any depth.
    pub exclude_none: bool,
}

impl SerializeOptions {
    /// Creates options that keep every field unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the named fields.
    #[must_use]
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Drops the named fields.
    #[must_use]
    pub fn exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Renames `field` to `output` in the serialized mapping.
    #[must_use]
    pub fn alias(mut self, field: impl Into<String>, output: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), output.into());
        self
    }

    /// Drops null-valued fields, including those of nested mappings.
    ///
    /// Null entries of sequences are kept.
    #[must_use]
    pub const fn exclude_none(mut self, exclude_none: bool) -> Self {
        self.exclude_none = exclude_none;
        self
    }

    /// Applies filters, then aliases, preserving field order.
    #[must_use]
    pub fn apply(&self, fields: Fields) -> Fields {
        fields
            .into_iter()
            .filter(|(name, value)| self.keeps(name, value))
            .map(|(name, value)| {
                let value = if self.exclude_none {
                    drop_nulls(value)
                } else {
                    value
                };
                match self.aliases.get(&name) {
                    Some(output) => (output.clone(), value),
                    None => (name, value),
                }
            })
            .collect()
    }

    fn keeps(&self, name: &str, value: &Value) -> bool {
        if self.include.as_ref().is_some_and(|set| !set.contains(name)) {
            return false;
        }
        if self.exclude.as_ref().is_some_and(|set| set.contains(name)) {
            return false;
        }
        !(self.exclude_none && value.is_null())
    }
}

fn drop_nulls(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(drop_nulls).collect()),
        other => other,
    }
}
