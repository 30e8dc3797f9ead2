//! XML serializer.
//!
//! Renders the field mapping under a single root element. Each key becomes a
//! child element; nested mappings recurse, sequences emit one `<item>` child
//! per entry, and nulls emit an empty element. Text holding characters XML 1.0
//! cannot carry is rejected rather than written out.

use std::fmt::Write as _;

use serde_json::Value;

use super::SerializationError;
use super::options::{Mode, SerializerConfig};
use super::record::{Fields, Payload};
use super::serializer::Serializer;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SEQUENCE_ITEM: &str = "item";

/// Serializer producing an XML document.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    config: SerializerConfig,
    root: String,
}

impl XmlSerializer {
    /// Format tag of this serializer.
    pub const FORMAT: &'static str = "xml";

    /// Default root element name.
    pub const DEFAULT_ROOT: &'static str = "webhook";

    /// Creates an XML serializer with the `<webhook>` root element.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(Self::DEFAULT_ROOT)
    }

    /// Creates an XML serializer with a custom root element name.
    #[must_use]
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            config: SerializerConfig::new(Self::FORMAT, Mode::Native),
            root: root.into(),
        }
    }

    /// Returns the root element name.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for XmlSerializer {
    fn config(&self) -> &SerializerConfig {
        &self.config
    }

    fn format_data(&self, fields: Fields) -> Result<Payload, SerializationError> {
        check_name(&self.root)?;

        let mut out = String::from(DECLARATION);
        write_open(&mut out, &self.root);
        write_fields(&mut out, &fields)?;
        write_close(&mut out, &self.root);

        Ok(Payload::Text(out))
    }
}

fn write_fields(out: &mut String, fields: &Fields) -> Result<(), SerializationError> {
    for (name, value) in fields {
        check_name(name)?;
        write_element(out, name, value)?;
    }
    Ok(())
}

fn write_element(out: &mut String, name: &str, value: &Value) -> Result<(), SerializationError> {
    match value {
        Value::Null => {
            let _ = write!(out, "<{name}/>");
        }
        Value::Object(fields) => {
            write_open(out, name);
            write_fields(out, fields)?;
            write_close(out, name);
        }
        Value::Array(items) => {
            write_open(out, name);
            for item in items {
                write_element(out, SEQUENCE_ITEM, item)?;
            }
            write_close(out, name);
        }
        Value::String(text) => {
            write_open(out, name);
            escape_into(out, name, text)?;
            write_close(out, name);
        }
        Value::Bool(flag) => {
            let _ = write!(out, "<{name}>{flag}</{name}>");
        }
        Value::Number(number) => {
            let _ = write!(out, "<{name}>{number}</{name}>");
        }
    }
    Ok(())
}

fn write_open(out: &mut String, name: &str) {
    let _ = write!(out, "<{name}>");
}

fn write_close(out: &mut String, name: &str) {
    let _ = write!(out, "</{name}>");
}

fn escape_into(out: &mut String, element: &str, text: &str) -> Result<(), SerializationError> {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' | '\n' | '\r' => out.push(ch),
            // Outside the XML 1.0 Char production
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {
                return Err(SerializationError::InvalidCharacter {
                    element: element.to_string(),
                    character: ch,
                });
            }
            _ => out.push(ch),
        }
    }
    Ok(())
}

/// Rejects names that cannot start or continue an XML element name.
fn check_name(name: &str) -> Result<(), SerializationError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(SerializationError::InvalidElementName {
            name: name.to_string(),
        })
    }
}
