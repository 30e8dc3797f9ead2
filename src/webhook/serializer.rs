//! Serializer trait and the JSON implementation.

use std::fmt;

use super::SerializationError;
use super::options::{Mode, SerializeOptions, SerializerConfig};
use super::record::{Fields, Payload, Record};

/// Converts a record into a format-specific [`Payload`].
///
/// Implementors supply their configuration and the format step; the
/// dump/filter/alias sequence in [`Serializer::serialize`] is shared.
pub trait Serializer: fmt::Debug + Send + Sync {
    /// Returns the configuration materialized at construction.
    fn config(&self) -> &SerializerConfig;

    /// Turns an already filtered and aliased mapping into the wire payload.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the mapping cannot be expressed in
    /// this format.
    fn format_data(&self, fields: Fields) -> Result<Payload, SerializationError>;

    /// Dumps `record`, applies `options`, then formats the result.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the record cannot be dumped under
    /// this serializer's mode or the format step fails.
    fn serialize(
        &self,
        record: &dyn Record,
        options: &SerializeOptions,
    ) -> Result<Payload, SerializationError> {
        let config = self.config();
        tracing::info!(format = %config.format, mode = %config.mode, "Serializing record: {record:?}");

        let fields = options.apply(record.dump(config.mode)?);
        self.format_data(fields)
    }
}

/// Serializer whose wire value is the JSON-mode field mapping itself.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    config: SerializerConfig,
}

impl JsonSerializer {
    /// Format tag of this serializer.
    pub const FORMAT: &'static str = "json";

    /// Creates a JSON serializer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SerializerConfig::new(Self::FORMAT, Mode::Json),
        }
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for JsonSerializer {
    fn config(&self) -> &SerializerConfig {
        &self.config
    }

    fn format_data(&self, fields: Fields) -> Result<Payload, SerializationError> {
        Ok(Payload::Fields(fields))
    }
}
