//! Error types for the webhook pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. The pipeline never
/// retries; these are surfaced to the caller wrapped in [`DeliveryError`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A record could not be turned into a wire payload.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The record's `Serialize` implementation failed.
    #[error("Record could not be dumped: {0}")]
    Dump(#[source] serde_json::Error),

    /// The record dumped to something other than a mapping of fields.
    #[error("Record must serialize to a mapping of fields, got {kind}")]
    NotAMapping {
        /// Kind of value the record produced
        kind: &'static str,
    },

    /// A field name cannot be used as an element name in the target format.
    #[error("Field '{name}' is not a valid element name")]
    InvalidElementName {
        /// The offending field name (after aliasing)
        name: String,
    },

    /// A text value holds a character the target format cannot carry.
    #[error("Field '{element}' contains character {character:?}, which XML 1.0 cannot represent")]
    InvalidCharacter {
        /// Element whose text holds the character
        element: String,
        /// The offending character
        character: char,
    },

    /// The formatted payload could not be encoded.
    #[error("Payload could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A payload could not be transmitted to its destination.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// No destination URL is configured for HTTP delivery.
    #[error("No webhook URL configured")]
    MissingUrl,

    /// The transport failed before a response was received.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a status outside 2xx/3xx.
    #[error("Non-success status {status}")]
    NonSuccessStatus {
        /// HTTP status code
        status: http::StatusCode,
        /// Response body (if available)
        body: Option<String>,
    },

    /// Writing the payload to disk failed.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The payload could not be encoded into request bytes.
    #[error("Payload could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Error type for the whole resolve/serialize/deliver pipeline.
///
/// Every failure surfaces to the caller of
/// [`resolve_producer`](super::resolve_producer) or
/// [`Producer::send_webhook`](super::Producer::send_webhook); nothing is
/// recovered internally.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No producer is registered under the requested name.
    #[error("Producer '{0}' is not registered.")]
    InvalidProducer(String),

    /// No deliverer is registered under the requested name.
    #[error("Deliverer '{0}' is not registered.")]
    InvalidDeliverer(String),

    /// No serializer is registered under the requested name.
    #[error("Serializer '{0}' is not registered.")]
    InvalidSerializer(String),

    /// The deliverer does not accept the serializer's format.
    #[error("Invalid format: {format}. Supported formats are: {supported:?}")]
    InvalidFormat {
        /// Format declared by the serializer
        format: String,
        /// Formats accepted by the deliverer
        supported: Vec<String>,
    },

    /// The record could not be serialized.
    #[error("Failed to serialize webhook: {0}")]
    Serialization(#[from] SerializationError),

    /// The payload could not be delivered.
    #[error("Failed to deliver webhook: {0}")]
    Delivery(#[from] DeliveryError),
}

impl WebhookError {
    /// Returns true for failures raised while resolving names or binding
    /// components, as opposed to failures of an individual delivery.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::InvalidProducer(_)
                | Self::InvalidDeliverer(_)
                | Self::InvalidSerializer(_)
                | Self::InvalidFormat { .. }
        )
    }
}
