//! Webhook pipeline: serializers, deliverers, producers and their registry.
//!
//! This module provides:
//! - Records and payloads ([`Record`], [`Payload`])
//! - Component configuration and call options ([`SerializerConfig`],
//!   [`DelivererConfig`], [`SerializeOptions`])
//! - Serializers ([`Serializer`], [`JsonSerializer`], [`XmlSerializer`])
//! - Deliverers ([`Deliverer`], [`HttpDeliverer`], [`FileDeliverer`])
//! - Producers ([`Producer`], [`DefaultProducer`])
//! - Name-based resolution ([`WebhookRegistry`], [`resolve_producer`])
//! - The HTTP transport seam ([`HttpClient`], [`ReqwestClient`])

mod client;
mod deliverer;
mod error;
mod file;
mod http;
mod options;
mod producer;
mod record;
pub mod registry;
mod serializer;
mod xml;

#[cfg(test)]
mod http_tests;
#[cfg(test)]
mod serializer_tests;
#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod xml_tests;

pub use client::ReqwestClient;
pub use deliverer::{Deliverer, HttpDeliverer, check_format};
pub use error::{DeliveryError, HttpError, SerializationError, WebhookError};
pub use file::FileDeliverer;
pub use http::{BasicAuth, HttpClient, HttpRequest, HttpResponse};
pub use options::{DelivererConfig, Mode, SerializeOptions, SerializerConfig};
pub use producer::{DefaultProducer, Producer};
pub use record::{Fields, Payload, Record};
pub use registry::{
    WebhookRegistry, register_deliverer, register_producer, register_serializer,
    resolve_producer,
};
pub use serializer::{JsonSerializer, Serializer};
pub use xml::XmlSerializer;
