//! Sends the demonstration record through the configured pipeline.

use serde::Serialize;

use typed_webhooks::config::Settings;
use typed_webhooks::webhook::{
    Deliverer, FileDeliverer, SerializeOptions, Serializer, WebhookError, XmlSerializer,
    register_deliverer, register_serializer, resolve_producer,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Name the file deliverer is registered under.
pub const FILE_DELIVERER: &str = "file";

/// Name the XML serializer is registered under.
pub const XML_SERIALIZER: &str = "xml";

/// Record sent by the command.
#[derive(Debug, Serialize)]
pub struct SampleRecord {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub number: f64,
}

impl Default for SampleRecord {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Test".to_string(),
            description: "This is a test".to_string(),
            number: 42.0,
        }
    }
}

/// Makes the file/XML pair selectable by name alongside the built-ins.
pub fn register_extensions() {
    register_deliverer(FILE_DELIVERER, file_deliverer);
    register_serializer(XML_SERIALIZER, xml_serializer);
}

fn file_deliverer(
    serializer: Box<dyn Serializer>,
    settings: &Settings,
) -> Result<Box<dyn Deliverer>, WebhookError> {
    Ok(Box::new(FileDeliverer::new(serializer, settings)?))
}

fn xml_serializer() -> Box<dyn Serializer> {
    Box::new(XmlSerializer::new())
}

/// Resolves a producer from `settings` and sends one [`SampleRecord`].
pub fn execute(settings: &Settings) -> Result<(), WebhookError> {
    register_extensions();

    let producer = resolve_producer(settings)?;
    producer.send_webhook(&SampleRecord::default(), &SerializeOptions::new())?;

    tracing::info!("Webhook sent");
    Ok(())
}
