//! Caller-facing producer.

use std::fmt;

use super::WebhookError;
use super::deliverer::Deliverer;
use super::options::SerializeOptions;
use super::record::Record;

/// Stable entry point for sending webhooks.
///
/// Callers only talk to a producer, so swapping the deliverer or serializer
/// behind it does not affect them.
pub trait Producer: fmt::Debug + Send + Sync {
    /// Returns the bound deliverer.
    fn deliverer(&self) -> &dyn Deliverer;

    /// Serializes and delivers `record`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Serialization`] or [`WebhookError::Delivery`].
    fn send_webhook(&self, record: &dyn Record, options: &SerializeOptions) -> Result<(), WebhookError> {
        tracing::info!("Producing webhook for record: {record:?}");
        self.deliverer().deliver(record, options)
    }
}

/// Passthrough producer registered as `"default"`.
#[derive(Debug)]
pub struct DefaultProducer {
    deliverer: Box<dyn Deliverer>,
}

impl DefaultProducer {
    /// Binds a producer to `deliverer`.
    #[must_use]
    pub fn new(deliverer: Box<dyn Deliverer>) -> Self {
        Self { deliverer }
    }
}

impl Producer for DefaultProducer {
    fn deliverer(&self) -> &dyn Deliverer {
        self.deliverer.as_ref()
    }
}
