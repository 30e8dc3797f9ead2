//! Deliverer trait and the HTTP implementation.

use std::fmt;

use http::HeaderValue;
use http::header::CONTENT_TYPE;

use crate::config::Settings;

use super::options::{DelivererConfig, SerializeOptions};
use super::record::{Payload, Record};
use super::serializer::Serializer;
use super::{BasicAuth, DeliveryError, HttpClient, HttpRequest, ReqwestClient, WebhookError};

/// Transmits payloads produced by a bound [`Serializer`].
///
/// A deliverer is always constructed around exactly one serializer whose
/// format it accepts; see [`check_format`].
pub trait Deliverer: fmt::Debug + Send + Sync {
    /// Returns the configuration materialized at construction.
    fn config(&self) -> &DelivererConfig;

    /// Returns the bound serializer.
    fn serializer(&self) -> &dyn Serializer;

    /// Sends an already serialized payload. Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the payload cannot be transmitted.
    fn deliver_data(&self, payload: Payload) -> Result<(), DeliveryError>;

    /// Serializes `record` with the bound serializer, then transmits it.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Serialization`] or [`WebhookError::Delivery`].
    fn deliver(&self, record: &dyn Record, options: &SerializeOptions) -> Result<(), WebhookError> {
        tracing::info!("Delivering webhook for record: {record:?}");
        let payload = self.serializer().serialize(record, options)?;
        self.deliver_data(payload).inspect_err(|e| {
            tracing::error!("Failed to deliver webhook: {e}");
        })?;
        Ok(())
    }
}

/// Verifies that `config` accepts the serializer's format.
///
/// Every deliverer constructor calls this before building any state.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidFormat`] on mismatch.
pub fn check_format(
    config: &DelivererConfig,
    serializer: &dyn Serializer,
) -> Result<(), WebhookError> {
    let format = &serializer.config().format;
    if config.accepts(format) {
        return Ok(());
    }
    Err(WebhookError::InvalidFormat {
        format: format.clone(),
        supported: config.formats.iter().cloned().collect(),
    })
}

/// Deliverer that POSTs JSON payloads to the configured webhook URL.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
pub struct HttpDeliverer<H = ReqwestClient> {
    config: DelivererConfig,
    serializer: Box<dyn Serializer>,
    client: H,
    url: Option<url::Url>,
    auth: Option<BasicAuth>,
}

impl HttpDeliverer<ReqwestClient> {
    /// Creates an HTTP deliverer using a default [`ReqwestClient`].
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidFormat`] if the serializer is not JSON.
    pub fn new(serializer: Box<dyn Serializer>, settings: &Settings) -> Result<Self, WebhookError> {
        Self::with_client(ReqwestClient::new(), serializer, settings)
    }
}

impl<H> HttpDeliverer<H> {
    /// Builds the configuration of this deliverer.
    #[must_use]
    pub fn default_config() -> DelivererConfig {
        DelivererConfig::accepting(["json"])
    }

    /// Creates an HTTP deliverer around a caller-supplied client.
    ///
    /// URL and credentials are taken from `settings`; credentials are used
    /// only when both user and password are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidFormat`] if the serializer is not JSON.
    pub fn with_client(
        client: H,
        serializer: Box<dyn Serializer>,
        settings: &Settings,
    ) -> Result<Self, WebhookError> {
        let config = Self::default_config();
        check_format(&config, serializer.as_ref())?;

        Ok(Self {
            config,
            serializer,
            client,
            url: settings.webhook_url.clone(),
            auth: BasicAuth::from_parts(
                settings.http_auth_user.as_deref(),
                settings.http_auth_password.as_deref(),
            ),
        })
    }

    /// Returns the destination URL, if configured.
    #[must_use]
    pub const fn url(&self) -> Option<&url::Url> {
        self.url.as_ref()
    }

    /// Returns the credentials that will be sent, if any.
    #[must_use]
    pub const fn auth(&self) -> Option<&BasicAuth> {
        self.auth.as_ref()
    }
}

impl<H> fmt::Debug for HttpDeliverer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDeliverer")
            .field("config", &self.config)
            .field("serializer", &self.serializer)
            .field("url", &self.url)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl<H: HttpClient> Deliverer for HttpDeliverer<H> {
    fn config(&self) -> &DelivererConfig {
        &self.config
    }

    fn serializer(&self) -> &dyn Serializer {
        self.serializer.as_ref()
    }

    fn deliver_data(&self, payload: Payload) -> Result<(), DeliveryError> {
        let url = self.url.as_ref().ok_or(DeliveryError::MissingUrl)?;
        let body = payload.to_bytes().map_err(DeliveryError::Encode)?;

        let request = HttpRequest::post(url.clone())
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_auth(self.auth.clone())
            .with_body(body);

        tracing::info!("Sending HTTP POST to {url}");
        let response = self.client.request(request)?;

        if response.is_accepted() {
            tracing::debug!(status = %response.status, "Webhook accepted");
            return Ok(());
        }

        Err(DeliveryError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }
}
