//! File-based deliverer.

use std::path::{Path, PathBuf};

use crate::config::Settings;

use super::DeliveryError;
use super::WebhookError;
use super::deliverer::{Deliverer, check_format};
use super::options::DelivererConfig;
use super::record::Payload;
use super::serializer::Serializer;

/// Deliverer that writes each payload verbatim to a fixed file.
///
/// The target is `<FILE_OUTPUT_DIR>/<FILE_NAME>`; every delivery replaces
/// the previous content.
///
/// # Atomic Writes
///
/// Writes to `{path}.tmp` and renames it over `{path}`, so readers see
/// either the previous payload or the new one.
#[derive(Debug)]
pub struct FileDeliverer {
    config: DelivererConfig,
    serializer: Box<dyn Serializer>,
    path: PathBuf,
}

impl FileDeliverer {
    /// Creates a file deliverer accepting XML payloads.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidFormat`] if the serializer is not XML.
    pub fn new(serializer: Box<dyn Serializer>, settings: &Settings) -> Result<Self, WebhookError> {
        Self::accepting(DelivererConfig::accepting(["xml"]), serializer, settings)
    }

    /// Creates a file deliverer accepting the formats in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidFormat`] if `config` does not accept the
    /// serializer's format.
    pub fn accepting(
        config: DelivererConfig,
        serializer: Box<dyn Serializer>,
        settings: &Settings,
    ) -> Result<Self, WebhookError> {
        check_format(&config, serializer.as_ref())?;

        Ok(Self {
            config,
            serializer,
            path: settings.file_output_dir.join(&settings.file_name),
        })
    }

    /// Returns the path payloads are written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, content: &[u8]) -> Result<(), DeliveryError> {
        let write_error = |source: std::io::Error| DeliveryError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, content).map_err(write_error)?;
        std::fs::rename(&tmp, &self.path).map_err(write_error)
    }
}

impl Deliverer for FileDeliverer {
    fn config(&self) -> &DelivererConfig {
        &self.config
    }

    fn serializer(&self) -> &dyn Serializer {
        self.serializer.as_ref()
    }

    fn deliver_data(&self, payload: Payload) -> Result<(), DeliveryError> {
        let content = payload.to_bytes().map_err(DeliveryError::Encode)?;
        tracing::info!("Writing webhook to {}", self.path.display());
        self.write_atomic(&content)
    }
}
