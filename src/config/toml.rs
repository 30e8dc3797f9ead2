//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a file can set only what it needs; the rest
/// comes from the environment or built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Pipeline selection and destination
    #[serde(default)]
    pub webhook: WebhookSection,

    /// HTTP delivery options
    #[serde(default)]
    pub http: HttpSection,

    /// File delivery options
    #[serde(default)]
    pub file: FileSection,
}

/// Pipeline selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// Registered producer name
    pub producer: Option<String>,

    /// Registered deliverer name
    pub deliverer: Option<String>,

    /// Registered serializer name
    pub serializer: Option<String>,
}

/// HTTP delivery section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Basic auth username
    pub auth_user: Option<String>,

    /// Basic auth password
    pub auth_password: Option<String>,
}

/// File delivery section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSection {
    /// Directory payloads are written into
    pub output_dir: Option<PathBuf>,

    /// Name of the payload file
    pub file_name: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# typed-webhooks configuration file
#
# Every value can also be set through a WEBHOOKS_* environment variable
# (for example WEBHOOKS_WEBHOOK_URL), which takes precedence over this file.

[webhook]
# Destination for the "http" deliverer
# url = "https://api.example.com/webhook"

# Registered component names
producer = "default"
deliverer = "http"
serializer = "json"

[http]
# Basic auth is sent only when both values are non-empty
# auth_user = "user"
# auth_password = "secret"

[file]
# Used by the "file" deliverer
# output_dir = "."
# file_name = "webhook.xml"
"#
    .to_string()
}

/// Writes the configuration template to `path`.
///
/// # Errors
///
/// Returns [`ConfigError::FileWrite`] if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, default_config_template()).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
