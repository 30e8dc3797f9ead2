//! Resolved settings used to assemble the webhook pipeline.
//!
//! Settings are loaded once, eagerly, and never re-read. Each key is
//! resolved with the following priority (highest to lowest):
//!
//! 1. Explicit CLI arguments
//! 2. `WEBHOOKS_<KEY>` environment variables
//! 3. TOML config file
//! 4. Built-in defaults
//!
//! An empty CLI or environment value counts as unset and falls through to
//! the next source. An empty URL after every source is no URL.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::webhook::BasicAuth;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// The known setting names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// `WEBHOOK_URL`: destination of HTTP delivery (no default)
    WebhookUrl,
    /// `PRODUCER`: registered producer name
    Producer,
    /// `DELIVERER`: registered deliverer name
    Deliverer,
    /// `SERIALIZER`: registered serializer name
    Serializer,
    /// `HTTP_AUTH_USER`: Basic auth username (no default)
    HttpAuthUser,
    /// `HTTP_AUTH_PASSWORD`: Basic auth password (no default)
    HttpAuthPassword,
    /// `FILE_OUTPUT_DIR`: directory for file delivery
    FileOutputDir,
    /// `FILE_NAME`: file name for file delivery
    FileName,
}

impl SettingKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::WebhookUrl,
        Self::Producer,
        Self::Deliverer,
        Self::Serializer,
        Self::HttpAuthUser,
        Self::HttpAuthPassword,
        Self::FileOutputDir,
        Self::FileName,
    ];

    /// Returns the logical key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebhookUrl => "WEBHOOK_URL",
            Self::Producer => "PRODUCER",
            Self::Deliverer => "DELIVERER",
            Self::Serializer => "SERIALIZER",
            Self::HttpAuthUser => "HTTP_AUTH_USER",
            Self::HttpAuthPassword => "HTTP_AUTH_PASSWORD",
            Self::FileOutputDir => "FILE_OUTPUT_DIR",
            Self::FileName => "FILE_NAME",
        }
    }

    /// Returns the environment variable the key is read from.
    #[must_use]
    pub fn env_var(self) -> String {
        format!("{}{}", defaults::ENV_PREFIX, self.as_str())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Fully resolved settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Destination of HTTP delivery
    pub webhook_url: Option<Url>,

    /// Registered producer name
    pub producer: String,

    /// Registered deliverer name
    pub deliverer: String,

    /// Registered serializer name
    pub serializer: String,

    /// Basic auth username
    pub http_auth_user: Option<String>,

    /// Basic auth password
    pub http_auth_password: Option<String>,

    /// Directory for file delivery
    pub file_output_dir: PathBuf,

    /// File name for file delivery
    pub file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            producer: defaults::PRODUCER.to_string(),
            deliverer: defaults::DELIVERER.to_string(),
            serializer: defaults::SERIALIZER.to_string(),
            http_auth_user: None,
            http_auth_password: None,
            file_output_dir: PathBuf::from(defaults::FILE_OUTPUT_DIR),
            file_name: defaults::FILE_NAME.to_string(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("webhook_url", &self.webhook_url)
            .field("producer", &self.producer)
            .field("deliverer", &self.deliverer)
            .field("serializer", &self.serializer)
            .field("http_auth_user", &self.http_auth_user)
            .field(
                "http_auth_password",
                &self.http_auth_password.as_ref().map(|_| "***"),
            )
            .field("file_output_dir", &self.file_output_dir)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self
            .webhook_url
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);
        let sends_auth = BasicAuth::from_parts(
            self.http_auth_user.as_deref(),
            self.http_auth_password.as_deref(),
        )
        .is_some();
        let auth = if sends_auth { "basic" } else { "none" };

        write!(
            f,
            "Settings {{ producer: {}, deliverer: {}, serializer: {}, url: {url}, auth: {auth}, \
             file: {} }}",
            self.producer,
            self.deliverer,
            self.serializer,
            self.file_output_dir.join(&self.file_name).display(),
        )
    }
}

impl Settings {
    /// Loads settings from the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `WEBHOOKS_WEBHOOK_URL` is not a URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::merge(&Cli::default(), |name| std::env::var(name).ok(), None)
    }

    /// Loads settings for the command line: reads the TOML file named by
    /// `cli.config` and the process environment, then applies CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or the
    /// resolved URL is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = cli.config.as_deref().map(TomlConfig::load).transpose()?;
        Self::merge(cli, |name| std::env::var(name).ok(), toml.as_ref())
    }

    /// Merges every source by priority.
    ///
    /// `env` maps an environment variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the resolved URL is invalid.
    pub fn merge<E>(cli: &Cli, env: E, toml: Option<&TomlConfig>) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let env_value = |key: SettingKey| env(&key.env_var()).filter(|v| !v.is_empty());
        let pick = |cli: Option<&String>, key: SettingKey, file: Option<&String>| {
            cli.filter(|v| !v.is_empty())
                .cloned()
                .or_else(|| env_value(key))
                .or_else(|| file.cloned())
        };

        let webhook = toml.map(|t| &t.webhook);
        let http = toml.map(|t| &t.http);
        let file = toml.map(|t| &t.file);

        let webhook_url = pick(
            cli.url.as_ref(),
            SettingKey::WebhookUrl,
            webhook.and_then(|w| w.url.as_ref()),
        )
        .filter(|url| !url.is_empty())
        .map(|url| parse_url(&url))
        .transpose()?;

        let file_output_dir = cli
            .output_dir
            .clone()
            .or_else(|| env_value(SettingKey::FileOutputDir).map(PathBuf::from))
            .or_else(|| file.and_then(|f| f.output_dir.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::FILE_OUTPUT_DIR));

        Ok(Self {
            webhook_url,
            producer: pick(
                cli.producer.as_ref(),
                SettingKey::Producer,
                webhook.and_then(|w| w.producer.as_ref()),
            )
            .unwrap_or_else(|| defaults::PRODUCER.to_string()),
            deliverer: pick(
                cli.deliverer.as_ref(),
                SettingKey::Deliverer,
                webhook.and_then(|w| w.deliverer.as_ref()),
            )
            .unwrap_or_else(|| defaults::DELIVERER.to_string()),
            serializer: pick(
                cli.serializer.as_ref(),
                SettingKey::Serializer,
                webhook.and_then(|w| w.serializer.as_ref()),
            )
            .unwrap_or_else(|| defaults::SERIALIZER.to_string()),
            http_auth_user: pick(
                cli.auth_user.as_ref(),
                SettingKey::HttpAuthUser,
                http.and_then(|h| h.auth_user.as_ref()),
            ),
            http_auth_password: pick(
                cli.auth_password.as_ref(),
                SettingKey::HttpAuthPassword,
                http.and_then(|h| h.auth_password.as_ref()),
            ),
            file_output_dir,
            file_name: pick(
                None,
                SettingKey::FileName,
                file.and_then(|f| f.file_name.as_ref()),
            )
            .unwrap_or_else(|| defaults::FILE_NAME.to_string()),
        })
    }

    /// Looks up a setting by its logical name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if `key` is not a known setting.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.value(key.parse()?))
    }

    /// Returns the value of a setting as text.
    #[must_use]
    pub fn value(&self, key: SettingKey) -> Option<String> {
        match key {
            SettingKey::WebhookUrl => self.webhook_url.as_ref().map(ToString::to_string),
            SettingKey::Producer => Some(self.producer.clone()),
            SettingKey::Deliverer => Some(self.deliverer.clone()),
            SettingKey::Serializer => Some(self.serializer.clone()),
            SettingKey::HttpAuthUser => self.http_auth_user.clone(),
            SettingKey::HttpAuthPassword => self.http_auth_password.clone(),
            SettingKey::FileOutputDir => Some(self.file_output_dir.display().to_string()),
            SettingKey::FileName => Some(self.file_name.clone()),
        }
    }

    /// Sets the webhook URL.
    #[must_use]
    pub fn with_webhook_url(mut self, url: Url) -> Self {
        self.webhook_url = Some(url);
        self
    }

    /// Sets the producer name.
    #[must_use]
    pub fn with_producer(mut self, name: impl Into<String>) -> Self {
        self.producer = name.into();
        self
    }

    /// Sets the deliverer name.
    #[must_use]
    pub fn with_deliverer(mut self, name: impl Into<String>) -> Self {
        self.deliverer = name.into();
        self
    }

    /// Sets the serializer name.
    #[must_use]
    pub fn with_serializer(mut self, name: impl Into<String>) -> Self {
        self.serializer = name.into();
        self
    }

    /// Sets the Basic auth credentials.
    #[must_use]
    pub fn with_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.http_auth_user = Some(user.into());
        self.http_auth_password = Some(password.into());
        self
    }

    /// Sets the output directory for file delivery.
    #[must_use]
    pub fn with_file_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_output_dir = dir.into();
        self
    }
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
