//! Default values for configuration options.

/// Prefix of every environment variable read by [`Settings`](super::Settings).
pub const ENV_PREFIX: &str = "WEBHOOKS_";

/// Default producer name.
pub const PRODUCER: &str = "default";

/// Default deliverer name.
pub const DELIVERER: &str = "http";

/// Default serializer name.
pub const SERIALIZER: &str = "json";

/// Default output directory for file delivery.
pub const FILE_OUTPUT_DIR: &str = ".";

/// Default file name for file delivery.
pub const FILE_NAME: &str = "webhook.xml";
