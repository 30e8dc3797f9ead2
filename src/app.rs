//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use typed_webhooks::config::ConfigError;
use typed_webhooks::webhook::{DeliveryError, WebhookError};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid settings, unknown component names, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - serialization or delivery failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if matches!(error, ConfigError::FileRead { .. }) {
        eprintln!("\nRun 'typed-webhooks init' to generate a configuration template.");
    }
}

/// Prints helpful hints for pipeline errors.
pub fn print_webhook_hint(error: &WebhookError) {
    match error {
        WebhookError::Delivery(DeliveryError::MissingUrl) => {
            eprintln!("\nSet WEBHOOKS_WEBHOOK_URL or pass --url.");
        }
        WebhookError::InvalidFormat { .. } => {
            eprintln!("\nPick a serializer whose format the deliverer accepts (--serializer).");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
