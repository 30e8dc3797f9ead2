//! Configuration layer for typed-webhooks.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Resolved settings ([`Settings`], [`SettingKey`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Each setting is resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **Environment** - `WEBHOOKS_<KEY>` variables, after `.env` is loaded
//! 3. **TOML config file**
//! 4. **Built-in defaults**
//!
//! `WEBHOOK_URL`, `HTTP_AUTH_USER` and `HTTP_AUTH_PASSWORD` have no default.
//! A missing URL is only an error once an HTTP deliverer tries to send.

mod cli;
pub mod defaults;
mod error;
mod settings;
mod toml;


pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use settings::{SettingKey, Settings};
pub use toml::{TomlConfig, default_config_template, write_default_config};
