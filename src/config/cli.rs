//! CLI argument parsing using clap.
//!
//! Without a subcommand the binary sends one sample record through the
//! configured pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// typed-webhooks: deliver typed records as webhooks
///
/// Serializes a sample record with the configured serializer and hands it
/// to the configured deliverer.
#[derive(Debug, Default, Parser)]
#[command(name = "typed-webhooks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Webhook URL for HTTP delivery
    #[arg(long)]
    pub url: Option<String>,

    /// Registered producer name
    #[arg(long)]
    pub producer: Option<String>,

    /// Registered deliverer name
    #[arg(long)]
    pub deliverer: Option<String>,

    /// Registered serializer name
    #[arg(long)]
    pub serializer: Option<String>,

    /// Basic auth username for HTTP delivery
    #[arg(long = "auth-user")]
    pub auth_user: Option<String>,

    /// Basic auth password for HTTP delivery
    #[arg(long = "auth-password")]
    pub auth_password: Option<String>,

    /// Output directory for file delivery
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for typed-webhooks
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "typed-webhooks.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
