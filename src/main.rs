//! typed-webhooks: deliver typed records as webhooks
//!
//! Entry point for the typed-webhooks demonstration command.

use std::process::ExitCode;

use typed_webhooks::config::{Cli, Command, Settings, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, print_webhook_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(cli.verbose);
    tracing::info!("{settings}");

    match run::execute(&settings) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Webhook error: {e}");
            print_webhook_hint(&e);
            if e.is_resolution() {
                exit_code::CONFIG_ERROR
            } else {
                exit_code::runtime_error()
            }
        }
    }
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}
