// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

use crate::cli::Cli;
use crate::error::CliError;

use trello_client::credentials::load_env_credentials;
use trello_client::{OnValidationFailure, TrelloClient, TrelloConfig};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::io::stdout;

use log::info;

const LOG_DIR_NAME: &str = "logs";

/// Load config and credentials, connect, then run the requested command.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => TrelloConfig::default_dir()?,
    };
    let log_dir = cli
        .log_dir
        .unwrap_or_else(|| config_dir.join(LOG_DIR_NAME));

    create_dir_all(&log_dir).map_err(|e| CliError::Io {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::caller(),
    })?;
    logger::initialize(&log_dir, cli.verbose)?;

    info!("Config directory: {}", config_dir.display());
    let config = TrelloConfig::load(&config_dir)?;
    let credentials = load_env_credentials(&config.credentials)?;

    let client = TrelloClient::builder()
        .with_config(&config)
        .with_secrets(credentials.key, credentials.token)
        .connect(OnValidationFailure::Error)
        .await?
        .ok_or_else(|| CliError::Credentials {
            message: "Trello rejected the configured credentials".to_string(),
            location: ErrorLocation::caller(),
        })?;

    commands::execute(cli.command, &client, &mut stdout()).await
}
