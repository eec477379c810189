use trello_client::{ConfigError, TrelloError};

use common::ErrorLocation;

use thiserror::Error;

/// Errors surfaced by the `trello` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Trello Error: {source} {location}")]
    Trello {
        #[source]
        source: TrelloError,
        location: ErrorLocation,
    },

    #[error("Config Error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    /// Connect returned no client.
    #[error("Credentials Error: {message} {location}")]
    Credentials {
        message: String,
        location: ErrorLocation,
    },

    /// A board, list or card named on the command line does not exist.
    #[error("Not Found Error: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<TrelloError> for CliError {
    #[track_caller]
    fn from(source: TrelloError) -> Self {
        CliError::Trello {
            source,
            location: ErrorLocation::caller(),
        }
    }
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        CliError::Config {
            source,
            location: ErrorLocation::caller(),
        }
    }
}

impl From<std::io::Error> for CliError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        CliError::Io {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
