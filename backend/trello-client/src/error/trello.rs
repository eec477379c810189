//! Error type for every Trello operation.
//!
//! - HTTP status codes are stored as [`HttpStatusCode`], never parsed back out of text
//! - `is_retryable()` and `is_not_found()` look at categories, not messages
//! - every variant carries an [`ErrorLocation`] captured with `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;

use std::fmt;

use thiserror::Error as ThisError;

/// Which half of the key/token pair a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Key,
    Token,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::Key => write!(f, "developer key"),
            CredentialKind::Token => write!(f, "token"),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum TrelloError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Trello API Error: HTTP {status_code} - {message} {location}")]
    Api {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential validation failed for {credential}: {reason} {location}")]
    KeyValidation {
        credential: CredentialKind,
        reason: KeyValidationFailure,
        location: ErrorLocation,
    },

    #[error("Entity Deleted Error: {entity} '{remote_id}' was deleted {location}")]
    EntityDeleted {
        entity: &'static str,
        remote_id: String,
        location: ErrorLocation,
    },

    #[error("Runtime Error: {message} {location}")]
    Runtime {
        message: String,
        location: ErrorLocation,
    },
}

/// Specific reasons a key or token was rejected before any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationFailure {
    Empty,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    NotHexadecimal,
    PlaceholderDetected { pattern: &'static str },
    InvalidCharacters,
    /// Trello refused the pair.
    Rejected { status_code: HttpStatusCode },
}

impl fmt::Display for KeyValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "value is empty"),
            Self::TooShort { min, actual } => {
                write!(f, "too short ({} chars, minimum {})", actual, min)
            }
            Self::TooLong { max, actual } => {
                write!(f, "too long ({} chars, maximum {})", actual, max)
            }
            Self::NotHexadecimal => write!(f, "must be hexadecimal"),
            Self::PlaceholderDetected { pattern } => {
                write!(f, "detected placeholder pattern '{}'", pattern)
            }
            Self::InvalidCharacters => write!(f, "contains invalid characters"),
            Self::Rejected { status_code } => {
                write!(f, "rejected by Trello (HTTP {})", status_code)
            }
        }
    }
}

impl TrelloError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        TrelloError::Validation {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn key_validation(credential: CredentialKind, reason: KeyValidationFailure) -> Self {
        TrelloError::KeyValidation {
            credential,
            reason,
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn entity_deleted(entity: &'static str, remote_id: impl Into<String>) -> Self {
        TrelloError::EntityDeleted {
            entity,
            remote_id: remote_id.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// Create from an HTTP response with an explicit status code.
    #[track_caller]
    pub fn from_http_response(status_code: u16, body: impl Into<String>) -> Self {
        TrelloError::Api {
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::caller(),
        }
    }

    /// Create from a reqwest error, keeping timeout/connect information.
    ///
    /// The request URL is dropped from the message: it carries `key` and `token`.
    #[track_caller]
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();
        let status = error.status();
        let message = error.without_url().to_string();

        if is_timeout || is_connection {
            return TrelloError::Network {
                message,
                is_timeout,
                is_connection,
                location: ErrorLocation::caller(),
            };
        }

        if let Some(status) = status {
            return TrelloError::Api {
                status_code: HttpStatusCode(status.as_u16()),
                message,
                location: ErrorLocation::caller(),
            };
        }

        TrelloError::Http {
            message,
            location: ErrorLocation::caller(),
        }
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            TrelloError::Network {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            TrelloError::Api { status_code, .. } => status_code.is_retryable(),
            TrelloError::Http { .. }
            | TrelloError::Json { .. }
            | TrelloError::UrlParse { .. }
            | TrelloError::Validation { .. }
            | TrelloError::KeyValidation { .. }
            | TrelloError::EntityDeleted { .. }
            | TrelloError::Runtime { .. } => false,
        }
    }

    /// The requested resource does not exist (or its id is malformed).
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrelloError::Api { status_code, .. } if status_code.is_missing_resource())
    }

    /// The key/token pair was refused, locally or by Trello.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            TrelloError::KeyValidation { .. } => true,
            TrelloError::Api { status_code, .. } => status_code.is_auth_failure(),
            _ => false,
        }
    }

    pub fn error_category(&self) -> &'static str {
        match self {
            TrelloError::Http { .. } => "http",
            TrelloError::Network { is_timeout: true, .. } => "timeout",
            TrelloError::Network { is_connection: true, .. } => "connection",
            TrelloError::Network { .. } => "network",
            TrelloError::Json { .. } => "json",
            TrelloError::UrlParse { .. } => "url",
            TrelloError::Api { status_code, .. } if status_code.is_client_error() => "client_error",
            TrelloError::Api { status_code, .. } if status_code.is_server_error() => "server_error",
            TrelloError::Api { .. } => "api",
            TrelloError::Validation { .. } => "validation",
            TrelloError::KeyValidation { .. } => "key_validation",
            TrelloError::EntityDeleted { .. } => "entity_deleted",
            TrelloError::Runtime { .. } => "runtime",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            TrelloError::Api { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}

impl From<url::ParseError> for TrelloError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        TrelloError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<reqwest::Error> for TrelloError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        TrelloError::from_reqwest(error)
    }
}

impl From<serde_json::Error> for TrelloError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        TrelloError::Json {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<ModelError> for TrelloError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        let message = match error {
            ModelError::Validation { message, .. } => message,
            other => other.to_string(),
        };
        TrelloError::Validation {
            message,
            location: ErrorLocation::caller(),
        }
    }
}
