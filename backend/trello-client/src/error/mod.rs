pub mod config;
pub mod trello;

pub use config::ConfigError;
pub use trello::{CredentialKind, KeyValidationFailure, TrelloError};
