//! Async client for the Trello REST API.
//!
//! ```rust,ignore
//! use trello_client::{Board, Entity, OnValidationFailure, TrelloClient};
//!
//! let client = TrelloClient::connect(key, Some(token), OnValidationFailure::Error)
//!     .await?
//!     .expect("validation failures are errors in this mode");
//!
//! let mut board = Board::create(&client, "Roadmap", false).await?;
//! board.set_description("Next quarter");
//! board.update(false).await?;
//!
//! board.deep_load().await?;
//! for list in board.lists().unwrap_or_default() {
//!     println!("{} ({} cards)", list.name(), list.cards().len());
//! }
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod credentials;
pub mod entity;
pub mod error;

#[cfg(test)]
mod tests;

pub use client::{OnValidationFailure, QueryParams, QueryValue, RetryConfig, TrelloClient, TrelloClientBuilder};
pub use config::TrelloConfig;
pub use credentials::Credentials;
pub use entity::{Board, Card, Entity, Label, List};
pub use error::{ConfigError, TrelloError};
pub use models::LabelColor;

pub const TRELLO_API_HOST: &str = "api.trello.com";
pub const TRELLO_API_VERSION: &str = "1";
pub const TRELLO_API_BASE_URL: &str =
    const_format::concatcp!("https://", TRELLO_API_HOST, "/", TRELLO_API_VERSION, "/");
