//! Shared value types for the Trello workspace.
//!
//! Nothing in here talks to the network. These are the small building
//! blocks every other crate leans on:
//!
//! - [`ErrorLocation`]: source position attached to every error variant
//! - [`RedactedSecret`]: developer keys and tokens that never leak into logs
//! - [`HttpStatusCode`]: status classification used by retry decisions

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
