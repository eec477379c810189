//! Trello wire models.
//!
//! Plain data decoded from (and validated before being sent to) the Trello
//! REST API. There is no I/O here; `trello-client` wraps these records in
//! entities that know how to push and pull them.
//!
//! ## Architecture
//!
//! - **common**: error locations, redacted secrets, status codes
//! - **models** (this crate): wire records and draft validation
//! - **trello-client**: the client and its entities
//! - **trello-cli**: command-line wiring

pub mod board;
pub mod card;
pub mod draft;
pub mod error;
pub mod label;
pub mod label_color;
pub mod list;
pub mod member;

#[cfg(test)]
mod tests;

pub use board::{BoardData, BoardPrefs, PermissionLevel};
pub use card::CardData;
pub use draft::{BoardDraft, BoardDraftBuilder, MAX_NAME_LENGTH, validate_name};
pub use error::model_error::ModelError;
pub use label::LabelData;
pub use label_color::LabelColor;
pub use list::ListData;
pub use member::MemberData;
