use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to write a credential out.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Credential Serialization Refused: {type_name} must be exposed explicitly {location}")]
    SerializationRefused {
        type_name: &'static str,
        location: ErrorLocation,
    },
}
