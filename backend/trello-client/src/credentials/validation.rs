//! Format checks for Trello developer keys and tokens.
//!
//! Runs before the remote check so obviously wrong values (empty, pasted
//! placeholders, truncated copies) fail without a round trip.

use crate::error::{CredentialKind, KeyValidationFailure, TrelloError};

use common::RedactedSecret;

/// Validation result for a credential.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(KeyValidationFailure),
}

/// Rules for one half of the key/token pair.
pub struct CredentialValidator {
    kind: CredentialKind,
    min_length: usize,
    max_length: usize,
    hexadecimal: bool,
}

impl CredentialValidator {
    /// Developer keys are 32 hex characters.
    pub fn key() -> Self {
        Self {
            kind: CredentialKind::Key,
            min_length: 32,
            max_length: 32,
            hexadecimal: true,
        }
    }

    /// Tokens are 64 hex characters for legacy tokens, or longer
    /// alphanumeric `ATTA...` tokens.
    pub fn token() -> Self {
        Self {
            kind: CredentialKind::Token,
            min_length: 32,
            max_length: 256,
            hexadecimal: false,
        }
    }

    pub fn for_kind(kind: CredentialKind) -> Self {
        match kind {
            CredentialKind::Key => Self::key(),
            CredentialKind::Token => Self::token(),
        }
    }

    pub fn validate(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return ValidationResult::Invalid(KeyValidationFailure::Empty);
        }

        // Placeholders first: "your-key-here" is more useful to report than "not hex".
        if let Some(pattern) = detect_placeholder(trimmed) {
            return ValidationResult::Invalid(KeyValidationFailure::PlaceholderDetected { pattern });
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return ValidationResult::Invalid(KeyValidationFailure::InvalidCharacters);
        }

        if self.hexadecimal && !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return ValidationResult::Invalid(KeyValidationFailure::NotHexadecimal);
        }

        let length = trimmed.len();
        if length < self.min_length {
            return ValidationResult::Invalid(KeyValidationFailure::TooShort {
                min: self.min_length,
                actual: length,
            });
        }

        if length > self.max_length {
            return ValidationResult::Invalid(KeyValidationFailure::TooLong {
                max: self.max_length,
                actual: length,
            });
        }

        ValidationResult::Valid
    }

    /// Validate and wrap the trimmed value in a [`RedactedSecret`].
    #[track_caller]
    pub fn validate_and_wrap(&self, value: &str) -> Result<RedactedSecret, TrelloError> {
        match self.validate(value) {
            ValidationResult::Valid => Ok(RedactedSecret::new(value.trim())),
            ValidationResult::Invalid(reason) => Err(TrelloError::key_validation(self.kind, reason)),
        }
    }
}

/// Detect common placeholder text copied from documentation.
fn detect_placeholder(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();

    static PATTERNS: &[(&str, &str)] = &[
        ("...", "ellipsis"),
        ("<your", "<your...>"),
        ("your-key", "your-key"),
        ("your_key", "your_key"),
        ("yourkey", "yourkey"),
        ("your-token", "your-token"),
        ("your_token", "your_token"),
        ("yourtoken", "yourtoken"),
        ("placeholder", "placeholder"),
        ("changeme", "changeme"),
        ("example", "example"),
        ("insert", "insert"),
        ("replace", "replace"),
        ("xxxx", "xxxx"),
    ];

    for (pattern, name) in PATTERNS {
        if lower.contains(pattern) {
            return Some(name);
        }
    }

    let mut chars = value.chars();
    if let Some(first) = chars.next() {
        if value.len() >= 10 && chars.all(|c| c == first) {
            return Some("repeated_char");
        }
    }

    None
}
