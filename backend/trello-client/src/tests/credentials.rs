// Unit tests for credential format validation and environment loading

use super::{TEST_KEY, TEST_TOKEN};
use crate::config::CredentialSources;
use crate::credentials::validation::{CredentialValidator, ValidationResult};
use crate::credentials::{Credentials, load_env_credentials};
use crate::error::{ConfigError, KeyValidationFailure};

use common::RedactedSecret;

use serial_test::serial;

fn invalid(result: ValidationResult) -> KeyValidationFailure {
    match result {
        ValidationResult::Invalid(reason) => reason,
        ValidationResult::Valid => panic!("expected validation failure"),
    }
}

/// **VALUE**: Verifies real-shaped keys and tokens pass, including surrounding whitespace.
///
/// **WHY THIS MATTERS**: Values pasted into `.env` files often carry a trailing newline
/// or space; rejecting them would be a confusing false negative.
#[test]
fn given_well_formed_credentials_when_validated_then_valid() {
    assert_eq!(CredentialValidator::key().validate(TEST_KEY), ValidationResult::Valid);
    assert_eq!(
        CredentialValidator::token().validate(&format!(" {TEST_TOKEN}\n")),
        ValidationResult::Valid
    );
    assert_eq!(
        CredentialValidator::token().validate(&format!("ATTA{TEST_TOKEN}0A1B2C3D")),
        ValidationResult::Valid
    );
}

#[test]
fn given_wrapped_credential_when_validated_then_value_is_trimmed() {
    let secret = CredentialValidator::key()
        .validate_and_wrap(&format!("  {TEST_KEY}  "))
        .unwrap();

    assert_eq!(secret.expose(), TEST_KEY);
}

/// **VALUE**: Verifies each failure reason for keys.
///
/// **BUG THIS CATCHES**: A truncated copy/paste (31 chars) or a token pasted into the
/// key slot (64 chars) must be reported as a length problem, not sent to Trello.
#[test]
fn given_malformed_keys_when_validated_then_reports_specific_reason() {
    let validator = CredentialValidator::key();

    assert_eq!(invalid(validator.validate("   ")), KeyValidationFailure::Empty);
    assert_eq!(
        invalid(validator.validate(&TEST_KEY[..31])),
        KeyValidationFailure::TooShort { min: 32, actual: 31 }
    );
    assert_eq!(
        invalid(validator.validate(TEST_TOKEN)),
        KeyValidationFailure::TooLong { max: 32, actual: 64 }
    );
    assert_eq!(
        invalid(validator.validate("0123456789abcdef0123456789abcdeg")),
        KeyValidationFailure::NotHexadecimal
    );
    assert_eq!(
        invalid(validator.validate("0123456789abcdef-0123456789abcde")),
        KeyValidationFailure::InvalidCharacters
    );
}

#[test]
fn given_placeholder_values_when_validated_then_placeholder_detected() {
    let validator = CredentialValidator::token();

    assert!(matches!(
        invalid(validator.validate("<your token>")),
        KeyValidationFailure::PlaceholderDetected { .. }
    ));
    assert!(matches!(
        invalid(validator.validate("YOURTOKENHEREYOURTOKENHEREYOURTOKENHERE")),
        KeyValidationFailure::PlaceholderDetected { pattern: "yourtoken" }
    ));
    assert!(matches!(
        invalid(CredentialValidator::key().validate(&"0".repeat(32))),
        KeyValidationFailure::PlaceholderDetected { pattern: "repeated_char" }
    ));
}

#[test]
fn given_credentials_when_auth_query_built_then_key_precedes_token() {
    let credentials = Credentials::new(
        RedactedSecret::new(TEST_KEY),
        Some(RedactedSecret::new(TEST_TOKEN)),
    );

    assert_eq!(credentials.auth_query(), format!("key={TEST_KEY}&token={TEST_TOKEN}"));
    assert!(credentials.has_token());
}

fn sources(prefix: &str) -> CredentialSources {
    CredentialSources {
        key_env: format!("{prefix}_KEY"),
        token_env: format!("{prefix}_TOKEN"),
    }
}

/// **VALUE**: Verifies key and token are read from the configured variables.
#[test]
#[serial]
fn given_env_vars_set_when_loading_credentials_then_both_are_returned() {
    let sources = sources("TRELLO_TEST_BOTH");
    unsafe {
        std::env::set_var(&sources.key_env, TEST_KEY);
        std::env::set_var(&sources.token_env, TEST_TOKEN);
    }

    let loaded = load_env_credentials(&sources).unwrap();

    assert_eq!(loaded.key.expose(), TEST_KEY);
    assert_eq!(loaded.token.as_ref().map(|t| t.expose()), Some(TEST_TOKEN));

    unsafe {
        std::env::remove_var(&sources.key_env);
        std::env::remove_var(&sources.token_env);
    }
}

/// **VALUE**: Verifies an empty token variable means read-only access, not an error.
#[test]
#[serial]
fn given_empty_token_var_when_loading_credentials_then_token_is_none() {
    let sources = sources("TRELLO_TEST_EMPTY");
    unsafe {
        std::env::set_var(&sources.key_env, TEST_KEY);
        std::env::set_var(&sources.token_env, "");
    }

    let loaded = load_env_credentials(&sources).unwrap();

    assert!(loaded.token.is_none());

    unsafe {
        std::env::remove_var(&sources.key_env);
        std::env::remove_var(&sources.token_env);
    }
}

#[test]
#[serial]
fn given_missing_key_var_when_loading_credentials_then_missing_credential_error() {
    let sources = sources("TRELLO_TEST_MISSING");
    unsafe {
        std::env::remove_var(&sources.key_env);
    }

    let result = load_env_credentials(&sources);

    match result {
        Err(ConfigError::MissingCredential { variable, .. }) => {
            assert_eq!(variable, "TRELLO_TEST_MISSING_KEY")
        }
        other => panic!("expected MissingCredential, got {other:?}"),
    }
}
