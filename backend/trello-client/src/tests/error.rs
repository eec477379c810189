// Unit tests for TrelloError classification

use crate::error::{CredentialKind, KeyValidationFailure, TrelloError};

use common::HttpStatusCode;
use models::ModelError;

/// **VALUE**: Verifies only rate limiting and gateway failures are retried.
///
/// **BUG THIS CATCHES**: Retrying a 400 or 404 hammers Trello with a request that
/// can never succeed and delays the real error by the whole backoff window.
#[test]
fn given_api_errors_when_checking_retryable_then_only_transient_statuses_retry() {
    for status in [429, 502, 503, 504] {
        assert!(
            TrelloError::from_http_response(status, "busy").is_retryable(),
            "{status} should retry"
        );
    }
    for status in [400, 401, 403, 404, 500] {
        assert!(
            !TrelloError::from_http_response(status, "no").is_retryable(),
            "{status} should not retry"
        );
    }
}

#[test]
fn given_network_errors_when_checking_retryable_then_timeouts_and_connects_retry() {
    let timeout = TrelloError::Network {
        message: "timed out".to_string(),
        is_timeout: true,
        is_connection: false,
        location: common::ErrorLocation::caller(),
    };
    let other = TrelloError::Network {
        message: "reset".to_string(),
        is_timeout: false,
        is_connection: false,
        location: common::ErrorLocation::caller(),
    };

    assert!(timeout.is_retryable());
    assert_eq!(timeout.error_category(), "timeout");
    assert!(!other.is_retryable());
    assert_eq!(other.error_category(), "network");
}

#[test]
fn given_missing_resource_statuses_when_checking_not_found_then_true() {
    assert!(TrelloError::from_http_response(404, "The requested resource was not found.").is_not_found());
    assert!(TrelloError::from_http_response(400, "invalid id").is_not_found());
    assert!(!TrelloError::from_http_response(401, "unauthorized").is_not_found());
    assert!(!TrelloError::validation("bad").is_not_found());
}

#[test]
fn given_auth_errors_when_checking_auth_failure_then_true() {
    let local = TrelloError::key_validation(CredentialKind::Key, KeyValidationFailure::Empty);
    let remote = TrelloError::key_validation(
        CredentialKind::Token,
        KeyValidationFailure::Rejected {
            status_code: HttpStatusCode(401),
        },
    );

    assert!(local.is_auth_failure());
    assert!(remote.is_auth_failure());
    assert!(TrelloError::from_http_response(401, "invalid token").is_auth_failure());
    assert!(!TrelloError::from_http_response(503, "down").is_auth_failure());
}

#[test]
fn given_api_error_when_inspected_then_status_and_category_exposed() {
    let error = TrelloError::from_http_response(503, "Service Unavailable");

    assert_eq!(error.status_code(), Some(503));
    assert_eq!(error.error_category(), "server_error");
    assert_eq!(TrelloError::from_http_response(404, "").error_category(), "client_error");
    assert_eq!(TrelloError::validation("x").status_code(), None);
}

/// **VALUE**: Verifies display strings name the credential without its value.
#[test]
fn given_key_validation_error_when_displayed_then_names_credential_and_reason() {
    let error = TrelloError::key_validation(
        CredentialKind::Key,
        KeyValidationFailure::TooShort { min: 32, actual: 8 },
    );

    let text = error.to_string();

    assert!(text.contains("developer key"));
    assert!(text.contains("too short (8 chars, minimum 32)"));
}

#[test]
fn given_model_validation_error_when_converted_then_message_kept() {
    let error: TrelloError = ModelError::validation("Name cannot be empty").into();

    match error {
        TrelloError::Validation { message, .. } => assert_eq!(message, "Name cannot be empty"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn given_deleted_entity_error_when_displayed_then_names_entity() {
    let error = TrelloError::entity_deleted("board", "5f1a");

    assert!(error.to_string().contains("board '5f1a' was deleted"));
    assert_eq!(error.error_category(), "entity_deleted");
}
