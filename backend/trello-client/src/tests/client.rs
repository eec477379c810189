// Unit tests for client construction and URL building
// None of these reach the network: without a token, connect only checks formats.

use super::TEST_KEY;
use crate::client::{OnValidationFailure, QueryParams, TrelloClient};
use crate::error::{CredentialKind, KeyValidationFailure, TrelloError};
use crate::{TRELLO_API_BASE_URL, TrelloClientBuilder};

async fn read_only_client(base_url: &str) -> TrelloClient {
    TrelloClientBuilder::default()
        .with_key(TEST_KEY)
        .with_base_url(base_url)
        .connect(OnValidationFailure::Error)
        .await
        .unwrap()
        .unwrap()
}

#[test]
fn given_constants_when_composed_then_base_url_points_at_api_version_one() {
    assert_eq!(TRELLO_API_BASE_URL, "https://api.trello.com/1/");
}

/// **VALUE**: Verifies the page is resolved under `/1/` and auth comes last.
///
/// **BUG THIS CATCHES**: `Url::join` with a leading `/` would drop the `/1` version
/// segment and every request would 404.
#[tokio::test]
async fn given_page_with_leading_slash_when_make_url_then_keeps_version_segment() {
    let client = read_only_client(TRELLO_API_BASE_URL).await;
    let params = QueryParams::new().with("fields", "name,desc");

    let url = client.make_url("/boards/abc", &params).unwrap();

    assert_eq!(
        url.as_str(),
        format!("https://api.trello.com/1/boards/abc?fields=name%2Cdesc&key={TEST_KEY}")
    );
}

/// **VALUE**: Verifies a base URL without a trailing slash still keeps its path.
#[tokio::test]
async fn given_base_url_without_trailing_slash_when_make_url_then_path_is_preserved() {
    let client = read_only_client("http://127.0.0.1:9999/mock/1").await;

    let url = client.make_url("members/me", &QueryParams::new()).unwrap();

    assert_eq!(url.path(), "/mock/1/members/me");
}

/// **VALUE**: Verifies an empty page is rejected instead of requesting the API root.
#[tokio::test]
async fn given_empty_page_when_make_url_then_validation_error() {
    let client = read_only_client(TRELLO_API_BASE_URL).await;

    for page in ["", "/", "   "] {
        let result = client.make_url(page, &QueryParams::new());
        assert!(matches!(result, Err(TrelloError::Validation { .. })), "page {page:?}");
    }
}

/// **VALUE**: Verifies caller-supplied `key`/`token` parameters cannot override auth.
///
/// **WHY THIS MATTERS**: Two `key=` pairs make Trello pick one arbitrarily; a request
/// could end up authenticated as a different account than the client represents.
#[tokio::test]
async fn given_reserved_params_when_make_url_then_client_credentials_win() {
    let client = read_only_client(TRELLO_API_BASE_URL).await;
    let params = QueryParams::new().with("key", "other").with("token", "other");

    let url = client.make_url("boards/abc", &params).unwrap();
    let keys: Vec<_> = url.query_pairs().filter(|(k, _)| k == "key").collect();

    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].1, TEST_KEY);
    assert!(url.query_pairs().all(|(k, _)| k != "token"));
}

#[tokio::test]
async fn given_read_only_client_when_inspected_then_no_user_and_cannot_write() {
    let client = read_only_client(TRELLO_API_BASE_URL).await;

    assert_eq!(client.user(), None);
    assert!(!client.can_write());
    assert_eq!(client.auth(), format!("key={TEST_KEY}"));
}

/// **VALUE**: Verifies the client's Debug output never contains the key.
#[tokio::test]
async fn given_client_when_debug_formatted_then_key_is_redacted() {
    let client = read_only_client(TRELLO_API_BASE_URL).await;

    let debug = format!("{client:?}");

    assert!(!debug.contains(TEST_KEY));
}

/// **VALUE**: Verifies the two failure modes of connect for a malformed key.
///
/// **WHY THIS MATTERS**: This is the one error-handling switch callers control.
/// Error mode must surface the reason; warn mode must yield `None`, never a client.
#[tokio::test]
async fn given_malformed_key_when_connect_then_error_or_none_by_mode() {
    let strict = TrelloClient::connect("not-a-key", None, true).await;
    let lenient = TrelloClient::connect("not-a-key", None, false).await;

    assert!(matches!(
        strict,
        Err(TrelloError::KeyValidation {
            credential: CredentialKind::Key,
            ..
        })
    ));
    assert!(matches!(lenient, Ok(None)));
}

#[tokio::test]
async fn given_missing_key_when_connect_then_empty_key_failure() {
    let result = TrelloClientBuilder::default()
        .connect(OnValidationFailure::Error)
        .await;

    match result {
        Err(TrelloError::KeyValidation { reason, .. }) => {
            assert_eq!(reason, KeyValidationFailure::Empty)
        }
        other => panic!("expected key validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies a malformed token fails locally before the remote check.
#[tokio::test]
async fn given_placeholder_token_when_connect_then_token_validation_error() {
    let result = TrelloClient::connect(TEST_KEY, Some("your-token-here".to_string()), true).await;

    assert!(matches!(
        result,
        Err(TrelloError::KeyValidation {
            credential: CredentialKind::Token,
            ..
        })
    ));
}

#[test]
fn given_bool_when_converted_then_true_means_error_mode() {
    assert_eq!(OnValidationFailure::from(true), OnValidationFailure::Error);
    assert_eq!(OnValidationFailure::from(false), OnValidationFailure::Warn);
}
