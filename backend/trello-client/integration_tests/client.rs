use crate::helpers::{
    TEST_KEY, TEST_TOKEN, TEST_USERNAME, api_base, builder, connected_client,
};

use trello_client::error::{CredentialKind, KeyValidationFailure};
use trello_client::{OnValidationFailure, RetryConfig, TrelloClient, TrelloError};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies connect checks the pair against `members/me` and records the username.
///
/// **BUG THIS CATCHES**: Would catch a probe that forgets the credentials, asks for
/// the wrong fields, or throws away the username it was given.
#[tokio::test]
async fn given_valid_token_when_connecting_then_username_is_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .and(query_param("fields", "username,fullName"))
        .and(query_param("key", TEST_KEY))
        .and(query_param("token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "username": TEST_USERNAME
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = builder(&server)
        .connect(OnValidationFailure::Error)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(client.user(), Some(TEST_USERNAME));
    assert!(client.can_write());
}

#[tokio::test]
async fn given_rejected_token_when_connecting_strictly_then_key_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let result = builder(&server).connect(OnValidationFailure::Error).await;

    match result {
        Err(TrelloError::KeyValidation {
            credential,
            reason: KeyValidationFailure::Rejected { status_code },
            ..
        }) => {
            assert_eq!(credential, CredentialKind::Token);
            assert_eq!(status_code.0, 401);
        }
        other => panic!("expected rejected token, got {other:?}"),
    }
}

/// **VALUE**: Verifies lenient mode turns a rejected pair into `Ok(None)`.
#[tokio::test]
async fn given_rejected_token_when_connecting_leniently_then_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let client = builder(&server)
        .connect(OnValidationFailure::Warn)
        .await
        .unwrap();

    assert!(client.is_none());
}

/// **VALUE**: Verifies server failures during the probe are errors even in lenient mode.
///
/// **BUG THIS CATCHES**: Treating a Trello outage as "bad credentials" would make a
/// caller discard perfectly good keys.
#[tokio::test]
async fn given_server_error_when_connecting_leniently_then_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let result = builder(&server)
        .with_retry(RetryConfig::disabled())
        .connect(OnValidationFailure::Warn)
        .await;

    assert!(matches!(result, Err(TrelloError::Api { .. })));
}

#[tokio::test]
async fn given_no_token_when_connecting_then_no_request_is_made() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = TrelloClient::builder()
        .with_key(TEST_KEY)
        .with_base_url(api_base(&server))
        .connect(OnValidationFailure::Error)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(client.user(), None);
    assert!(!client.can_write());
}

/// **VALUE**: Verifies every request carries the key and token after the caller's params.
#[tokio::test]
async fn given_connected_client_when_sending_then_auth_is_appended() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/search"))
        .and(query_param("query", "roadmap"))
        .and(query_param("key", TEST_KEY))
        .and(query_param("token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "boards": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let body: serde_json::Value = client
        .send_json(
            reqwest::Method::GET,
            "search",
            trello_client::QueryParams::new().with("query", "roadmap"),
        )
        .await
        .unwrap();

    assert_eq!(body["boards"], serde_json::json!([]));
}

/// **VALUE**: Verifies transport errors never carry the key or token.
///
/// **BUG THIS CATCHES**: reqwest's error text includes the request URL, and the
/// URL carries `key=` and `token=`. Without stripping it every connection failure
/// would print both credentials to the terminal and to `trello.log`.
#[tokio::test]
async fn given_unreachable_api_when_connecting_then_error_text_has_no_credentials() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = TrelloClient::builder()
        .with_key(TEST_KEY)
        .with_token(TEST_TOKEN)
        .with_base_url(format!("http://127.0.0.1:{port}/1/"))
        .with_retry(RetryConfig::disabled())
        .connect(OnValidationFailure::Warn)
        .await;

    let error = result.unwrap_err();
    let text = error.to_string();
    assert!(matches!(error, TrelloError::Network { is_connection: true, .. }));
    assert!(!text.contains(TEST_TOKEN), "token leaked: {text}");
    assert!(!text.contains(TEST_KEY), "key leaked: {text}");
    assert!(!format!("{error:?}").contains(TEST_TOKEN));
}
