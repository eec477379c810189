use crate::helpers::{BOARD_ID, board_json, builder, connected_client, mount_member};

use trello_client::{Board, Entity, OnValidationFailure, RetryConfig, TrelloError};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a rate-limited request is retried and then succeeds.
///
/// **BUG THIS CATCHES**: Trello rate limits bursts with 429; without retrying,
/// deep loads of large boards fail intermittently.
#[tokio::test]
async fn given_rate_limit_when_fetching_then_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(429).set_body_string("API_TOKEN_LIMIT_EXCEEDED"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let board = Board::from_remote(&client, BOARD_ID).await.unwrap();

    assert_eq!(board.unwrap().name(), "Roadmap");
}

#[tokio::test]
async fn given_persistent_outage_when_fetching_then_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(3)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let result = Board::from_remote(&client, BOARD_ID).await;

    match result {
        Err(error) => {
            assert_eq!(error.status_code(), Some(503));
            assert!(error.is_retryable());
        }
        Ok(board) => panic!("expected outage error, got {board:?}"),
    }
}

/// **VALUE**: Verifies client errors are returned immediately.
#[tokio::test]
async fn given_bad_request_when_updating_then_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid value for desc"))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();

    board.set_description("x");
    let result = board.update(false).await;

    assert!(matches!(result, Err(TrelloError::Api { .. })));
    assert!(board.is_dirty());
}

#[tokio::test]
async fn given_retry_disabled_when_rate_limited_then_single_attempt() {
    let server = MockServer::start().await;
    mount_member(&server).await;
    Mock::given(method("GET"))
        .and(path("/1/members/me/boards"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;
    let client = builder(&server)
        .with_retry(RetryConfig::disabled())
        .connect(OnValidationFailure::Error)
        .await
        .unwrap()
        .unwrap();

    let result = Board::fetch_all_from(&client).await;

    assert_eq!(result.unwrap_err().status_code(), Some(429));
}
