//! Test helpers for the wiremock-backed integration tests.
//!
//! - A fake `/1/` API rooted at the mock server
//! - JSON builders for the Trello records the client decodes
//! - A connected client with a fast retry policy

use trello_client::{Board, OnValidationFailure, RetryConfig, TrelloClient, TrelloClientBuilder};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";
pub const TEST_TOKEN: &str = "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210";
pub const TEST_USERNAME: &str = "ada";

pub const BOARD_ID: &str = "5f1a2b3c4d5e6f7a8b9c0d1e";
pub const OTHER_BOARD_ID: &str = "5f1a2b3c4d5e6f7a8b9c0d99";

/// `<mock uri>/1/`, the mock equivalent of `https://api.trello.com/1/`.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/1/", server.uri())
}

/// Retry quickly so retry tests finish in milliseconds.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 2,
        initial_interval: Duration::from_millis(5),
        max_interval: Duration::from_millis(20),
        max_elapsed: Duration::from_secs(2),
    }
}

pub fn builder(server: &MockServer) -> TrelloClientBuilder {
    TrelloClientBuilder::default()
        .with_key(TEST_KEY)
        .with_token(TEST_TOKEN)
        .with_base_url(api_base(server))
        .with_retry(fast_retry())
}

pub async fn mount_member(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5a0000000000000000000001",
            "username": TEST_USERNAME,
            "fullName": "Ada Lovelace"
        })))
        .mount(server)
        .await;
}

/// A client with write access, connected against `server`.
pub async fn connected_client(server: &MockServer) -> TrelloClient {
    mount_member(server).await;
    builder(server)
        .connect(OnValidationFailure::Error)
        .await
        .expect("connect should succeed")
        .expect("strict mode never returns None")
}

/// Serve `BOARD_ID` and load it through `client`.
pub async fn fetch_board(server: &MockServer, client: &TrelloClient) -> Board {
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .mount(server)
        .await;
    Board::from_remote(client, BOARD_ID)
        .await
        .expect("board fetch should succeed")
        .expect("board should exist")
}

pub fn board_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "closed": false,
        "prefs": { "permissionLevel": "private" },
        "url": format!("https://trello.com/b/abcd1234/{}", name.to_lowercase()),
        "shortLink": "abcd1234"
    })
}

pub fn list_json(id: &str, name: &str, pos: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "closed": false,
        "idBoard": BOARD_ID,
        "pos": pos
    })
}

pub fn card_json(id: &str, name: &str, list_id: &str, pos: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "closed": false,
        "idList": list_id,
        "idBoard": BOARD_ID,
        "pos": pos,
        "labels": []
    })
}

pub fn label_json(id: &str, board_id: &str, name: &str, color: Option<&str>) -> Value {
    json!({
        "id": id,
        "idBoard": board_id,
        "name": name,
        "color": color
    })
}

/// Trello's body for a successful DELETE.
pub fn deleted_json() -> Value {
    json!({ "_value": null })
}

/// Serve the three deep load reads of `BOARD_ID`.
pub async fn mount_deep_load(server: &MockServer, lists: Value, cards: Value, labels: Value) {
    for (resource, body) in [("lists", lists), ("cards", cards), ("labels", labels)] {
        Mock::given(method("GET"))
            .and(path(format!("/1/boards/{BOARD_ID}/{resource}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}
