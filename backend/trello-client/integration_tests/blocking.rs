use crate::helpers::{BOARD_ID, board_json, builder, mount_member};

use trello_client::blocking::BlockingClient;
use trello_client::{Entity, OnValidationFailure};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the blocking facade drives the async API from plain sync code.
///
/// The mock server lives on its own multi-thread runtime so the blocking client's
/// current-thread runtime never nests inside it.
#[test]
fn given_sync_caller_when_using_blocking_client_then_calls_complete() {
    let server_runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let server = server_runtime.block_on(async {
        let server = MockServer::start().await;
        mount_member(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/1/boards/{BOARD_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/1/boards/{BOARD_ID}")))
            .and(query_param("name", "Roadmap 2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap 2")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1/members/me/boards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([board_json(BOARD_ID, "Roadmap")])))
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let trello = BlockingClient::connect(builder(&server), OnValidationFailure::Error)
        .unwrap()
        .unwrap();
    assert_eq!(trello.client().user(), Some(crate::helpers::TEST_USERNAME));

    let mut board = trello.fetch_board(BOARD_ID).unwrap().unwrap();
    board.set_name("Roadmap 2");
    assert!(trello.update(&mut board, false).unwrap());
    assert_eq!(board.name(), "Roadmap 2");

    let boards = trello.fetch_all_boards().unwrap();
    assert_eq!(boards.len(), 1);

    server_runtime.block_on(async move { drop(server) });
}
