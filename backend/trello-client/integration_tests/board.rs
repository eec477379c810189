use crate::helpers::{
    BOARD_ID, board_json, card_json, connected_client, deleted_json, label_json, list_json,
};

use trello_client::{Board, Entity, TrelloError};

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies board creation sends the name, visibility and no default lists.
///
/// **BUG THIS CATCHES**: Would catch the `prefs` map being sent as a nested value
/// instead of Trello's flattened `prefs_permissionLevel` parameter.
#[tokio::test]
async fn given_name_when_creating_board_then_posts_flattened_prefs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/boards"))
        .and(query_param("name", "Roadmap"))
        .and(query_param("defaultLists", "false"))
        .and(query_param("prefs_permissionLevel", "public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": BOARD_ID,
            "name": "Roadmap",
            "prefs": { "permissionLevel": "public" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let board = Board::create(&client, "Roadmap", true).await.unwrap();

    assert_eq!(board.remote_id(), BOARD_ID);
    assert_eq!(board.name(), "Roadmap");
    assert!(board.is_public());
    assert!(board.is_loaded());
    assert!(!board.is_dirty());
    assert!(board.lists().is_none());
}

#[tokio::test]
async fn given_blank_name_when_creating_board_then_validation_error_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/boards"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let result = Board::create(&client, "   ", false).await;

    assert!(matches!(result, Err(TrelloError::Validation { .. })));
}

#[tokio::test]
async fn given_existing_id_when_fetching_board_then_board_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();

    assert_eq!(board.name(), "Roadmap");
    assert_eq!(board.short_link(), Some("abcd1234"));
    assert!(!board.is_public());
}

/// **VALUE**: Verifies a missing board is `None`, not an error.
#[tokio::test]
async fn given_unknown_id_when_fetching_board_then_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("The requested resource was not found."))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let board = Board::from_remote(&client, BOARD_ID).await.unwrap();

    assert!(board.is_none());
}

#[tokio::test]
async fn given_malformed_id_when_fetching_board_then_none_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/not-a-board"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let board = Board::from_remote(&client, "not-a-board").await.unwrap();

    assert!(board.is_none());
}

#[tokio::test]
async fn given_member_boards_when_fetching_all_then_every_board_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/members/me/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            board_json(BOARD_ID, "Roadmap"),
            board_json("5f1a2b3c4d5e6f7a8b9c0d1f", "Chores"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;

    let boards = Board::fetch_all_from(&client).await.unwrap();

    let names: Vec<&str> = boards.iter().map(|board| board.name()).collect();
    assert_eq!(names, ["Roadmap", "Chores"]);
}

/// **VALUE**: Verifies deep load groups cards under their lists, ordered by position.
///
/// **BUG THIS CATCHES**: Would catch cards attached to the wrong list, lists kept in
/// response order instead of board order, or a card on an unknown list crashing the load.
#[tokio::test]
async fn given_board_when_deep_loading_then_lists_cards_and_labels_are_assembled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}/lists")))
        .and(query_param("filter", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            list_json("L2", "Done", 2048.0),
            list_json("L1", "Todo", 1024.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}/cards")))
        .and(query_param("filter", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            card_json("C3", "Ship it", "L2", 100.0),
            card_json("C2", "Write docs", "L1", 200.0),
            card_json("C1", "Plan", "L1", 100.0),
            card_json("C9", "Stray", "L-unknown", 1.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}/labels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            label_json("B1", BOARD_ID, "Bug", Some("red")),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();
    assert!(!board.is_deep_loaded());

    board.deep_load().await.unwrap();

    let lists = board.lists().unwrap();
    let list_names: Vec<&str> = lists.iter().map(|list| list.name()).collect();
    assert_eq!(list_names, ["Todo", "Done"]);

    let todo_cards: Vec<&str> = lists[0].cards().iter().map(|card| card.name()).collect();
    assert_eq!(todo_cards, ["Plan", "Write docs"]);
    assert_eq!(lists[1].cards().len(), 1);
    assert_eq!(board.cards().unwrap().count(), 3);

    assert_eq!(board.labels().unwrap().len(), 1);
    assert_eq!(board.label("B1").unwrap().name(), "Bug");
    assert!(board.list("L1").unwrap().card("C2").is_some());
}

/// **VALUE**: Verifies `update` only sends what changed and skips clean entities.
///
/// **BUG THIS CATCHES**: Re-sending every field on each update would overwrite
/// concurrent edits made by other Trello users.
#[tokio::test]
async fn given_changed_description_when_updating_then_only_description_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .mount(&server)
        .await;
    let mut updated = board_json(BOARD_ID, "Roadmap");
    updated["desc"] = json!("Next quarter");
    Mock::given(method("PUT"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .and(query_param("desc", "Next quarter"))
        .and(query_param_is_missing("name"))
        .and(query_param_is_missing("closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();

    board.set_description("Next quarter");
    assert!(board.is_dirty());
    let first = board.update(false).await.unwrap();
    let second = board.update(false).await.unwrap();

    assert!(first);
    assert!(!second);
    assert!(!board.is_dirty());
    assert_eq!(board.description(), "Next quarter");
}

#[tokio::test]
async fn given_clean_board_when_force_updating_then_every_field_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .and(query_param("name", "Roadmap"))
        .and(query_param("desc", ""))
        .and(query_param("closed", "false"))
        .and(query_param("prefs/permissionLevel", "private"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();

    let sent = board.update(true).await.unwrap();

    assert!(sent);
}

#[tokio::test]
async fn given_local_edits_when_pulling_then_remote_values_win() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .expect(2)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();

    board.set_name("Local rename");
    board.pull().await.unwrap();

    assert_eq!(board.name(), "Roadmap");
    assert!(!board.is_dirty());
}

/// **VALUE**: Verifies a deleted board refuses further remote operations.
#[tokio::test]
async fn given_deleted_board_when_updating_then_entity_deleted_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json(BOARD_ID, "Roadmap")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_json()))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = Board::from_remote(&client, BOARD_ID).await.unwrap().unwrap();

    board.delete().await.unwrap();

    assert!(!board.is_loaded());
    assert!(matches!(
        board.update(true).await,
        Err(TrelloError::EntityDeleted { entity: "board", .. })
    ));
    assert!(matches!(board.pull().await, Err(TrelloError::EntityDeleted { .. })));
    assert!(matches!(board.delete().await, Err(TrelloError::EntityDeleted { .. })));
}
