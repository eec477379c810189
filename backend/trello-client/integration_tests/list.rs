use crate::helpers::{
    BOARD_ID, card_json, connected_client, deleted_json, fetch_board, list_json, mount_deep_load,
};

use trello_client::{Entity, List, TrelloError};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_board_when_creating_list_then_list_is_appended_at_bottom() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .and(query_param("name", "Backlog"))
        .and(query_param("idBoard", BOARD_ID))
        .and(query_param("pos", "bottom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Backlog", 65536.0)))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;

    let list = List::create(&board, "Backlog").await.unwrap();

    assert_eq!(list.remote_id(), "L1");
    assert_eq!(list.board_id(), BOARD_ID);
    assert_eq!(list.position(), 65536.0);
    assert!(list.cards().is_empty());
    assert!(board.lists().is_none());
}

#[tokio::test]
async fn given_renamed_list_when_updating_then_name_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Backlog", 1.0)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/1/lists/L1"))
        .and(query_param("name", "Icebox"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Icebox", 1.0)))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;
    let mut list = List::create(&board, "Backlog").await.unwrap();

    list.set_name("Icebox");
    let sent = list.update(false).await.unwrap();

    assert!(sent);
    assert_eq!(list.name(), "Icebox");
    assert!(!list.is_dirty());
}

/// **VALUE**: Verifies list deletion removes every card and archives the list.
///
/// **BUG THIS CATCHES**: Trello has no list DELETE endpoint; sending one would 404
/// and leave the cards behind.
#[tokio::test]
async fn given_list_with_cards_when_deleting_then_cards_deleted_and_list_archived() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Backlog", 1.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/lists/L1/cards"))
        .and(query_param("filter", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            card_json("C1", "One", "L1", 1.0),
            card_json("C2", "Two", "L1", 2.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    for card_id in ["C1", "C2"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/1/cards/{card_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(deleted_json()))
            .expect(1)
            .mount(&server)
            .await;
    }
    let mut archived = list_json("L1", "Backlog", 1.0);
    archived["closed"] = json!(true);
    Mock::given(method("PUT"))
        .and(path("/1/lists/L1/closed"))
        .and(query_param("value", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archived))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/1/lists/L1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;
    let mut list = List::create(&board, "Backlog").await.unwrap();

    list.delete().await.unwrap();

    assert!(!list.is_loaded());
    assert!(list.is_archived());
    assert!(matches!(list.pull().await, Err(TrelloError::EntityDeleted { entity: "list", .. })));
}

#[tokio::test]
async fn given_local_edits_when_pulling_list_then_remote_values_win() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Backlog", 1.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/lists/L1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Icebox", 4096.0)))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;
    let mut list = List::create(&board, "Backlog").await.unwrap();

    list.set_name("Local rename");
    list.set_archived(true);
    list.pull().await.unwrap();

    assert_eq!(list.name(), "Icebox");
    assert!(!list.is_archived());
    assert_eq!(list.position(), 4096.0);
    assert!(!list.is_dirty());
}

/// **VALUE**: Verifies a failed card delete leaves only the surviving cards on the list.
///
/// **BUG THIS CATCHES**: Cards already deleted on Trello must not linger locally,
/// or a retry of `delete` would try to delete them again.
#[tokio::test]
async fn given_card_delete_fails_midway_when_deleting_list_then_only_remaining_cards_kept() {
    let server = MockServer::start().await;
    let cards = json!([
        card_json("C1", "One", "L1", 1.0),
        card_json("C2", "Two", "L1", 2.0),
    ]);
    mount_deep_load(&server, json!([list_json("L1", "Backlog", 1.0)]), cards.clone(), json!([])).await;
    Mock::given(method("GET"))
        .and(path("/1/lists/L1/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cards))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/1/cards/C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/1/cards/C2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/1/lists/L1/closed"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = fetch_board(&server, &client).await;
    board.deep_load().await.unwrap();
    let list = board.list_mut("L1").unwrap();

    let result = list.delete().await;

    assert!(matches!(result, Err(TrelloError::Api { .. })));
    assert!(list.is_loaded());
    assert!(!list.is_archived());
    let remaining: Vec<&str> = list.cards().iter().map(|card| card.remote_id()).collect();
    assert_eq!(remaining, ["C2"]);
}
