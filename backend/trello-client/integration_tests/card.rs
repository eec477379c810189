use crate::helpers::{
    BOARD_ID, OTHER_BOARD_ID, card_json, connected_client, fetch_board, label_json, list_json,
    mount_deep_load,
};

use trello_client::{Board, Card, Entity, Label, LabelColor, List, TrelloClient, TrelloError};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn board_with_list(server: &MockServer, client: &TrelloClient) -> (Board, List) {
    Mock::given(method("POST"))
        .and(path("/1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json("L1", "Todo", 1.0)))
        .mount(server)
        .await;
    let board = fetch_board(server, client).await;
    let list = List::create(&board, "Todo").await.unwrap();
    (board, list)
}

async fn mount_card_create(server: &MockServer, labels: serde_json::Value) {
    let mut card = card_json("C1", "Plan", "L1", 1.0);
    card["desc"] = json!("First steps");
    card["labels"] = labels;
    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .and(query_param("idList", "L1"))
        .and(query_param("name", "Plan"))
        .and(query_param("desc", "First steps"))
        .and(query_param("pos", "bottom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_list_when_creating_card_then_card_belongs_to_list_and_board() {
    let server = MockServer::start().await;
    mount_card_create(&server, json!([])).await;
    let client = connected_client(&server).await;
    let (_board, list) = board_with_list(&server, &client).await;

    let card = Card::create(&list, "Plan", "First steps").await.unwrap();

    assert_eq!(card.remote_id(), "C1");
    assert_eq!(card.list_id(), "L1");
    assert_eq!(card.board_id(), Some(BOARD_ID));
    assert_eq!(card.description(), "First steps");
    assert!(card.labels().is_empty());
}

#[tokio::test]
async fn given_card_when_commenting_then_comment_is_posted() {
    let server = MockServer::start().await;
    mount_card_create(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/1/cards/C1/actions/comments"))
        .and(query_param("text", "Looks good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "A1",
            "type": "commentCard"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let (_board, list) = board_with_list(&server, &client).await;
    let card = Card::create(&list, "Plan", "First steps").await.unwrap();

    card.comment("Looks good").await.unwrap();

    assert!(matches!(card.comment("  ").await, Err(TrelloError::Validation { .. })));
}

/// **VALUE**: Verifies only labels the card lacks are posted.
///
/// **BUG THIS CATCHES**: Re-posting an assigned label makes Trello answer 400
/// "that label is already on the card" and aborts the whole batch.
#[tokio::test]
async fn given_some_labels_already_assigned_when_assigning_then_only_new_ones_are_posted() {
    let server = MockServer::start().await;
    mount_card_create(&server, json!([label_json("B1", BOARD_ID, "Bug", Some("red"))])).await;
    Mock::given(method("POST"))
        .and(path("/1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json(
            "B2",
            BOARD_ID,
            "Feature",
            Some("green"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/cards/C1/idLabels"))
        .and(query_param("value", "B2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["B1", "B2"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/cards/C1/idLabels"))
        .and(query_param("value", "B1"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let (board, list) = board_with_list(&server, &client).await;
    let mut card = Card::create(&list, "Plan", "First steps").await.unwrap();
    let existing = card.labels()[0].clone();
    let feature = Label::create(&board, "Feature", LabelColor::Green).await.unwrap();

    let assigned = card.assign_labels(&[existing, feature]).await.unwrap();

    assert_eq!(assigned, 1);
    assert!(card.has_label("B1"));
    assert!(card.has_label("B2"));
}

#[tokio::test]
async fn given_label_from_other_board_when_assigning_then_validation_error() {
    let server = MockServer::start().await;
    mount_card_create(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json(
            "X1",
            OTHER_BOARD_ID,
            "Elsewhere",
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1/cards/C1/idLabels"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let (board, list) = board_with_list(&server, &client).await;
    let mut card = Card::create(&list, "Plan", "First steps").await.unwrap();
    let foreign = Label::create(&board, "Elsewhere", LabelColor::None).await.unwrap();

    let result = card.assign_labels(&[foreign]).await;

    assert!(matches!(result, Err(TrelloError::Validation { .. })));
    assert!(card.labels().is_empty());
}

#[tokio::test]
async fn given_archived_card_when_updating_then_closed_flag_is_sent() {
    let server = MockServer::start().await;
    mount_card_create(&server, json!([])).await;
    let mut archived = card_json("C1", "Plan", "L1", 1.0);
    archived["desc"] = json!("First steps");
    archived["closed"] = json!(true);
    Mock::given(method("PUT"))
        .and(path("/1/cards/C1"))
        .and(query_param("closed", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archived))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let (_board, list) = board_with_list(&server, &client).await;
    let mut card = Card::create(&list, "Plan", "First steps").await.unwrap();

    card.set_archived(true);
    card.update(false).await.unwrap();

    assert!(card.is_archived());
    assert!(!card.is_dirty());
}

/// **VALUE**: Verifies `pull` overwrites local edits and replaces the card's labels.
///
/// **BUG THIS CATCHES**: Keeping the stale label list after a pull would make
/// `assign_labels` skip labels that were removed on Trello.
#[tokio::test]
async fn given_local_edits_when_pulling_card_then_remote_values_and_labels_win() {
    let server = MockServer::start().await;
    mount_card_create(&server, json!([label_json("B1", BOARD_ID, "Bug", Some("red"))])).await;
    let mut remote = card_json("C1", "Plan v2", "L1", 5.0);
    remote["desc"] = json!("Edited on Trello");
    remote["labels"] = json!([label_json("B2", BOARD_ID, "Feature", Some("green"))]);
    Mock::given(method("GET"))
        .and(path("/1/cards/C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let (_board, list) = board_with_list(&server, &client).await;
    let mut card = Card::create(&list, "Plan", "First steps").await.unwrap();
    assert!(card.has_label("B1"));

    card.set_name("Local rename");
    card.set_description("Local notes");
    card.pull().await.unwrap();

    assert_eq!(card.name(), "Plan v2");
    assert_eq!(card.description(), "Edited on Trello");
    assert_eq!(card.position(), 5.0);
    assert!(!card.is_dirty());
    assert!(!card.has_label("B1"));
    assert!(card.has_label("B2"));
    assert_eq!(card.labels().len(), 1);
    assert_eq!(card.labels()[0].color(), LabelColor::Green);
}

/// **VALUE**: Verifies labels are refused when the card's board is unknown.
///
/// **BUG THIS CATCHES**: Without a board id the foreign-label check cannot run;
/// posting anyway could attach another board's label.
#[tokio::test]
async fn given_card_without_board_when_assigning_labels_then_validation_error() {
    let server = MockServer::start().await;
    let mut card = card_json("C1", "Plan", "L1", 1.0);
    card.as_object_mut().unwrap().remove("idBoard");
    mount_deep_load(
        &server,
        json!([list_json("L1", "Todo", 1.0)]),
        json!([card]),
        json!([label_json("B1", BOARD_ID, "Bug", Some("red"))]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/1/cards/C1/idLabels"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let mut board = fetch_board(&server, &client).await;
    board.deep_load().await.unwrap();
    let labels = board.labels().unwrap().to_vec();
    let card = board.list_mut("L1").unwrap().card_mut("C1").unwrap();
    assert_eq!(card.board_id(), None);

    let result = card.assign_labels(&labels).await;

    assert!(matches!(result, Err(TrelloError::Validation { .. })));
    assert!(card.labels().is_empty());
}
