use crate::helpers::{BOARD_ID, connected_client, deleted_json, fetch_board, label_json};

use trello_client::{Entity, Label, LabelColor, TrelloError};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_board_when_creating_label_then_color_is_sent_in_wire_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/labels"))
        .and(query_param("name", "Urgent"))
        .and(query_param("color", "sky"))
        .and(query_param("idBoard", BOARD_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json(
            "B1",
            BOARD_ID,
            "Urgent",
            Some("sky"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;

    let label = Label::create(&board, "Urgent", LabelColor::SkyBlue).await.unwrap();

    assert_eq!(label.color(), LabelColor::SkyBlue);
    assert_eq!(label.board_id(), BOARD_ID);
}

/// **VALUE**: Verifies clearing a colour sends Trello's literal `null`.
#[tokio::test]
async fn given_color_cleared_when_updating_label_then_null_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json(
            "B1",
            BOARD_ID,
            "Urgent",
            Some("red_dark"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/1/labels/B1"))
        .and(query_param("color", "null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json("B1", BOARD_ID, "Urgent", None)))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;
    let mut label = Label::create(&board, "Urgent", LabelColor::Red).await.unwrap();
    assert_eq!(label.color(), LabelColor::Red);

    label.set_color(LabelColor::None);
    label.update(false).await.unwrap();

    assert_eq!(label.color(), LabelColor::None);
}

#[tokio::test]
async fn given_label_when_deleted_then_later_calls_fail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json("B1", BOARD_ID, "", Some("blue"))))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/1/labels/B1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_json()))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;
    let mut label = Label::create(&board, "", LabelColor::Blue).await.unwrap();

    label.delete().await.unwrap();

    assert!(!label.is_loaded());
    assert!(matches!(label.update(true).await, Err(TrelloError::EntityDeleted { .. })));
}

#[tokio::test]
async fn given_local_edits_when_pulling_label_then_remote_values_win() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json("B1", BOARD_ID, "Urgent", Some("red"))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/labels/B1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_json(
            "B1",
            BOARD_ID,
            "Blocked",
            Some("purple_light"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    let client = connected_client(&server).await;
    let board = fetch_board(&server, &client).await;
    let mut label = Label::create(&board, "Urgent", LabelColor::Red).await.unwrap();

    label.set_name("Local");
    label.set_color(LabelColor::Yellow);
    label.pull().await.unwrap();

    assert_eq!(label.name(), "Blocked");
    assert_eq!(label.color(), LabelColor::Purple);
    assert!(!label.is_dirty());
}
