// Command output against a mocked Trello API

use crate::cli::Command;
use crate::commands::execute;
use crate::error::CliError;

use trello_client::{OnValidationFailure, RetryConfig, TrelloClient};

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "0123456789abcdef0123456789abcdef";
const TOKEN: &str = "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210";
const BOARD_ID: &str = "5f1a2b3c4d5e6f7a8b9c0d1e";

async fn client(server: &MockServer) -> TrelloClient {
    Mock::given(method("GET"))
        .and(path("/1/members/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "ada" })))
        .mount(server)
        .await;

    TrelloClient::builder()
        .with_key(KEY)
        .with_token(TOKEN)
        .with_base_url(format!("{}/1/", server.uri()))
        .with_retry(RetryConfig::disabled())
        .connect(OnValidationFailure::Error)
        .await
        .unwrap()
        .unwrap()
}

fn board_json(name: &str) -> Value {
    json!({
        "id": BOARD_ID,
        "name": name,
        "desc": "Plans",
        "prefs": { "permissionLevel": "private" },
        "url": "https://trello.com/b/abcd1234/roadmap"
    })
}

async fn mount_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json("Roadmap")))
        .mount(server)
        .await;
}

async fn mount_deep_load(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}/lists")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "L1", "name": "Todo", "idBoard": BOARD_ID, "pos": 1.0 }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}/cards")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "C1", "name": "Plan", "idList": "L1", "idBoard": BOARD_ID, "pos": 1.0 }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}/labels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "B1", "idBoard": BOARD_ID, "name": "Bug", "color": "red" }
        ])))
        .mount(server)
        .await;
}

async fn run(command: Command, client: &TrelloClient) -> Result<String, CliError> {
    let mut out = Vec::new();
    execute(command, client, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn given_connected_client_when_whoami_then_prints_username() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    let output = run(Command::Whoami, &client).await.unwrap();

    assert_eq!(output, "ada\n");
}

#[tokio::test]
async fn given_member_boards_when_listing_then_one_line_per_board() {
    let server = MockServer::start().await;
    let mut closed = board_json("Old");
    closed["id"] = json!("5f1a2b3c4d5e6f7a8b9c0d1f");
    closed["closed"] = json!(true);
    Mock::given(method("GET"))
        .and(path("/1/members/me/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([board_json("Roadmap"), closed])))
        .mount(&server)
        .await;
    let client = client(&server).await;

    let output = run(Command::Boards, &client).await.unwrap();

    assert_eq!(
        output,
        format!("{BOARD_ID}  Roadmap\n5f1a2b3c4d5e6f7a8b9c0d1f  Old [closed]\n")
    );
}

/// **VALUE**: Verifies `board --deep` prints lists with their cards and the labels.
#[tokio::test]
async fn given_deep_flag_when_showing_board_then_lists_cards_and_labels_printed() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    mount_deep_load(&server).await;
    let client = client(&server).await;

    let output = run(
        Command::Board {
            id: BOARD_ID.to_string(),
            deep: true,
        },
        &client,
    )
    .await
    .unwrap();

    assert!(output.starts_with(&format!("Roadmap ({BOARD_ID}, private)\n")));
    assert!(output.contains("Plans"));
    assert!(output.contains("Labels: Bug (red)"));
    assert!(output.contains("\nTodo (L1)\n  - Plan (C1)\n"));
}

#[tokio::test]
async fn given_unknown_board_when_showing_then_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client(&server).await;

    let result = run(
        Command::Board {
            id: BOARD_ID.to_string(),
            deep: false,
        },
        &client,
    )
    .await;

    assert!(matches!(result, Err(CliError::NotFound { .. })));
}

#[tokio::test]
async fn given_list_on_board_when_creating_card_then_card_is_posted() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    mount_deep_load(&server).await;
    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .and(query_param("idList", "L1"))
        .and(query_param("name", "Ship"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "C2", "name": "Ship", "idList": "L1", "idBoard": BOARD_ID, "pos": 2.0
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client(&server).await;

    let output = run(
        Command::CreateCard {
            board_id: BOARD_ID.to_string(),
            list_id: "L1".to_string(),
            name: "Ship".to_string(),
            description: String::new(),
        },
        &client,
    )
    .await
    .unwrap();

    assert_eq!(output, "Created card Ship (C2) on Todo\n");
}

#[tokio::test]
async fn given_unknown_list_when_creating_card_then_not_found_without_post() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    mount_deep_load(&server).await;
    Mock::given(method("POST"))
        .and(path("/1/cards"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = client(&server).await;

    let result = run(
        Command::CreateCard {
            board_id: BOARD_ID.to_string(),
            list_id: "L404".to_string(),
            name: "Ship".to_string(),
            description: String::new(),
        },
        &client,
    )
    .await;

    assert!(matches!(result, Err(CliError::NotFound { .. })));
}

#[tokio::test]
async fn given_card_on_board_when_commenting_then_comment_is_posted() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    mount_deep_load(&server).await;
    Mock::given(method("POST"))
        .and(path("/1/cards/C1/actions/comments"))
        .and(query_param("text", "done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "A1" })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client(&server).await;

    let output = run(
        Command::Comment {
            board_id: BOARD_ID.to_string(),
            card_id: "C1".to_string(),
            text: "done".to_string(),
        },
        &client,
    )
    .await
    .unwrap();

    assert_eq!(output, "Commented on Plan\n");
}

/// **VALUE**: Verifies renaming to the current name sends nothing.
#[tokio::test]
async fn given_same_name_when_renaming_board_then_no_update_is_sent() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("PUT"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json("Roadmap")))
        .expect(0)
        .mount(&server)
        .await;
    let client = client(&server).await;

    let output = run(
        Command::RenameBoard {
            id: BOARD_ID.to_string(),
            name: "Roadmap".to_string(),
        },
        &client,
    )
    .await
    .unwrap();

    assert_eq!(output, "Board is already named 'Roadmap'\n");
}

#[tokio::test]
async fn given_board_when_deleting_then_delete_is_sent() {
    let server = MockServer::start().await;
    mount_board(&server).await;
    Mock::given(method("DELETE"))
        .and(path(format!("/1/boards/{BOARD_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_value": null })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client(&server).await;

    let output = run(
        Command::DeleteBoard {
            id: BOARD_ID.to_string(),
        },
        &client,
    )
    .await
    .unwrap();

    assert_eq!(output, format!("Deleted board Roadmap ({BOARD_ID})\n"));
}
