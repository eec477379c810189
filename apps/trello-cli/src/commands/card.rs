use super::require_board;
use crate::error::CliError;

use trello_client::{Card, Entity, List, TrelloClient};

use std::io::Write;

pub async fn create_list<W: Write>(
    client: &TrelloClient,
    board_id: &str,
    title: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let board = require_board(client, board_id).await?;
    let list = List::create(&board, title).await?;
    writeln!(out, "Created list {} ({}) on {}", list.name(), list.remote_id(), board.name())?;
    Ok(())
}

pub async fn create_card<W: Write>(
    client: &TrelloClient,
    board_id: &str,
    list_id: &str,
    name: &str,
    description: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let mut board = require_board(client, board_id).await?;
    board.deep_load().await?;
    let list = board
        .list(list_id)
        .ok_or_else(|| CliError::not_found(format!("List '{list_id}' is not on board {board_id}")))?;

    let card = Card::create(list, name, description).await?;
    writeln!(out, "Created card {} ({}) on {}", card.name(), card.remote_id(), list.name())?;
    Ok(())
}

pub async fn comment<W: Write>(
    client: &TrelloClient,
    board_id: &str,
    card_id: &str,
    text: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let mut board = require_board(client, board_id).await?;
    board.deep_load().await?;
    let card = board
        .cards()
        .into_iter()
        .flatten()
        .find(|card| card.remote_id() == card_id)
        .ok_or_else(|| CliError::not_found(format!("Card '{card_id}' is not on board {board_id}")))?;

    card.comment(text).await?;
    writeln!(out, "Commented on {}", card.name())?;
    Ok(())
}
