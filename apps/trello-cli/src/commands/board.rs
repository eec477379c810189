use super::require_board;
use crate::error::CliError;

use trello_client::{Board, Entity, TrelloClient};

use std::io::Write;

use log::info;

pub async fn list_boards<W: Write>(client: &TrelloClient, out: &mut W) -> Result<(), CliError> {
    let boards = Board::fetch_all_from(client).await?;
    for board in &boards {
        let closed = if board.is_closed() { " [closed]" } else { "" };
        writeln!(out, "{}  {}{closed}", board.remote_id(), board.name())?;
    }
    Ok(())
}

pub async fn show_board<W: Write>(
    client: &TrelloClient,
    id: &str,
    deep: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let mut board = require_board(client, id).await?;
    if deep {
        board.deep_load().await?;
    }
    write_board(&board, out)
}

fn write_board<W: Write>(board: &Board, out: &mut W) -> Result<(), CliError> {
    let visibility = if board.is_public() { "public" } else { "private" };
    writeln!(out, "{} ({}, {visibility})", board.name(), board.remote_id())?;
    if let Some(url) = board.url() {
        writeln!(out, "{url}")?;
    }
    if !board.description().is_empty() {
        writeln!(out, "\n{}", board.description())?;
    }

    if let Some(labels) = board.labels() {
        if !labels.is_empty() {
            let names: Vec<String> = labels
                .iter()
                .map(|label| format!("{} ({})", label.name(), label.color()))
                .collect();
            writeln!(out, "\nLabels: {}", names.join(", "))?;
        }
    }

    for list in board.lists().unwrap_or_default() {
        let archived = if list.is_archived() { " [archived]" } else { "" };
        writeln!(out, "\n{} ({}){archived}", list.name(), list.remote_id())?;
        for card in list.cards() {
            let archived = if card.is_archived() { " [archived]" } else { "" };
            writeln!(out, "  - {} ({}){archived}", card.name(), card.remote_id())?;
        }
    }
    Ok(())
}

pub async fn create_board<W: Write>(
    client: &TrelloClient,
    name: &str,
    public: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let board = Board::create(client, name, public).await?;
    writeln!(out, "Created board {} ({})", board.name(), board.remote_id())?;
    if let Some(url) = board.url() {
        writeln!(out, "{url}")?;
    }
    Ok(())
}

pub async fn rename_board<W: Write>(
    client: &TrelloClient,
    id: &str,
    name: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let mut board = require_board(client, id).await?;
    let previous = board.name().to_string();
    board.set_name(name);

    if board.update(false).await? {
        info!("Renamed board {id} from '{previous}' to '{}'", board.name());
        writeln!(out, "Renamed '{previous}' to '{}'", board.name())?;
    } else {
        writeln!(out, "Board is already named '{}'", board.name())?;
    }
    Ok(())
}

pub async fn delete_board<W: Write>(
    client: &TrelloClient,
    id: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let mut board = require_board(client, id).await?;
    let name = board.name().to_string();
    board.delete().await?;
    writeln!(out, "Deleted board {name} ({id})")?;
    Ok(())
}
