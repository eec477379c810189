//! One function per subcommand. Output goes to the writer passed in so tests
//! can capture it.

pub mod board;
pub mod card;

use crate::cli::Command;
use crate::error::CliError;

use trello_client::{Board, TrelloClient};

use std::io::Write;

pub async fn execute<W: Write>(
    command: Command,
    client: &TrelloClient,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Whoami => whoami(client, out),
        Command::Boards => board::list_boards(client, out).await,
        Command::Board { id, deep } => board::show_board(client, &id, deep, out).await,
        Command::CreateBoard { name, public } => {
            board::create_board(client, &name, public, out).await
        }
        Command::CreateList { board_id, title } => {
            card::create_list(client, &board_id, &title, out).await
        }
        Command::CreateCard {
            board_id,
            list_id,
            name,
            description,
        } => card::create_card(client, &board_id, &list_id, &name, &description, out).await,
        Command::Comment {
            board_id,
            card_id,
            text,
        } => card::comment(client, &board_id, &card_id, &text, out).await,
        Command::RenameBoard { id, name } => board::rename_board(client, &id, &name, out).await,
        Command::DeleteBoard { id } => board::delete_board(client, &id, out).await,
    }
}

fn whoami<W: Write>(client: &TrelloClient, out: &mut W) -> Result<(), CliError> {
    match client.user() {
        Some(user) => writeln!(out, "{user}")?,
        None => writeln!(out, "No token configured: read-only access to public boards")?,
    }
    Ok(())
}

/// Fetch a board or fail with [`CliError::NotFound`].
pub(crate) async fn require_board(client: &TrelloClient, id: &str) -> Result<Board, CliError> {
    Board::from_remote(client, id)
        .await?
        .ok_or_else(|| CliError::not_found(format!("Board '{id}' does not exist")))
}
