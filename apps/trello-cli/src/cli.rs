//! Command line surface of the `trello` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "trello", version, about = "Manage Trello boards from the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding config.toml (default: platform config dir/trello)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Directory for trello.log (default: <config dir>/logs)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Echo debug logs to stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the account the token belongs to
    Whoami,

    /// List every board the account is a member of
    Boards,

    /// Show one board
    Board {
        /// Board id or short link
        id: String,

        /// Also show lists, cards and labels
        #[arg(long, default_value_t = false)]
        deep: bool,
    },

    /// Create a board without Trello's default lists
    CreateBoard {
        name: String,

        #[arg(long, default_value_t = false)]
        public: bool,
    },

    /// Add a list at the bottom of a board
    CreateList { board_id: String, title: String },

    /// Add a card at the bottom of a list
    CreateCard {
        board_id: String,
        list_id: String,
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Comment on a card
    Comment {
        board_id: String,
        card_id: String,
        text: String,
    },

    RenameBoard { id: String, name: String },

    /// Delete a board permanently
    DeleteBoard { id: String },
}
