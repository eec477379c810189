// Unit tests for argument parsing

use crate::cli::{Cli, Command};

use std::path::PathBuf;

use clap::Parser;

#[test]
fn given_board_with_deep_flag_when_parsed_then_deep_is_set() {
    let cli = Cli::try_parse_from(["trello", "board", "abcd1234", "--deep"]).unwrap();

    assert_eq!(
        cli.command,
        Command::Board {
            id: "abcd1234".to_string(),
            deep: true
        }
    );
    assert!(!cli.verbose);
}

#[test]
fn given_global_dirs_when_parsed_then_paths_are_kept() {
    let cli = Cli::try_parse_from([
        "trello",
        "--config-dir",
        "/tmp/trello-config",
        "--log-dir",
        "/tmp/trello-logs",
        "-v",
        "boards",
    ])
    .unwrap();

    assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/trello-config")));
    assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/trello-logs")));
    assert!(cli.verbose);
    assert_eq!(cli.command, Command::Boards);
}

#[test]
fn given_create_card_without_description_when_parsed_then_description_is_empty() {
    let cli = Cli::try_parse_from(["trello", "create-card", "B1", "L1", "Plan"]).unwrap();

    assert_eq!(
        cli.command,
        Command::CreateCard {
            board_id: "B1".to_string(),
            list_id: "L1".to_string(),
            name: "Plan".to_string(),
            description: String::new(),
        }
    );
}

#[test]
fn given_missing_positional_when_parsed_then_error() {
    let result = Cli::try_parse_from(["trello", "comment", "B1", "C1"]);

    assert!(result.is_err());
}
