// Unit tests for CliError conversions

use crate::error::CliError;

use trello_client::{ConfigError, TrelloError};

use common::ErrorLocation;

use std::error::Error;

/// **VALUE**: Verifies library errors keep their source and gain a CLI location.
///
/// **BUG THIS CATCHES**: Would catch a conversion that flattens the error to text
/// and loses the chain `source()` walks for `--verbose` diagnostics.
#[test]
fn given_trello_error_when_converted_then_source_is_kept() {
    let err: CliError = TrelloError::from_http_response(404, "not found").into();

    assert!(err.to_string().contains("Trello Error"));
    assert!(err.to_string().contains("HTTP 404"));
    assert!(err.to_string().contains("error.rs"));
    let source = err.source().unwrap();
    assert!(source.downcast_ref::<TrelloError>().is_some());
}

#[test]
fn given_config_error_when_converted_then_config_variant() {
    let err: CliError = ConfigError::DirectoryNotFound {
        location: ErrorLocation::caller(),
    }
    .into();

    assert!(matches!(err, CliError::Config { .. }));
}

#[test]
fn given_io_error_when_converted_then_message_is_kept() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");

    let err: CliError = io.into();

    match err {
        CliError::Io { message, .. } => assert_eq!(message, "pipe closed"),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn given_not_found_helper_when_formatted_then_includes_message() {
    let err = CliError::not_found("Board 'x' does not exist");

    assert_eq!(
        err.to_string().split(" [").next(),
        Some("Not Found Error: Board 'x' does not exist")
    );
}
