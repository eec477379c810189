use trello_cli::cli::Cli;
use trello_cli::logger::FILE_ONLY_TARGET;
use trello_cli::run;

use std::process::ExitCode;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: FILE_ONLY_TARGET, "{e}");
            eprintln!("trello: {e}");
            ExitCode::FAILURE
        }
    }
}
