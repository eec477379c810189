mod cli;
mod commands;
mod error;
