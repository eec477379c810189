mod blocking;
mod board;
mod card;
mod client;
mod helpers;
mod label;
mod list;
mod retry;
