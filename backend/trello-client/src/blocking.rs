//! Blocking calls for code that does not run inside an async runtime.
//!
//! [`BlockingClient`] owns a current-thread tokio runtime and drives the
//! async API to completion on every call. Calling it from inside another
//! tokio runtime panics; use the async API there.

use crate::client::{OnValidationFailure, TrelloClient, TrelloClientBuilder};
use crate::entity::{Board, Card, Entity, Label, List};
use crate::error::TrelloError;

use common::ErrorLocation;
use models::LabelColor;

use std::future::Future;

use tokio::runtime::{Builder as RuntimeBuilder, Runtime};

pub struct BlockingClient {
    runtime: Runtime,
    client: TrelloClient,
}

impl BlockingClient {
    /// Connect using `builder`; see [`TrelloClientBuilder::connect`].
    pub fn connect(
        builder: TrelloClientBuilder,
        on_failure: OnValidationFailure,
    ) -> Result<Option<Self>, TrelloError> {
        let runtime = new_runtime()?;
        let client = runtime.block_on(builder.connect(on_failure))?;
        Ok(client.map(|client| Self { runtime, client }))
    }

    /// Wrap an already connected client.
    pub fn from_client(client: TrelloClient) -> Result<Self, TrelloError> {
        Ok(Self {
            runtime: new_runtime()?,
            client,
        })
    }

    pub fn client(&self) -> &TrelloClient {
        &self.client
    }

    /// Run any future of this crate to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn create_board(&self, name: &str, public: bool) -> Result<Board, TrelloError> {
        self.block_on(Board::create(&self.client, name, public))
    }

    pub fn fetch_board(&self, remote_id: &str) -> Result<Option<Board>, TrelloError> {
        self.block_on(Board::from_remote(&self.client, remote_id))
    }

    pub fn fetch_all_boards(&self) -> Result<Vec<Board>, TrelloError> {
        self.block_on(Board::fetch_all_from(&self.client))
    }

    pub fn deep_load(&self, board: &mut Board) -> Result<(), TrelloError> {
        self.block_on(board.deep_load())
    }

    pub fn create_list(&self, board: &Board, title: &str) -> Result<List, TrelloError> {
        self.block_on(List::create(board, title))
    }

    pub fn create_card(&self, list: &List, name: &str, description: &str) -> Result<Card, TrelloError> {
        self.block_on(Card::create(list, name, description))
    }

    pub fn create_label(
        &self,
        board: &Board,
        name: &str,
        color: LabelColor,
    ) -> Result<Label, TrelloError> {
        self.block_on(Label::create(board, name, color))
    }

    pub fn comment(&self, card: &Card, text: &str) -> Result<(), TrelloError> {
        self.block_on(card.comment(text))
    }

    pub fn assign_labels(&self, card: &mut Card, labels: &[Label]) -> Result<usize, TrelloError> {
        self.block_on(card.assign_labels(labels))
    }

    pub fn update<E: Entity>(&self, entity: &mut E, force: bool) -> Result<bool, TrelloError> {
        self.block_on(entity.update(force))
    }

    pub fn pull<E: Entity>(&self, entity: &mut E) -> Result<(), TrelloError> {
        self.block_on(entity.pull())
    }

    pub fn delete<E: Entity>(&self, entity: &mut E) -> Result<(), TrelloError> {
        self.block_on(entity.delete())
    }
}

#[track_caller]
fn new_runtime() -> Result<Runtime, TrelloError> {
    RuntimeBuilder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| TrelloError::Runtime {
            message: format!("Failed to build tokio runtime: {e}"),
            location: ErrorLocation::caller(),
        })
}
