use super::{Board, Card, Entity, EntityCore, FieldSet, Tracked, push_changed};
use crate::client::{QueryParams, TrelloClient};
use crate::error::TrelloError;

use models::{CardData, ListData, validate_name};

use log::{debug, info};

const LIST_KIND: &str = "list";
const LISTS_ENDPOINT: &str = "lists";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListFields {
    name: String,
    archived: bool,
}

impl ListFields {
    fn from_data(data: &ListData) -> Self {
        Self {
            name: data.name.clone(),
            archived: data.closed,
        }
    }
}

impl FieldSet for ListFields {
    fn update_params(&self, baseline: Option<&Self>) -> QueryParams {
        let mut params = QueryParams::new();
        push_changed(&mut params, "name", &self.name, baseline.map(|b| &b.name), |v| v.clone());
        push_changed(&mut params, "closed", &self.archived, baseline.map(|b| &b.archived), |v| *v);
        params
    }

    fn validate(&self) -> Result<(), TrelloError> {
        validate_name(&self.name)?;
        Ok(())
    }
}

/// A list on a board.
#[derive(Debug)]
pub struct List {
    core: EntityCore,
    board_id: String,
    fields: Tracked<ListFields>,
    pos: f64,
    cards: Vec<Card>,
}

impl List {
    pub(crate) fn from_data(client: TrelloClient, data: ListData, cards: Vec<Card>) -> Self {
        Self {
            fields: Tracked::new(ListFields::from_data(&data)),
            core: EntityCore::new(LIST_KIND, client, data.id),
            board_id: data.id_board,
            pos: data.pos,
            cards,
        }
    }

    /// Create a list at the bottom of `board`.
    ///
    /// The board's loaded lists are not touched; deep load again to see it there.
    pub async fn create(board: &Board, title: impl Into<String>) -> Result<List, TrelloError> {
        if !board.is_loaded() {
            return Err(TrelloError::entity_deleted("board", board.remote_id()));
        }

        let title = title.into();
        validate_name(&title)?;

        let params = QueryParams::new()
            .with("name", title)
            .with("idBoard", board.remote_id())
            .with("pos", "bottom");

        let client = board.client();
        let data: ListData = client.post(LISTS_ENDPOINT, params).await?;
        info!("Created list '{}' ({}) on board {}", data.name, data.id, data.id_board);
        Ok(Self::from_data(client.clone(), data, Vec::new()))
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn position(&self) -> f64 {
        self.pos
    }

    pub fn is_archived(&self) -> bool {
        self.fields.current().archived
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.fields.current_mut().archived = archived;
    }

    /// Cards loaded with the board; empty for lists that were not deep loaded.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn card(&self, remote_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.remote_id() == remote_id)
    }

    pub fn card_mut(&mut self, remote_id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.remote_id() == remote_id)
    }

    fn apply(&mut self, data: ListData) {
        self.fields.mark_synced(ListFields::from_data(&data));
        self.board_id = data.id_board;
        self.pos = data.pos;
    }
}

impl Entity for List {
    fn remote_id(&self) -> &str {
        &self.core.remote_id
    }

    fn client(&self) -> &TrelloClient {
        &self.core.client
    }

    fn name(&self) -> &str {
        &self.fields.current().name
    }

    fn set_name(&mut self, name: impl Into<String>) {
        self.fields.current_mut().name = name.into();
    }

    fn is_loaded(&self) -> bool {
        !self.core.deleted
    }

    fn is_dirty(&self) -> bool {
        self.fields.is_dirty()
    }

    async fn update(&mut self, force: bool) -> Result<bool, TrelloError> {
        match self.core.push::<_, ListData>(&self.fields, force).await? {
            Some(data) => {
                self.apply(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull(&mut self) -> Result<(), TrelloError> {
        let data: ListData = self.core.fetch().await?;
        self.apply(data);
        Ok(())
    }

    /// Trello cannot delete lists: every card on the list is deleted and the
    /// list itself is archived.
    ///
    /// Cards are dropped from [`List::cards`] one by one as Trello confirms
    /// them, so a failure part way leaves only the cards that still exist.
    async fn delete(&mut self) -> Result<(), TrelloError> {
        self.core.ensure_live()?;

        let resource = self.core.resource();
        let client = &self.core.client;

        let cards: Vec<CardData> = client
            .get(&format!("{resource}/cards"), QueryParams::new().with("filter", "all"))
            .await?;
        for card in &cards {
            debug!("Deleting card {} of list {}", card.id, self.core.remote_id);
            client.delete(&format!("cards/{}", card.id)).await?;
            self.cards.retain(|local| local.remote_id() != card.id);
        }

        let _: ListData = client
            .put(&format!("{resource}/closed"), QueryParams::new().with("value", true))
            .await?;

        self.core.deleted = true;
        self.cards.clear();
        self.fields.current_mut().archived = true;
        info!(
            "Deleted list {} ({} cards removed, list archived)",
            self.core.remote_id,
            cards.len()
        );
        Ok(())
    }
}
