use super::{Card, Entity, EntityCore, FieldSet, Label, List, Tracked, push_changed};
use crate::client::{QueryParams, TrelloClient};
use crate::error::TrelloError;

use models::{
    BoardData, BoardDraft, BoardDraftBuilder, CardData, LabelData, ListData, PermissionLevel,
    validate_name,
};

use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, info, warn};
use regex::Regex;

const BOARD_KIND: &str = "board";
const BOARDS_ENDPOINT: &str = "boards";
const MEMBER_BOARDS_ENDPOINT: &str = "members/me/boards";
const BOARD_ID_PATTERN: &str = r"^(?:[0-9a-fA-F]{24}|[A-Za-z0-9]{8})$";

static BOARD_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn board_id_regex() -> &'static Regex {
    BOARD_ID_REGEX.get_or_init(|| Regex::new(BOARD_ID_PATTERN).expect("valid regex pattern"))
}

/// An object id (24 hex) or a short link (8 alphanumerics).
pub fn is_valid_board_id(id: &str) -> bool {
    board_id_regex().is_match(id)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoardFields {
    name: String,
    description: String,
    public: bool,
    closed: bool,
}

impl BoardFields {
    fn from_data(data: &BoardData) -> Self {
        Self {
            name: data.name.clone(),
            description: data.description.clone(),
            public: data.is_public(),
            closed: data.closed,
        }
    }
}

impl FieldSet for BoardFields {
    fn update_params(&self, baseline: Option<&Self>) -> QueryParams {
        let mut params = QueryParams::new();
        push_changed(&mut params, "name", &self.name, baseline.map(|b| &b.name), |v| v.clone());
        push_changed(&mut params, "desc", &self.description, baseline.map(|b| &b.description), |v| {
            v.clone()
        });
        push_changed(&mut params, "closed", &self.closed, baseline.map(|b| &b.closed), |v| *v);
        push_changed(
            &mut params,
            "prefs/permissionLevel",
            &self.public,
            baseline.map(|b| &b.public),
            |public| PermissionLevel::from_public(*public).as_str(),
        );
        params
    }

    fn validate(&self) -> Result<(), TrelloError> {
        validate_name(&self.name)?;
        Ok(())
    }
}

/// A Trello board.
///
/// Lists and labels are only available after [`Board::deep_load`]; before
/// that [`Board::lists`] and [`Board::labels`] return `None`.
#[derive(Debug)]
pub struct Board {
    core: EntityCore,
    fields: Tracked<BoardFields>,
    url: Option<String>,
    short_link: Option<String>,
    lists: Option<Vec<List>>,
    labels: Option<Vec<Label>>,
}

impl Board {
    pub(crate) fn from_data(client: TrelloClient, data: BoardData) -> Self {
        Self {
            fields: Tracked::new(BoardFields::from_data(&data)),
            core: EntityCore::new(BOARD_KIND, client, data.id),
            url: data.url,
            short_link: data.short_link,
            lists: None,
            labels: None,
        }
    }

    /// Create a board on Trello.
    ///
    /// `name` must be non-empty and at most 16384 characters. The board is
    /// created without Trello's default lists.
    pub async fn create(
        client: &TrelloClient,
        name: impl Into<String>,
        public: bool,
    ) -> Result<Board, TrelloError> {
        let draft = BoardDraftBuilder::default()
            .with_name(name)
            .with_public(public)
            .build()?;
        Self::create_from_draft(client, draft).await
    }

    pub async fn create_from_draft(
        client: &TrelloClient,
        draft: BoardDraft,
    ) -> Result<Board, TrelloError> {
        let mut params = QueryParams::new()
            .with("name", draft.name)
            .with("defaultLists", draft.default_lists)
            .with(
                "prefs",
                QueryParams::new().with("permissionLevel", draft.permission_level.as_str()),
            );
        if let Some(description) = draft.description {
            params.push("desc", description);
        }

        let data: BoardData = client.post(BOARDS_ENDPOINT, params).await?;
        info!("Created board '{}' ({})", data.name, data.id);
        Ok(Self::from_data(client.clone(), data))
    }

    /// Fetch a board by id or short link.
    ///
    /// Returns `Ok(None)` when the board does not exist or the id is malformed.
    pub async fn from_remote(
        client: &TrelloClient,
        remote_id: &str,
    ) -> Result<Option<Board>, TrelloError> {
        if !is_valid_board_id(remote_id) {
            debug!("'{remote_id}' is not a board id or short link");
            return Ok(None);
        }

        let page = format!("{BOARDS_ENDPOINT}/{remote_id}");
        match client.get::<BoardData>(&page, QueryParams::new()).await {
            Ok(data) => Ok(Some(Self::from_data(client.clone(), data))),
            Err(error) if error.is_not_found() => {
                debug!("Board {remote_id} not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Every board the client's account is a member of.
    pub async fn fetch_all_from(client: &TrelloClient) -> Result<Vec<Board>, TrelloError> {
        let boards: Vec<BoardData> = client
            .get(MEMBER_BOARDS_ENDPOINT, QueryParams::new())
            .await?;
        debug!("Fetched {} boards", boards.len());

        Ok(boards
            .into_iter()
            .map(|data| Self::from_data(client.clone(), data))
            .collect())
    }

    /// Fetch every list, card and label of the board.
    ///
    /// The three reads run concurrently. Cards are grouped under their list
    /// and both are ordered by position. Replaces anything loaded before.
    pub async fn deep_load(&mut self) -> Result<(), TrelloError> {
        self.core.ensure_live()?;

        let resource = self.core.resource();
        let client = &self.core.client;
        let lists_page = format!("{resource}/lists");
        let cards_page = format!("{resource}/cards");
        let labels_page = format!("{resource}/labels");

        let (lists, cards, labels): (Vec<ListData>, Vec<CardData>, Vec<LabelData>) =
            futures_util::try_join!(
                client.get(&lists_page, QueryParams::new().with("filter", "all")),
                client.get(&cards_page, QueryParams::new().with("filter", "all")),
                client.get(&labels_page, QueryParams::new()),
            )?;

        let (lists, card_count) = assemble_lists(client, &self.core.remote_id, lists, cards);
        let labels: Vec<Label> = labels
            .into_iter()
            .map(|data| Label::from_data(client.clone(), data))
            .collect();

        info!(
            "Deep loaded board {}: {} lists, {} cards, {} labels",
            self.core.remote_id,
            lists.len(),
            card_count,
            labels.len()
        );

        self.lists = Some(lists);
        self.labels = Some(labels);
        Ok(())
    }

    pub fn is_deep_loaded(&self) -> bool {
        self.lists.is_some()
    }

    pub fn lists(&self) -> Option<&[List]> {
        self.lists.as_deref()
    }

    pub fn lists_mut(&mut self) -> Option<&mut [List]> {
        self.lists.as_deref_mut()
    }

    pub fn labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }

    pub fn labels_mut(&mut self) -> Option<&mut [Label]> {
        self.labels.as_deref_mut()
    }

    pub fn list(&self, remote_id: &str) -> Option<&List> {
        self.lists()?.iter().find(|list| list.remote_id() == remote_id)
    }

    pub fn list_mut(&mut self, remote_id: &str) -> Option<&mut List> {
        self.lists_mut()?
            .iter_mut()
            .find(|list| list.remote_id() == remote_id)
    }

    pub fn label(&self, remote_id: &str) -> Option<&Label> {
        self.labels()?.iter().find(|label| label.remote_id() == remote_id)
    }

    /// Every card on every loaded list.
    pub fn cards(&self) -> Option<impl Iterator<Item = &Card>> {
        Some(self.lists()?.iter().flat_map(|list| list.cards().iter()))
    }

    pub fn description(&self) -> &str {
        &self.fields.current().description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.current_mut().description = description.into();
    }

    pub fn is_public(&self) -> bool {
        self.fields.current().public
    }

    pub fn set_public(&mut self, public: bool) {
        self.fields.current_mut().public = public;
    }

    pub fn is_closed(&self) -> bool {
        self.fields.current().closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.fields.current_mut().closed = closed;
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn short_link(&self) -> Option<&str> {
        self.short_link.as_deref()
    }

    fn apply(&mut self, data: BoardData) {
        self.fields.mark_synced(BoardFields::from_data(&data));
        self.url = data.url.or(self.url.take());
        self.short_link = data.short_link.or(self.short_link.take());
    }
}

/// Build lists from raw records, attaching cards to their list.
fn assemble_lists(
    client: &TrelloClient,
    board_id: &str,
    mut lists: Vec<ListData>,
    cards: Vec<CardData>,
) -> (Vec<List>, usize) {
    lists.sort_by(|a, b| a.pos.total_cmp(&b.pos));

    let mut cards_by_list: HashMap<String, Vec<CardData>> = HashMap::new();
    for card in cards {
        cards_by_list.entry(card.id_list.clone()).or_default().push(card);
    }

    let mut card_count = 0;
    let assembled = lists
        .into_iter()
        .map(|data| {
            let mut cards = cards_by_list.remove(&data.id).unwrap_or_default();
            cards.sort_by(|a, b| a.pos.total_cmp(&b.pos));
            card_count += cards.len();

            let cards = cards
                .into_iter()
                .map(|card| Card::from_data(client.clone(), card))
                .collect();
            List::from_data(client.clone(), data, cards)
        })
        .collect();

    for (list_id, orphans) in cards_by_list {
        warn!(
            "Dropping {} cards of board {board_id} that reference unknown list {list_id}",
            orphans.len()
        );
    }

    (assembled, card_count)
}

impl Entity for Board {
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
        match self.core.push::<_, BoardData>(&self.fields, force).await? {
            Some(data) => {
                self.apply(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull(&mut self) -> Result<(), TrelloError> {
        let data: BoardData = self.core.fetch().await?;
        self.apply(data);
        Ok(())
    }

    async fn delete(&mut self) -> Result<(), TrelloError> {
        self.core.remove().await?;
        self.lists = None;
        self.labels = None;
        info!("Deleted board {}", self.core.remote_id);
        Ok(())
    }
}
