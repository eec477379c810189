use super::{Entity, EntityCore, FieldSet, Label, List, Tracked, push_changed};
use crate::client::{QueryParams, TrelloClient};
use crate::error::TrelloError;

use models::{CardData, validate_name};

use log::{debug, info};
use serde_json::Value;

const CARD_KIND: &str = "card";
const CARDS_ENDPOINT: &str = "cards";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CardFields {
    name: String,
    description: String,
    archived: bool,
}

impl CardFields {
    fn from_data(data: &CardData) -> Self {
        Self {
            name: data.name.clone(),
            description: data.description.clone(),
            archived: data.closed,
        }
    }
}

impl FieldSet for CardFields {
    fn update_params(&self, baseline: Option<&Self>) -> QueryParams {
        let mut params = QueryParams::new();
        push_changed(&mut params, "name", &self.name, baseline.map(|b| &b.name), |v| v.clone());
        push_changed(&mut params, "desc", &self.description, baseline.map(|b| &b.description), |v| {
            v.clone()
        });
        push_changed(&mut params, "closed", &self.archived, baseline.map(|b| &b.archived), |v| *v);
        params
    }

    fn validate(&self) -> Result<(), TrelloError> {
        validate_name(&self.name)?;
        Ok(())
    }
}

/// A card on a list.
#[derive(Debug)]
pub struct Card {
    core: EntityCore,
    list_id: String,
    board_id: Option<String>,
    fields: Tracked<CardFields>,
    pos: f64,
    labels: Vec<Label>,
}

impl Card {
    pub(crate) fn from_data(client: TrelloClient, data: CardData) -> Self {
        let labels = build_labels(&client, &data);
        Self {
            fields: Tracked::new(CardFields::from_data(&data)),
            core: EntityCore::new(CARD_KIND, client, data.id),
            list_id: data.id_list,
            board_id: data.id_board,
            pos: data.pos,
            labels,
        }
    }

    /// Create a card at the bottom of `list`.
    pub async fn create(
        list: &List,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Card, TrelloError> {
        if !list.is_loaded() {
            return Err(TrelloError::entity_deleted("list", list.remote_id()));
        }

        let name = name.into();
        let description: String = description.into();
        validate_name(&name)?;

        let params = QueryParams::new()
            .with("idList", list.remote_id())
            .with("name", name)
            .with("desc", description)
            .with("pos", "bottom");

        let client = list.client();
        let data: CardData = client.post(CARDS_ENDPOINT, params).await?;
        info!("Created card '{}' ({}) on list {}", data.name, data.id, data.id_list);

        let mut card = Self::from_data(client.clone(), data);
        if card.board_id.is_none() {
            card.board_id = Some(list.board_id().to_string());
        }
        Ok(card)
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.pos
    }

    pub fn description(&self) -> &str {
        &self.fields.current().description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.current_mut().description = description.into();
    }

    pub fn is_archived(&self) -> bool {
        self.fields.current().archived
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.fields.current_mut().archived = archived;
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn has_label(&self, label_id: &str) -> bool {
        self.labels.iter().any(|label| label.remote_id() == label_id)
    }

    /// Post a comment on the card.
    pub async fn comment(&self, text: &str) -> Result<(), TrelloError> {
        self.core.ensure_live()?;
        if text.trim().is_empty() {
            return Err(TrelloError::validation("Comment cannot be empty"));
        }

        let page = format!("{}/actions/comments", self.core.resource());
        let _: Value = self
            .core
            .client
            .post(&page, QueryParams::new().with("text", text))
            .await?;
        debug!("Commented on card {}", self.core.remote_id);
        Ok(())
    }

    /// Add `labels` to the card, skipping ones it already has.
    ///
    /// Every label must belong to the card's board, so the board must be
    /// known. Returns how many labels were newly assigned.
    pub async fn assign_labels(&mut self, labels: &[Label]) -> Result<usize, TrelloError> {
        self.core.ensure_live()?;

        let Some(board_id) = self.board_id.as_deref() else {
            return Err(TrelloError::validation(format!(
                "Board of card {} is unknown; pull the card before assigning labels",
                self.core.remote_id
            )));
        };
        if let Some(foreign) = labels.iter().find(|label| label.board_id() != board_id) {
            return Err(TrelloError::validation(format!(
                "Label {} belongs to board {}, card {} is on board {}",
                foreign.remote_id(),
                foreign.board_id(),
                self.core.remote_id,
                board_id
            )));
        }

        let page = format!("{}/idLabels", self.core.resource());
        let mut assigned = 0;
        for label in labels {
            if self.has_label(label.remote_id()) {
                continue;
            }
            let _: Value = self
                .core
                .client
                .post(&page, QueryParams::new().with("value", label.remote_id()))
                .await?;
            self.labels.push(label.clone());
            assigned += 1;
        }

        debug!(
            "Assigned {assigned} of {} labels to card {}",
            labels.len(),
            self.core.remote_id
        );
        Ok(assigned)
    }

    fn apply(&mut self, data: CardData) {
        self.labels = build_labels(&self.core.client, &data);
        self.fields.mark_synced(CardFields::from_data(&data));
        self.list_id = data.id_list;
        self.pos = data.pos;
        if data.id_board.is_some() {
            self.board_id = data.id_board;
        }
    }
}

fn build_labels(client: &TrelloClient, data: &CardData) -> Vec<Label> {
    data.labels
        .iter()
        .cloned()
        .map(|label| Label::from_data(client.clone(), label))
        .collect()
}

impl Entity for Card {
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
        match self.core.push::<_, CardData>(&self.fields, force).await? {
            Some(data) => {
                self.apply(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull(&mut self) -> Result<(), TrelloError> {
        let data: CardData = self.core.fetch().await?;
        self.apply(data);
        Ok(())
    }

    async fn delete(&mut self) -> Result<(), TrelloError> {
        self.core.remove().await?;
        info!("Deleted card {}", self.core.remote_id);
        Ok(())
    }
}
