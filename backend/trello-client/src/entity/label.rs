use super::{Board, Entity, EntityCore, FieldSet, Tracked, push_changed};
use crate::client::{QueryParams, TrelloClient};
use crate::error::TrelloError;

use models::{LabelColor, LabelData, MAX_NAME_LENGTH};

use log::info;

const LABEL_KIND: &str = "label";
const LABELS_ENDPOINT: &str = "labels";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabelFields {
    name: String,
    color: LabelColor,
}

impl LabelFields {
    fn from_data(data: &LabelData) -> Self {
        Self {
            name: data.name.clone(),
            color: data.label_color(),
        }
    }
}

impl FieldSet for LabelFields {
    fn update_params(&self, baseline: Option<&Self>) -> QueryParams {
        let mut params = QueryParams::new();
        push_changed(&mut params, "name", &self.name, baseline.map(|b| &b.name), |v| v.clone());
        push_changed(&mut params, "color", &self.color, baseline.map(|b| &b.color), |c| {
            c.as_wire()
        });
        params
    }

    // Labels may be colour-only, so an empty name is fine.
    fn validate(&self) -> Result<(), TrelloError> {
        validate_label_name(&self.name)
    }
}

#[track_caller]
fn validate_label_name(name: &str) -> Result<(), TrelloError> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(TrelloError::validation(format!(
            "Label name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A board label. Cards carry copies of the labels assigned to them.
#[derive(Debug, Clone)]
pub struct Label {
    core: EntityCore,
    board_id: String,
    fields: Tracked<LabelFields>,
}

impl Label {
    pub(crate) fn from_data(client: TrelloClient, data: LabelData) -> Self {
        Self {
            fields: Tracked::new(LabelFields::from_data(&data)),
            core: EntityCore::new(LABEL_KIND, client, data.id),
            board_id: data.id_board,
        }
    }

    /// Create a label on `board`.
    pub async fn create(
        board: &Board,
        name: impl Into<String>,
        color: LabelColor,
    ) -> Result<Label, TrelloError> {
        if !board.is_loaded() {
            return Err(TrelloError::entity_deleted("board", board.remote_id()));
        }

        let name = name.into();
        validate_label_name(&name)?;

        let params = QueryParams::new()
            .with("name", name)
            .with("color", color.as_wire())
            .with("idBoard", board.remote_id());

        let client = board.client();
        let data: LabelData = client.post(LABELS_ENDPOINT, params).await?;
        info!(
            "Created label '{}' ({}) on board {}",
            data.name, data.id, data.id_board
        );
        Ok(Self::from_data(client.clone(), data))
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn color(&self) -> LabelColor {
        self.fields.current().color
    }

    pub fn set_color(&mut self, color: LabelColor) {
        self.fields.current_mut().color = color;
    }

    fn apply(&mut self, data: LabelData) {
        self.fields.mark_synced(LabelFields::from_data(&data));
        self.board_id = data.id_board;
    }
}

impl Entity for Label {
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
        match self.core.push::<_, LabelData>(&self.fields, force).await? {
            Some(data) => {
                self.apply(data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull(&mut self) -> Result<(), TrelloError> {
        let data: LabelData = self.core.fetch().await?;
        self.apply(data);
        Ok(())
    }

    async fn delete(&mut self) -> Result<(), TrelloError> {
        self.core.remove().await?;
        info!("Deleted label {}", self.core.remote_id);
        Ok(())
    }
}
