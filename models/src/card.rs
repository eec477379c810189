use crate::LabelData;

use serde::{Deserialize, Serialize};

/// A card as returned by `GET /1/cards/{id}`.
///
/// Trello embeds the full label records, so a card can be rebuilt without
/// a second request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub closed: bool,
    pub id_list: String,
    #[serde(default)]
    pub id_board: Option<String>,
    #[serde(default)]
    pub pos: f64,
    #[serde(default)]
    pub labels: Vec<LabelData>,
}
