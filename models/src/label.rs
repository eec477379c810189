use crate::LabelColor;

use serde::{Deserialize, Serialize};

/// A label as returned by `GET /1/labels/{id}`.
///
/// `color` is kept as the raw wire value (`null` for colorless labels);
/// [`LabelData::label_color`] maps it onto the fixed palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelData {
    pub id: String,
    pub id_board: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl LabelData {
    pub fn label_color(&self) -> LabelColor {
        LabelColor::from_wire(self.color.as_deref())
    }
}
