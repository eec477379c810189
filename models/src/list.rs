use serde::{Deserialize, Serialize};

/// A list as returned by `GET /1/lists/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    pub id_board: String,
    #[serde(default)]
    pub pos: f64,
}
