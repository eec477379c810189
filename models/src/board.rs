use serde::{Deserialize, Serialize};

/// Who can see a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    #[default]
    Private,
    Public,
    Org,
    Enterprise,
}

impl PermissionLevel {
    pub fn from_public(public: bool) -> Self {
        if public {
            PermissionLevel::Public
        } else {
            PermissionLevel::Private
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Private => "private",
            PermissionLevel::Public => "public",
            PermissionLevel::Org => "org",
            PermissionLevel::Enterprise => "enterprise",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, PermissionLevel::Public)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPrefs {
    #[serde(default)]
    pub permission_level: PermissionLevel,
}

/// A board as returned by `GET /1/boards/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub prefs: BoardPrefs,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub short_link: Option<String>,
}

impl BoardData {
    pub fn is_public(&self) -> bool {
        self.prefs.permission_level.is_public()
    }
}
