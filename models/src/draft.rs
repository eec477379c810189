use crate::{ModelError, PermissionLevel};

/// Longest name Trello accepts for boards, lists, cards and labels.
pub const MAX_NAME_LENGTH: usize = 16384;

/// Check an entity name before it is sent to Trello.
#[track_caller]
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::validation("Name cannot be empty"));
    }

    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ModelError::validation(format!(
            "Name is {length} characters (maximum {MAX_NAME_LENGTH})"
        )));
    }

    Ok(())
}

/// A validated request to create a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDraft {
    pub name: String,
    pub description: Option<String>,
    pub permission_level: PermissionLevel,
    pub default_lists: bool,
}

/// Builder for [`BoardDraft`].
///
/// Boards are private and created without Trello's default
/// "To Do / Doing / Done" lists unless told otherwise.
#[derive(Debug, Default)]
pub struct BoardDraftBuilder {
    name: Option<String>,
    description: Option<String>,
    public: Option<bool>,
    default_lists: Option<bool>,
}

impl BoardDraftBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn with_default_lists(mut self, default_lists: bool) -> Self {
        self.default_lists = Some(default_lists);
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<BoardDraft, ModelError> {
        let name = self
            .name
            .ok_or_else(|| ModelError::validation("Board name is required"))?;

        validate_name(&name)?;

        Ok(BoardDraft {
            name,
            description: self.description.filter(|d| !d.is_empty()),
            permission_level: PermissionLevel::from_public(self.public.unwrap_or(false)),
            default_lists: self.default_lists.unwrap_or(false),
        })
    }
}
