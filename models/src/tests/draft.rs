// Unit tests for board draft validation

use crate::{BoardDraftBuilder, MAX_NAME_LENGTH, ModelError, PermissionLevel, validate_name};

/// **VALUE**: Verifies the documented defaults: private board, no default lists.
///
/// **WHY THIS MATTERS**: Creating a public board by accident exposes its content to
/// anyone with the link.
#[test]
fn given_only_name_when_build_then_board_is_private_without_default_lists() {
    let draft = BoardDraftBuilder::default()
        .with_name("Roadmap")
        .build()
        .unwrap();

    assert_eq!(draft.name, "Roadmap");
    assert_eq!(draft.permission_level, PermissionLevel::Private);
    assert!(!draft.default_lists);
    assert!(draft.description.is_none());
}

#[test]
fn given_public_flag_when_build_then_permission_level_is_public() {
    let draft = BoardDraftBuilder::default()
        .with_name("Open board")
        .with_public(true)
        .with_description("shared")
        .build()
        .unwrap();

    assert_eq!(draft.permission_level, PermissionLevel::Public);
    assert_eq!(draft.description.as_deref(), Some("shared"));
}

/// **VALUE**: Verifies missing and blank names are rejected before any request is made.
#[test]
fn given_missing_or_blank_name_when_build_then_validation_error() {
    let missing = BoardDraftBuilder::default().build();
    let blank = BoardDraftBuilder::default().with_name("   ").build();

    assert!(matches!(missing, Err(ModelError::Validation { .. })));
    assert!(matches!(blank, Err(ModelError::Validation { .. })));
}

/// **VALUE**: Verifies the 16384 character boundary is inclusive.
///
/// **BUG THIS CATCHES**: Off-by-one in the length check, or counting bytes instead of
/// characters (a multi-byte name at the limit would be wrongly rejected).
#[test]
fn given_name_at_and_over_limit_when_validated_then_only_over_limit_fails() {
    let at_limit = "é".repeat(MAX_NAME_LENGTH);
    let over_limit = "a".repeat(MAX_NAME_LENGTH + 1);

    assert!(validate_name(&at_limit).is_ok());
    assert!(validate_name(&over_limit).is_err());
}
