// Unit tests for query parameter flattening

use crate::client::{QueryParams, QueryValue};

fn pairs(params: &QueryParams) -> Vec<(String, String)> {
    params.flatten()
}

fn pair(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

/// **VALUE**: Verifies each scalar kind is encoded the way Trello parses it.
///
/// **BUG THIS CATCHES**: Positions sent as `16384.0` instead of `16384`, or booleans
/// capitalised, both of which Trello rejects.
#[test]
fn given_scalar_values_when_flattened_then_encoded_as_trello_strings() {
    let params = QueryParams::new()
        .with("name", "Roadmap")
        .with("closed", true)
        .with("limit", 50_i64)
        .with("pos", 16384.0)
        .with("ratio", 0.5);

    assert_eq!(
        pairs(&params),
        vec![
            pair("name", "Roadmap"),
            pair("closed", "true"),
            pair("limit", "50"),
            pair("pos", "16384"),
            pair("ratio", "0.5"),
        ]
    );
}

/// **VALUE**: Verifies lists are comma joined (`/batch?urls=/a,/b`).
#[test]
fn given_list_value_when_flattened_then_items_are_comma_joined() {
    let params = QueryParams::new().with("urls", vec!["/members/me", "/boards/abc"]);

    assert_eq!(pairs(&params), vec![pair("urls", "/members/me,/boards/abc")]);
}

/// **VALUE**: Verifies maps flatten to Trello's underscore convention, recursively.
///
/// **WHY THIS MATTERS**: Board creation sets visibility through `prefs_permissionLevel`.
/// A wrong encoding silently creates a private board when a public one was asked for.
#[test]
fn given_nested_map_when_flattened_then_keys_are_joined_with_underscore() {
    let params = QueryParams::new().with(
        "prefs",
        QueryParams::new()
            .with("permissionLevel", "public")
            .with("voting", QueryParams::new().with("enabled", false)),
    );

    assert_eq!(
        pairs(&params),
        vec![
            pair("prefs_permissionLevel", "public"),
            pair("prefs_voting_enabled", "false"),
        ]
    );
}

#[test]
fn given_params_when_inspected_then_order_and_membership_are_preserved() {
    let mut params = QueryParams::new();
    params.push("b", 2_u32);
    params.push("a", QueryValue::Text("1".into()));

    assert_eq!(params.len(), 2);
    assert!(params.contains("a"));
    assert!(!params.contains("c"));
    assert_eq!(pairs(&params)[0].0, "b");
}
