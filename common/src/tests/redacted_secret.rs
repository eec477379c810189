// Unit tests for RedactedSecret
// Tests that credentials never leak through formatting or serialization

use crate::RedactedSecret;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

/// **VALUE**: Verifies Debug and Display never print the secret.
///
/// **WHY THIS MATTERS**: Clients and entities are routinely logged with `{:?}`.
/// A leaked Trello token grants full account access.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    let secret = RedactedSecret::new(SECRET);

    let debug = format!("{secret:?}");
    let display = format!("{secret}");

    assert!(!debug.contains(SECRET));
    assert!(!display.contains(SECRET));
    assert!(debug.contains("32 chars"));
}

/// **VALUE**: Verifies serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a derived `Serialize` sneaking the key into
/// a saved config file or a JSON payload.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    let secret = RedactedSecret::new(SECRET);

    let result = serde_json::to_string(&secret);

    let message = result.unwrap_err().to_string();
    assert!(message.contains("Credential Serialization Refused"));
    assert!(!message.contains(SECRET));
}

#[test]
fn given_secret_when_exposed_then_returns_original_value() {
    let secret = RedactedSecret::new(String::from(SECRET));

    assert_eq!(secret.expose(), SECRET);
    assert_eq!(secret.len(), 32);
    assert!(!secret.is_empty());
}
