// Unit tests for TOML config loading, saving and validation

use crate::TRELLO_API_BASE_URL;
use crate::config::TrelloConfig;
use crate::error::ConfigError;

use std::time::Duration;

use tempfile::TempDir;

#[test]
fn given_missing_file_when_loading_then_defaults_are_returned() {
    let dir = TempDir::new().unwrap();

    let config = TrelloConfig::load(dir.path()).unwrap();

    assert_eq!(config, TrelloConfig::default());
    assert_eq!(config.api.base_url, TRELLO_API_BASE_URL);
    assert_eq!(config.credentials.key_env, "TRELLO_KEY");
    assert_eq!(config.credentials.token_env, "TRELLO_TOKEN");
}

/// **VALUE**: Verifies a saved config reads back unchanged and leaves no temp file.
///
/// **BUG THIS CATCHES**: A missed rename would leave `config.toml.tmp` behind and
/// the next load would silently fall back to defaults.
#[test]
fn given_saved_config_when_loading_then_values_survive() {
    let dir = TempDir::new().unwrap();
    let mut config = TrelloConfig::default();
    config.api.timeout_secs = 12;
    config.retry.max_retries = 5;
    config.credentials.token_env = "MY_TRELLO_TOKEN".to_string();

    config.save(dir.path()).unwrap();
    let loaded = TrelloConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(dir.path().join("config.toml").exists());
    assert!(!dir.path().join("config.toml.tmp").exists());
}

#[test]
fn given_partial_file_when_loading_then_missing_fields_use_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[retry]\nmax_retries = 0\n",
    )
    .unwrap();

    let config = TrelloConfig::load(dir.path()).unwrap();

    assert_eq!(config.retry.max_retries, 0);
    assert_eq!(config.retry.initial_interval_ms, 200);
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.version, 1);
}

#[test]
fn given_corrupted_file_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[api\nbase_url = ").unwrap();

    let result = TrelloConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: Verifies out-of-range values are rejected on load.
#[test]
fn given_invalid_values_when_validating_then_validation_error() {
    let mut zero_timeout = TrelloConfig::default();
    zero_timeout.api.timeout_secs = 0;

    let mut bad_scheme = TrelloConfig::default();
    bad_scheme.api.base_url = "ftp://api.trello.com/1/".to_string();

    let mut inverted_intervals = TrelloConfig::default();
    inverted_intervals.retry.initial_interval_ms = 5_000;
    inverted_intervals.retry.max_interval_ms = 1_000;

    let mut future_version = TrelloConfig::default();
    future_version.version = 2;

    let mut blank_env = TrelloConfig::default();
    blank_env.credentials.key_env = "  ".to_string();

    for config in [zero_timeout, bad_scheme, inverted_intervals, future_version, blank_env] {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "expected validation failure for {config:?}"
        );
    }
}

#[test]
fn given_invalid_file_when_loading_then_validation_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[api]\ntimeout_secs = 900\n").unwrap();

    let result = TrelloConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_retry_settings_when_converted_then_durations_match() {
    let retry = TrelloConfig::default().retry.to_retry_config();

    assert_eq!(retry.max_retries, 3);
    assert_eq!(retry.initial_interval, Duration::from_millis(200));
    assert_eq!(retry.max_interval, Duration::from_secs(2));
    assert_eq!(retry.max_elapsed, Duration::from_secs(10));
}
