//! The Trello account handle.
//!
//! A [`TrelloClient`] owns the HTTP connection pool, the credentials and the
//! retry policy. It is cheap to clone; every entity keeps a clone of the
//! client it was loaded with. Several clients (several accounts) can be used
//! side by side.

pub mod query;
pub mod transport;

pub use query::{QueryParams, QueryValue};
pub use transport::RetryConfig;

use crate::TRELLO_API_BASE_URL;
use crate::config::TrelloConfig;
use crate::credentials::Credentials;
use crate::credentials::validation::CredentialValidator;
use crate::error::{CredentialKind, KeyValidationFailure, TrelloError};

use common::RedactedSecret;
use models::MemberData;

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use reqwest::Client;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const MEMBER_ME_ENDPOINT: &str = "members/me";
const RESERVED_PARAMS: [&str; 2] = ["key", "token"];

/// What `connect` does when the key/token pair fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnValidationFailure {
    /// Return the validation error.
    #[default]
    Error,
    /// Log a warning and return `Ok(None)`.
    Warn,
}

impl From<bool> for OnValidationFailure {
    /// `true` selects [`OnValidationFailure::Error`].
    fn from(error_on_failure: bool) -> Self {
        if error_on_failure {
            OnValidationFailure::Error
        } else {
            OnValidationFailure::Warn
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ClientInner {
    pub(crate) http: Client,
    pub(crate) base_url: Url,
    pub(crate) credentials: Credentials,
    pub(crate) user: Option<String>,
    pub(crate) retry: RetryConfig,
}

/// An authenticated Trello account.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl TrelloClient {
    /// Validate `key`/`token` and connect with default settings.
    ///
    /// # Arguments
    /// * `key` - Developer key. Cannot be empty.
    /// * `token` - Member token. Optional when only reading public boards.
    /// * `on_failure` - Whether a validation failure is an error or `Ok(None)`.
    ///
    /// # Errors
    /// Transport failures are always returned as errors, whatever `on_failure` says.
    pub async fn connect(
        key: impl Into<String>,
        token: Option<String>,
        on_failure: impl Into<OnValidationFailure>,
    ) -> Result<Option<Self>, TrelloError> {
        let mut builder = TrelloClientBuilder::default().with_key(key);
        if let Some(token) = token {
            builder = builder.with_token(token);
        }
        builder.connect(on_failure.into()).await
    }

    pub fn builder() -> TrelloClientBuilder {
        TrelloClientBuilder::default()
    }

    /// Username of the account, known when a token was supplied.
    pub fn user(&self) -> Option<&str> {
        self.inner.user.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// The authentication string appended to every URL. Do not expose it.
    pub fn auth(&self) -> String {
        self.inner.credentials.auth_query()
    }

    pub fn can_write(&self) -> bool {
        self.inner.credentials.has_token()
    }

    /// Build a request URL: `<base>/<page>?<params>&key=..&token=..`.
    ///
    /// `page` may start with `/`. Parameters named `key` or `token` are
    /// dropped; authentication always comes from the client.
    #[track_caller]
    pub fn make_url(&self, page: &str, params: &QueryParams) -> Result<Url, TrelloError> {
        let page = page.trim().trim_start_matches('/');
        if page.is_empty() {
            return Err(TrelloError::validation("Page cannot be empty"));
        }

        let mut url = self.inner.base_url.join(page)?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params.flatten() {
                if RESERVED_PARAMS.contains(&name.as_str()) {
                    warn!("Ignoring '{name}' query parameter; authentication comes from the client");
                    continue;
                }
                query.append_pair(&name, &value);
            }
            self.inner.credentials.append_to(&mut query);
        }

        Ok(url)
    }
}

/// Builder for [`TrelloClient`].
#[derive(Debug, Default)]
pub struct TrelloClientBuilder {
    key: Option<RedactedSecret>,
    token: Option<RedactedSecret>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl TrelloClientBuilder {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(RedactedSecret::new(key));
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(RedactedSecret::new(token));
        self
    }

    pub fn with_secrets(mut self, key: RedactedSecret, token: Option<RedactedSecret>) -> Self {
        self.key = Some(key);
        self.token = token;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Apply base URL, timeout and retry settings from a loaded config.
    pub fn with_config(self, config: &TrelloConfig) -> Self {
        self.with_base_url(config.api.base_url.clone())
            .with_timeout(Duration::from_secs(config.api.timeout_secs))
            .with_retry(config.retry.to_retry_config())
    }

    /// Validate the credentials and build the client.
    ///
    /// With a token, the pair is checked against `GET /1/members/me` and the
    /// username is recorded. Without one only the key format is checked.
    pub async fn connect(
        self,
        on_failure: OnValidationFailure,
    ) -> Result<Option<TrelloClient>, TrelloError> {
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(TRELLO_API_BASE_URL))?;
        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT_DURATION))
            .build()?;
        let retry = self.retry.unwrap_or_default();

        let credentials = match validate_credentials(self.key, self.token) {
            Ok(credentials) => credentials,
            Err(error) => return handle_validation_failure(error, on_failure),
        };

        let mut inner = ClientInner {
            http,
            base_url,
            credentials,
            user: None,
            retry,
        };

        if inner.credentials.has_token() {
            let probe = TrelloClient {
                inner: Arc::new(inner.clone()),
            };
            let params = QueryParams::new().with("fields", "username,fullName");

            match probe.get::<MemberData>(MEMBER_ME_ENDPOINT, params).await {
                Ok(member) => {
                    info!("Connected to Trello as {}", member.username);
                    inner.user = Some(member.username);
                }
                Err(TrelloError::Api { status_code, .. }) if status_code.is_auth_failure() => {
                    let error = TrelloError::key_validation(
                        CredentialKind::Token,
                        KeyValidationFailure::Rejected { status_code },
                    );
                    return handle_validation_failure(error, on_failure);
                }
                Err(error) => return Err(error),
            }
        } else {
            info!("Connected to Trello without a token (read-only)");
        }

        Ok(Some(TrelloClient {
            inner: Arc::new(inner),
        }))
    }
}

#[track_caller]
fn parse_base_url(raw: &str) -> Result<Url, TrelloError> {
    // Url::join drops the last path segment unless the base ends with '/'.
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}

fn validate_credentials(
    key: Option<RedactedSecret>,
    token: Option<RedactedSecret>,
) -> Result<Credentials, TrelloError> {
    let key = key.ok_or_else(|| {
        TrelloError::key_validation(CredentialKind::Key, KeyValidationFailure::Empty)
    })?;
    let key = CredentialValidator::key().validate_and_wrap(key.expose())?;

    let token = token
        .map(|token| CredentialValidator::token().validate_and_wrap(token.expose()))
        .transpose()?;

    Ok(Credentials::new(key, token))
}

fn handle_validation_failure(
    error: TrelloError,
    on_failure: OnValidationFailure,
) -> Result<Option<TrelloClient>, TrelloError> {
    match on_failure {
        OnValidationFailure::Error => Err(error),
        OnValidationFailure::Warn => {
            warn!("Trello credential validation failed: {error}");
            Ok(None)
        }
    }
}
