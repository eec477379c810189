//! Trello credentials: the developer key and the optional member token.
//!
//! # Security
//! - Both values are wrapped in [`RedactedSecret`] (redacted Debug, zeroized on drop)
//! - Never logged or serialized; only the length is ever printed
//! - The authentication query string is built on demand and not cached

pub mod validation;

use crate::config::CredentialSources;
use crate::error::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};
use url::form_urlencoded::Serializer;

/// Key/token pair identifying one Trello account.
///
/// A token is optional; without one only public boards can be read.
#[derive(Debug, Clone)]
pub struct Credentials {
    key: RedactedSecret,
    token: Option<RedactedSecret>,
}

impl Credentials {
    pub fn new(key: RedactedSecret, token: Option<RedactedSecret>) -> Self {
        Self { key, token }
    }

    pub fn key(&self) -> &RedactedSecret {
        &self.key
    }

    pub fn token(&self) -> Option<&RedactedSecret> {
        self.token.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// The `key=...&token=...` string appended to every request URL.
    ///
    /// Sensitive: never send this anywhere but Trello.
    pub fn auth_query(&self) -> String {
        let mut serializer = Serializer::new(String::new());
        self.append_to(&mut serializer);
        serializer.finish()
    }

    pub(crate) fn append_to<T: url::form_urlencoded::Target>(&self, serializer: &mut Serializer<'_, T>) {
        serializer.append_pair("key", self.key.expose());
        if let Some(token) = &self.token {
            serializer.append_pair("token", token.expose());
        }
    }
}

/// Raw credentials read from the environment, not yet validated.
#[derive(Debug)]
pub struct EnvCredentials {
    pub key: RedactedSecret,
    pub token: Option<RedactedSecret>,
    /// `.env` file that was loaded, if any.
    pub dotenv_path: Option<PathBuf>,
}

/// Read the key and token from the environment, loading `.env` first.
///
/// The key variable is required. An unset or empty token variable means
/// read-only access to public boards.
#[track_caller]
pub fn load_env_credentials(sources: &CredentialSources) -> Result<EnvCredentials, ConfigError> {
    let dotenv_path = try_load_dotenv();
    if dotenv_path.is_none() {
        debug!("No .env file found - using existing environment variables");
    }

    let key = read_var(&sources.key_env)?.ok_or_else(|| ConfigError::MissingCredential {
        location: ErrorLocation::caller(),
        variable: sources.key_env.clone(),
    })?;

    let token = read_var(&sources.token_env)?;
    match &token {
        Some(token) => info!(
            "Loaded Trello credentials from {} and {} ({} char token)",
            sources.key_env,
            sources.token_env,
            token.len()
        ),
        None => info!(
            "Loaded Trello key from {}; {} not set, access is read-only",
            sources.key_env, sources.token_env
        ),
    }

    Ok(EnvCredentials {
        key,
        token,
        dotenv_path,
    })
}

#[track_caller]
fn read_var(name: &str) -> Result<Option<RedactedSecret>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(RedactedSecret::new(value))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            warn!("Env var {name} contains invalid unicode");
            Err(ConfigError::EnvLoad {
                location: ErrorLocation::caller(),
                reason: format!("{name} contains invalid unicode"),
            })
        }
    }
}

/// Attempts to load `.env` from the working directory, then next to the executable.
fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return Some(path);
    }

    let exe_dir = env::current_exe().ok()?.parent()?.to_path_buf();
    let env_path = exe_dir.join(".env");
    if !env_path.exists() {
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from: {:?}", env_path);
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {:?}: {}", env_path, e);
            None
        }
    }
}
