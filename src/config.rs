//! Configuration management for the sporlboard dashboard.
//!
//! Configuration comes from three places, highest priority first:
//! 1. Environment variables
//! 2. `.env` / `secrets.env` files in the local data directory
//! 3. Application defaults (everything except the OAuth credentials)
//!
//! The OAuth credentials (client id, client secret, redirect URI) have no
//! defaults. [`Credentials::resolve`] fails when any of them is missing so the
//! caller can halt before anything is rendered.

use std::{collections::HashMap, env, path::Path, path::PathBuf};

use thiserror::Error;

pub const CLIENT_ID_VAR: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "SPOTIFY_API_REDIRECT_URI";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8501";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SCOPE: &str = "user-library-read playlist-read-private";
const DEFAULT_GLOBAL_PLAYLIST_ID: &str = "4bW0GSFWFWqOjWmkHII7aw";
const DEFAULT_CURATOR_PLAYLIST_ID: &str = "6i0LNQ0QCzlFGx2lZXxSdj";

/// Returns the application's directory inside the platform data directory.
///
/// - Linux: `~/.local/share/sporlboard`
/// - macOS: `~/Library/Application Support/sporlboard`
/// - Windows: `%LOCALAPPDATA%/sporlboard`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlboard");
    path
}

/// Loads environment variables from `.env` in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is
/// fine, everything it could set also has a default or can come from the
/// real environment. A file that exists but cannot be parsed is an error.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Runtime settings that all have sensible defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub scope: String,
    pub global_playlist_id: String,
    pub curator_playlist_id: String,
}

impl Settings {
    /// Reads the settings from the environment, falling back to defaults for
    /// anything unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            server_addr: get("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            api_url: get("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: get("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: get("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            scope: get("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            global_playlist_id: get("GLOBAL_PLAYLIST_ID", DEFAULT_GLOBAL_PLAYLIST_ID),
            curator_playlist_id: get("CURATOR_PLAYLIST_ID", DEFAULT_CURATOR_PLAYLIST_ID),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Key/value secrets read from `secrets.env` in the data directory.
///
/// Values are kept out of the process environment and only consulted by the
/// credential resolver when the environment has no (or a blank) value.
#[derive(Debug, Clone, Default)]
pub struct SecretsStore {
    values: HashMap<String, String>,
}

impl SecretsStore {
    pub fn default_path() -> PathBuf {
        data_dir().join("secrets.env")
    }

    /// Parses a dotenv-formatted secrets file. A missing or unreadable file
    /// yields an empty store; unparsable lines are skipped.
    pub fn load(path: &Path) -> Self {
        let values = match dotenv::from_path_iter(path) {
            Ok(iter) => iter.filter_map(Result::ok).collect(),
            Err(_) => HashMap::new(),
        };
        Self { values }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("missing Spotify credentials: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// OAuth client credentials of the registered Spotify application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    /// Resolves the credentials from the environment, then the secrets store.
    pub fn resolve(secrets: &SecretsStore) -> Result<Self, CredentialsError> {
        Self::resolve_with(|key| env::var(key).ok(), secrets)
    }

    /// Same as [`Credentials::resolve`] with a custom primary lookup in place
    /// of the process environment.
    pub fn resolve_with(
        lookup: impl Fn(&str) -> Option<String>,
        secrets: &SecretsStore,
    ) -> Result<Self, CredentialsError> {
        let value = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| {
                    secrets
                        .get(key)
                        .filter(|v| !v.trim().is_empty())
                        .map(str::to_string)
                })
                .map(|v| v.trim().to_string())
        };

        let client_id = value(CLIENT_ID_VAR);
        let client_secret = value(CLIENT_SECRET_VAR);
        let redirect_uri = value(REDIRECT_URI_VAR);

        match (client_id, client_secret, redirect_uri) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(Self {
                client_id,
                client_secret,
                redirect_uri,
            }),
            (client_id, client_secret, redirect_uri) => {
                let mut missing = Vec::new();
                if client_id.is_none() {
                    missing.push(CLIENT_ID_VAR);
                }
                if client_secret.is_none() {
                    missing.push(CLIENT_SECRET_VAR);
                }
                if redirect_uri.is_none() {
                    missing.push(REDIRECT_URI_VAR);
                }
                Err(CredentialsError::Missing(missing))
            }
        }
    }
}
