use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{config, spotify::auth::OAuthClient, types::Token, warning};

/// Refresh this many seconds before the token actually expires.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the OAuth token and its cache file.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load_from(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing it first when it is about to
    /// expire. A failed refresh keeps the old token; the API call that
    /// follows will report the problem.
    pub async fn get_valid_token(&mut self, oauth: &OAuthClient) -> String {
        if self.is_expired() {
            match oauth.refresh(&self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to cache refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
