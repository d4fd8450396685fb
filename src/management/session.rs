use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{
    management::TokenManager,
    spotify::{ApiError, MusicApi, SpotifyClient, auth::OAuthClient},
};

/// Where the session stands in the OAuth flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No token yet, the user has to log in.
    AwaitingAuthorization,
    /// A token was obtained or loaded from the cache.
    TokenCached,
    /// An authenticated API client has been built.
    Ready,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no login in progress")]
    NoPendingAuthorization,
    #[error("state parameter does not match the pending login")]
    StateMismatch,
    #[error("code exchange failed: {0}")]
    Exchange(#[from] ApiError),
}

/// Explicit authentication context shared by the request handlers.
///
/// Holds the pending OAuth `state`, the token once there is one, and the
/// authenticated client built from it.
pub struct Session {
    oauth: OAuthClient,
    api_url: String,
    token_path: PathBuf,
    pending_state: Option<String>,
    tokens: Option<TokenManager>,
    client: Option<Arc<dyn MusicApi>>,
}

impl Session {
    pub fn new(oauth: OAuthClient, api_url: impl Into<String>, token_path: PathBuf) -> Self {
        Self {
            oauth,
            api_url: api_url.into(),
            token_path,
            pending_state: None,
            tokens: None,
            client: None,
        }
    }

    /// Session that is already authenticated with the given client.
    pub fn with_client(oauth: OAuthClient, client: Arc<dyn MusicApi>) -> Self {
        Self {
            oauth,
            api_url: String::new(),
            token_path: PathBuf::new(),
            pending_state: None,
            tokens: None,
            client: Some(client),
        }
    }

    /// Picks up a token cached by an earlier run. Returns whether one was
    /// found.
    pub async fn restore(&mut self) -> bool {
        if self.phase() != AuthPhase::AwaitingAuthorization {
            return true;
        }
        match TokenManager::load_from(&self.token_path).await {
            Ok(tokens) => {
                self.tokens = Some(tokens);
                true
            }
            Err(_) => false,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        if self.client.is_some() {
            AuthPhase::Ready
        } else if self.tokens.is_some() {
            AuthPhase::TokenCached
        } else {
            AuthPhase::AwaitingAuthorization
        }
    }

    /// Remembers `state` as the pending login and returns the URL the user
    /// has to visit. A new call replaces the previous pending state.
    pub fn begin_authorization(&mut self, state: String) -> String {
        let url = self.oauth.authorize_url(&state);
        self.pending_state = Some(state);
        url
    }

    /// First half of the OAuth callback: checks `state` against the pending
    /// login and consumes it. The returned exchange runs without the session,
    /// so other requests aren't blocked by the token endpoint round trip.
    pub fn accept_callback(&mut self, state: &str) -> Result<CodeExchange, SessionError> {
        let Some(pending) = self.pending_state.as_deref() else {
            return Err(SessionError::NoPendingAuthorization);
        };
        if pending != state {
            return Err(SessionError::StateMismatch);
        }

        self.pending_state = None;
        Ok(CodeExchange {
            oauth: self.oauth.clone(),
            token_path: self.token_path.clone(),
        })
    }

    /// Second half of the OAuth callback: replaces the token and drops any
    /// client built from the previous one.
    pub fn install_tokens(&mut self, tokens: TokenManager) {
        self.tokens = Some(tokens);
        self.client = None;
    }

    /// The authenticated client, built on first use from the cached token.
    pub fn client(&mut self) -> Option<Arc<dyn MusicApi>> {
        if self.client.is_none() {
            let tokens = self.tokens.take()?;
            let client: Arc<dyn MusicApi> = Arc::new(SpotifyClient::new(
                self.api_url.clone(),
                self.oauth.clone(),
                tokens,
            ));
            self.client = Some(client);
        }
        self.client.clone()
    }
}

/// An accepted OAuth callback whose code still has to be exchanged.
pub struct CodeExchange {
    oauth: OAuthClient,
    token_path: PathBuf,
}

impl CodeExchange {
    /// Exchanges the code and caches the token. A failure to write the cache
    /// file only loses the token for the next run, so it is returned as a
    /// warning message.
    pub async fn run(self, code: &str) -> Result<(TokenManager, Option<String>), SessionError> {
        let token = self.oauth.exchange_code(code).await?;
        let tokens = TokenManager::with_path(token, self.token_path);
        let cache_warning = tokens.persist().await.err();
        Ok((tokens, cache_warning))
    }
}
