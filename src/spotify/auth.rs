use std::time::{Duration, Instant};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{
    config::{Credentials, Settings},
    error,
    management::AuthPhase,
    server::{AppState, start_api_server},
    spotify::ApiError,
    success,
    types::{Token, TokenResponse},
    utils, warning,
};

/// Client side of Spotify's OAuth 2.0 authorization-code flow.
///
/// Authenticates against the token endpoint with HTTP Basic client
/// credentials, so it is only suitable where the client secret stays on the
/// machine running the dashboard.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    credentials: Credentials,
    auth_url: String,
    token_url: String,
    scope: String,
}

impl OAuthClient {
    pub fn new(credentials: Credentials, settings: &Settings) -> Self {
        Self {
            http: Client::new(),
            credentials,
            auth_url: settings.auth_url.clone(),
            token_url: settings.token_url.clone(),
            scope: settings.scope.clone(),
        }
    }

    /// URL the user has to visit to grant access. `state` is echoed back to
    /// the callback and must match the pending state of the session.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
            auth_url = self.auth_url,
            client_id = urlencoding::encode(&self.credentials.client_id),
            redirect_uri = urlencoding::encode(&self.credentials.redirect_uri),
            scope = urlencoding::encode(&self.scope),
            state = urlencoding::encode(state),
        )
    }

    /// Value of the `Authorization` header for the token endpoint.
    pub fn client_auth_header(&self) -> String {
        let raw = format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        );
        format!("Basic {}", STANDARD.encode(raw))
    }

    /// Exchanges an authorization code received on the callback for a token.
    pub async fn exchange_code(&self, code: &str) -> Result<Token, ApiError> {
        let res = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.credentials.redirect_uri),
            ])
            .await?;

        Ok(Token {
            access_token: res.access_token,
            refresh_token: res.refresh_token.unwrap_or_default(),
            scope: res.scope,
            expires_in: res.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    /// Trades a refresh token for a fresh access token. Spotify may omit the
    /// refresh token in the response, in which case the old one stays valid.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token, ApiError> {
        let res = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        Ok(Token {
            access_token: res.access_token,
            refresh_token: res
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            scope: res.scope,
            expires_in: res.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, self.client_auth_header())
            .form(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Token {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res.json::<TokenResponse>().await?)
    }
}

/// Runs the login flow from the terminal.
///
/// Starts the dashboard server in the background so the redirect URI can be
/// served, opens the authorize URL in the browser and waits up to two minutes
/// for the callback to cache a token.
pub async fn auth(state: AppState) {
    let server_state = state.clone();
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = {
        let mut session = state.session.lock().await;
        let oauth_state = utils::generate_state();
        session.begin_authorization(oauth_state)
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    if wait_for_token(&state).await {
        success!("Authentication successful!");
    } else {
        error!("Authentication failed or timed out.");
    }
}

async fn wait_for_token(state: &AppState) -> bool {
    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if state.session.lock().await.phase() != AuthPhase::AwaitingAuthorization {
            return true;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    false
}
