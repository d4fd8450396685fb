//! # Spotify Integration Module
//!
//! Everything that talks to the Spotify Web API lives here:
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow (authorize URL, code
//!   exchange, token refresh) and the terminal login flow
//! - [`playlists`] - Paginated playlist track retrieval and normalization
//!   into [`TrackRecord`](crate::types::TrackRecord)s
//! - [`artists`] - Batched artist lookups resolving genres
//!
//! The fetchers are written against the [`MusicApi`] trait instead of the
//! concrete [`SpotifyClient`], so the pagination and batching rules can be
//! exercised without a network.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - playlist entries, 100 per page
//! - `GET /artists?ids=` - up to 50 artists per request
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Error Policy
//!
//! Requests are issued serially and never retried. Callers decide what a
//! failure means: the playlist fetcher skips the page, the genre resolver
//! falls back to placeholder genres for the batch.

pub mod artists;
pub mod auth;
pub mod playlists;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    management::TokenManager,
    types::{Artist, PlaylistTracksPage, SeveralArtistsResponse},
};

use self::auth::OAuthClient;

/// Maximum number of playlist entries per page.
pub const PLAYLIST_PAGE_LIMIT: u32 = 100;

/// Maximum number of ids accepted by `GET /artists`.
pub const ARTIST_BATCH_SIZE: usize = 50;

const PLAYLIST_FIELDS: &str = "items(track(id,name,popularity,artists(id,name))),next,total";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token request rejected ({status}): {body}")]
    Token { status: u16, body: String },
    #[error("not authenticated with Spotify")]
    NotAuthenticated,
}

/// Outcome of a fetch that skips failing requests instead of aborting.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    /// Number of requests that failed and were skipped.
    pub skipped: usize,
}

impl<T> Fetched<T> {
    /// True when no request was skipped. Only complete results are memoized.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

/// The parts of the Spotify Web API the dashboard consumes.
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// One page of playlist entries starting at `offset`.
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistTracksPage, ApiError>;

    /// Artist objects for at most [`ARTIST_BATCH_SIZE`] ids, in request
    /// order. Unknown ids come back as `None`.
    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Option<Artist>>, ApiError>;
}

/// Authenticated Spotify Web API client.
///
/// Holds the token manager behind a mutex and refreshes the access token
/// transparently before each request when it is about to expire.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    oauth: OAuthClient,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, oauth: OAuthClient, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            oauth,
            tokens: Mutex::new(tokens),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let token = self.tokens.lock().await.get_valid_token(&self.oauth).await;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MusicApi for SpotifyClient {
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistTracksPage, ApiError> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks?fields={fields}&offset={offset}&limit={limit}",
            uri = self.api_url,
            id = urlencoding::encode(playlist_id),
            fields = urlencoding::encode(PLAYLIST_FIELDS),
            offset = offset,
            limit = limit
        );

        self.get_json::<PlaylistTracksPage>(&api_url).await
    }

    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Option<Artist>>, ApiError> {
        let api_url = format!(
            "{uri}/artists?ids={ids}",
            uri = self.api_url,
            ids = urlencoding::encode(&ids.join(","))
        );

        let res = self.get_json::<SeveralArtistsResponse>(&api_url).await?;
        Ok(res.artists)
    }
}
