use std::{collections::HashMap, future::Future};

use tokio::sync::Mutex;

use crate::{
    spotify::{Fetched, MusicApi, artists, playlists},
    types::{GenreMap, Source, TrackRecord},
    utils,
};

/// In-process memoization keyed by a digest of (function, arguments).
///
/// Only complete results are stored. A fetch that skipped failed requests is
/// handed to the caller but computed again on the next call.
///
/// The lock is not held while a value is computed, so two identical requests
/// racing each other may both compute it; the later insert wins.
pub struct MemoCache<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V: Clone> MemoCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    pub async fn get_or_compute<F, Fut>(&self, key: String, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Fetched<V>>,
    {
        if let Some(value) = self.get(&key).await {
            return value;
        }

        let fetched = compute().await;
        if fetched.is_complete() {
            self.entries
                .lock()
                .await
                .insert(key, fetched.value.clone());
        }
        fetched.value
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

impl<V: Clone> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Memoized versions of the two expensive API operations.
#[derive(Default)]
pub struct Memo {
    pub playlists: MemoCache<Vec<TrackRecord>>,
    pub genres: MemoCache<GenreMap>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn playlist(
        &self,
        api: &dyn MusicApi,
        playlist_id: &str,
        source: Source,
    ) -> Vec<TrackRecord> {
        let key = utils::memo_key("fetch_playlist", &[playlist_id, source.label()]);
        self.playlists
            .get_or_compute(key, || playlists::fetch_playlist(api, playlist_id, source))
            .await
    }

    pub async fn genres(&self, api: &dyn MusicApi, artist_ids: &[String]) -> GenreMap {
        let args: Vec<&str> = artist_ids.iter().map(String::as_str).collect();
        let key = utils::memo_key("resolve_genres", &args);
        self.genres
            .get_or_compute(key, || artists::resolve_genres(api, artist_ids))
            .await
    }

    /// Forgets everything, e.g. after a new login.
    pub async fn clear(&self) {
        self.playlists.clear().await;
        self.genres.clear().await;
    }
}
