#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use sporlboard::{
    spotify::{ApiError, MusicApi},
    types::{Artist, ArtistRef, PlaylistItem, PlaylistTrack, PlaylistTracksPage, Source, TrackRecord},
};

// Helper function to create a track record
pub fn track(id: &str, popularity: u8, artist: &str, source: Source) -> TrackRecord {
    TrackRecord {
        track_id: id.to_string(),
        track_name: format!("Song {}", id),
        artist_name: artist.to_string(),
        artist_id: format!("{}_id", artist),
        popularity,
        source,
    }
}

// Helper function to create a raw playlist entry
pub fn item(id: Option<&str>, popularity: u32, artists: &[(&str, &str)]) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            id: id.map(str::to_string),
            name: id.map(|i| format!("Song {}", i)),
            popularity: Some(popularity),
            artists: artists
                .iter()
                .map(|(aid, name)| ArtistRef {
                    id: Some(aid.to_string()),
                    name: Some(name.to_string()),
                })
                .collect(),
        }),
    }
}

pub fn artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

/// In-memory stand-in for the Spotify Web API.
#[derive(Default)]
pub struct FakeApi {
    pub playlists: HashMap<String, Vec<PlaylistItem>>,
    pub failing_pages: HashSet<(String, u32)>,
    pub artists: HashMap<String, Artist>,
    /// 0-based indexes of `several_artists` calls that fail.
    pub failing_artist_calls: HashSet<usize>,
    /// Number of upcoming `playlist_tracks` calls that fail before the API
    /// recovers.
    pub playlist_outage: AtomicUsize,
    pub playlist_calls: AtomicUsize,
    pub artist_calls: AtomicUsize,
    pub artist_batches: Mutex<Vec<Vec<String>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, id: &str, items: Vec<PlaylistItem>) -> Self {
        self.playlists.insert(id.to_string(), items);
        self
    }

    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.artists.insert(artist.id.clone(), artist);
        self
    }

    pub fn failing_page(mut self, id: &str, offset: u32) -> Self {
        self.failing_pages.insert((id.to_string(), offset));
        self
    }

    pub fn failing_first_playlist_calls(self, count: usize) -> Self {
        self.playlist_outage.store(count, Ordering::SeqCst);
        self
    }

    pub fn failing_artist_call(mut self, index: usize) -> Self {
        self.failing_artist_calls.insert(index);
        self
    }

    pub fn playlist_calls(&self) -> usize {
        self.playlist_calls.load(Ordering::SeqCst)
    }

    pub fn artist_calls(&self) -> usize {
        self.artist_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MusicApi for FakeApi {
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistTracksPage, ApiError> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);

        let in_outage = self
            .playlist_outage
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if in_outage {
            return Err(ApiError::NotAuthenticated);
        }

        if self
            .failing_pages
            .contains(&(playlist_id.to_string(), offset))
        {
            return Err(ApiError::NotAuthenticated);
        }

        let items = self.playlists.get(playlist_id).cloned().unwrap_or_default();
        let total = items.len() as u32;
        let start = (offset as usize).min(items.len());
        let end = ((offset + limit) as usize).min(items.len());
        let next = (offset + limit < total).then(|| format!("next?offset={}", offset + limit));

        Ok(PlaylistTracksPage {
            items: items[start..end].to_vec(),
            next,
            total,
        })
    }

    async fn several_artists(&self, ids: &[String]) -> Result<Vec<Option<Artist>>, ApiError> {
        let call = self.artist_calls.fetch_add(1, Ordering::SeqCst);
        self.artist_batches.lock().unwrap().push(ids.to_vec());

        if self.failing_artist_calls.contains(&call) {
            return Err(ApiError::NotAuthenticated);
        }

        Ok(ids.iter().map(|id| self.artists.get(id).cloned()).collect())
    }
}
