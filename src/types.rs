use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Placeholder used when a playlist entry comes without any artist.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// Placeholder genre for artists Spotify knows no genres for.
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

/// Maps an artist id to its genres. Values are never empty.
pub type GenreMap = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Which of the three compared playlists a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    User,
    Global,
    Curator,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::User, Source::Global, Source::Curator];

    pub fn label(self) -> &'static str {
        match self {
            Source::User => "user",
            Source::Global => "global",
            Source::Curator => "curator",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Source::User => "Your Playlist",
            Source::Global => "Global Hits",
            Source::Curator => "Curator's Playlist",
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            Source::User => "#1DB954",
            Source::Global => "#FF6060",
            Source::Curator => "#4B8BF5",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized playlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub artist_id: String,
    pub popularity: u8,
    pub source: Source,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: Option<String>,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub track: String,
    pub artist: String,
    pub popularity: u8,
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub genre: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct SimilarityTableRow {
    pub playlist: String,
    #[tabled(rename = "Your Playlist")]
    pub user: String,
    #[tabled(rename = "Global Hits")]
    pub global: String,
    #[tabled(rename = "Curator's Playlist")]
    pub curator: String,
}
