use std::collections::HashSet;

use crate::{
    spotify::{ARTIST_BATCH_SIZE, Fetched, MusicApi},
    types::{GenreMap, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_GENRE},
    warning,
};

/// Unique artist ids of a track table, in first-seen order.
pub fn unique_artist_ids(tracks: &[TrackRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .filter(|t| seen.insert(t.artist_id.as_str()))
        .map(|t| t.artist_id.clone())
        .collect()
}

/// Resolves the genres of the given artists.
///
/// Ids are requested in batches of [`ARTIST_BATCH_SIZE`], one request per
/// batch, serially. Every input id ends up as a key of the returned map:
///
/// - artists with an empty genre list get `["Unknown Genre"]`
/// - ids the API returned `null` for get the placeholder too
/// - a failed batch is logged and all of its ids get the placeholder; it is
///   not retried, but counted in [`Fetched::skipped`]
/// - the `Unknown` artist of entries without artists is never requested, a
///   malformed id would fail its whole batch
pub async fn resolve_genres<A: MusicApi + ?Sized>(
    api: &A,
    artist_ids: &[String],
) -> Fetched<GenreMap> {
    let mut genres = GenreMap::with_capacity(artist_ids.len());
    let mut skipped = 0;

    let requested: Vec<String> = artist_ids
        .iter()
        .filter(|id| id.as_str() != UNKNOWN_ARTIST)
        .cloned()
        .collect();

    for (index, batch) in requested.chunks(ARTIST_BATCH_SIZE).enumerate() {
        match api.several_artists(batch).await {
            Ok(artists) => {
                for artist in artists.into_iter().flatten() {
                    let list = if artist.genres.is_empty() {
                        placeholder()
                    } else {
                        artist.genres
                    };
                    genres.insert(artist.id, list);
                }
            }
            Err(e) => {
                skipped += 1;
                warning!("Skipping genres of artist batch {}: {}", index + 1, e);
            }
        }
    }

    for id in artist_ids {
        genres.entry(id.clone()).or_insert_with(placeholder);
    }

    Fetched {
        value: genres,
        skipped,
    }
}

fn placeholder() -> Vec<String> {
    vec![UNKNOWN_GENRE.to_string()]
}
