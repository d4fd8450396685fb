use crate::{
    info,
    spotify::{Fetched, MusicApi, PLAYLIST_PAGE_LIMIT},
    success,
    types::{PlaylistItem, Source, TrackRecord, UNKNOWN_ARTIST},
    warning,
};

/// Retrieves every entry of a playlist and normalizes it into track records.
///
/// Pages are requested [`PLAYLIST_PAGE_LIMIT`] entries at a time until the API
/// stops reporting a `next` page. A failing page is skipped with a warning:
/// once the playlist total is known the fetch continues at the following
/// offset, a failure on the very first page ends the fetch with whatever was
/// collected (nothing).
///
/// The number of skipped pages is reported alongside the records.
///
/// Entries without a track or without a track id (removed tracks, some local
/// files) are dropped. See [`normalize_item`] for the remaining rules.
pub async fn fetch_playlist<A: MusicApi + ?Sized>(
    api: &A,
    playlist_id: &str,
    source: Source,
) -> Fetched<Vec<TrackRecord>> {
    info!("Fetching {} ({})", source.display_name(), playlist_id);

    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut offset: u32 = 0;
    let mut total: Option<u32> = None;
    let mut skipped = 0;

    loop {
        match api
            .playlist_tracks(playlist_id, offset, PLAYLIST_PAGE_LIMIT)
            .await
        {
            Ok(page) => {
                total = Some(page.total);
                let has_next = page.next.is_some();
                items.extend(page.items);

                if !has_next {
                    break;
                }
                offset += PLAYLIST_PAGE_LIMIT;
            }
            Err(e) => {
                skipped += 1;
                warning!(
                    "Skipping page at offset {} of playlist {}: {}",
                    offset,
                    playlist_id,
                    e
                );
                match total {
                    Some(t) if offset + PLAYLIST_PAGE_LIMIT < t => offset += PLAYLIST_PAGE_LIMIT,
                    _ => break,
                }
            }
        }
    }

    let records: Vec<TrackRecord> = items
        .into_iter()
        .filter_map(|item| normalize_item(item, source))
        .collect();

    success!(
        "Retrieved {} tracks for {}.",
        records.len(),
        source.display_name()
    );
    Fetched {
        value: records,
        skipped,
    }
}

/// Flattens one playlist entry.
///
/// Returns `None` for entries without a track or track id. The first listed
/// artist is the primary one; an empty artist list (and missing artist
/// fields) fall back to `Unknown`. Missing popularity counts as 0 and values
/// above 100 are clamped.
pub fn normalize_item(item: PlaylistItem, source: Source) -> Option<TrackRecord> {
    let track = item.track?;
    let track_id = track.id.filter(|id| !id.is_empty())?;

    let (artist_name, artist_id) = match track.artists.into_iter().next() {
        Some(artist) => (
            artist.name.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            artist.id.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        ),
        None => (UNKNOWN_ARTIST.to_string(), UNKNOWN_ARTIST.to_string()),
    };

    Some(TrackRecord {
        track_id,
        track_name: track.name.unwrap_or_default(),
        artist_name,
        artist_id,
        popularity: track.popularity.unwrap_or(0).min(100) as u8,
        source,
    })
}
