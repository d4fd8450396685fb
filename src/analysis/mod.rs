//! # Analysis Module
//!
//! Aggregates the three fetched playlists into everything the dashboard
//! shows. All functions here are pure: they take track tables and genre maps
//! and never touch the network.
//!
//! - summary statistics and the top tracks of the user's playlist
//! - most frequent genres
//! - overlap with the curator's playlist and with global hits
//! - popularity delta against global hits
//! - Jaccard similarity of the artist sets
//! - popularity density curves ([`kde`])

pub mod kde;

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use crate::types::{GenreMap, Source, TrackRecord};

use self::kde::{DensityCurve, GRID_SIZE, gaussian_kde};

/// Length of every top-N list on the dashboard.
pub const TOP_N: usize = 5;

/// Fetched input of one analysis.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub user: Vec<TrackRecord>,
    pub global: Vec<TrackRecord>,
    pub curator: Vec<TrackRecord>,
    pub user_genres: GenreMap,
    pub curator_genres: GenreMap,
}

impl Datasets {
    pub fn tracks(&self, source: Source) -> &[TrackRecord] {
        match source {
            Source::User => &self.user,
            Source::Global => &self.global,
            Source::Curator => &self.curator,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSummary {
    pub count: usize,
    /// `NaN` for an empty playlist.
    pub mean_popularity: f64,
    pub max_popularity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedTrack {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    /// Popularity as reported in the compared playlist.
    pub popularity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub against: Source,
    pub shared_count: usize,
    pub top_shared: Vec<SharedTrack>,
}

impl Overlap {
    pub fn is_empty(&self) -> bool {
        self.shared_count == 0
    }
}

pub fn summarize(tracks: &[TrackRecord]) -> PlaylistSummary {
    PlaylistSummary {
        count: tracks.len(),
        mean_popularity: mean_popularity(tracks),
        max_popularity: tracks.iter().map(|t| t.popularity).max(),
    }
}

/// Mean popularity, `NaN` when there are no tracks.
pub fn mean_popularity(tracks: &[TrackRecord]) -> f64 {
    if tracks.is_empty() {
        return f64::NAN;
    }
    tracks.iter().map(|t| t.popularity as f64).sum::<f64>() / tracks.len() as f64
}

/// The `n` most popular tracks. Ties keep playlist order.
pub fn top_tracks(tracks: &[TrackRecord], n: usize) -> Vec<TrackRecord> {
    let mut sorted: Vec<&TrackRecord> = tracks.iter().collect();
    sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    sorted.into_iter().take(n).cloned().collect()
}

/// One genre entry per (track, genre of its artist). Tracks whose artist is
/// missing from the map contribute nothing.
pub fn flatten_genres(tracks: &[TrackRecord], genres: &GenreMap) -> Vec<String> {
    tracks
        .iter()
        .filter_map(|t| genres.get(&t.artist_id))
        .flat_map(|list| list.iter().cloned())
        .collect()
}

/// The `n` most frequent genres. Ties keep the order of first occurrence.
pub fn top_genres(genres: &[String], n: usize) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for genre in genres {
        match index.get(genre.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(genre.as_str(), counts.len());
                counts.push(GenreCount {
                    genre: genre.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Inner join of `user` and `other` on track id.
///
/// Every matching pair counts, in the user's playlist order. The listed
/// shared tracks are the `n` most popular by the compared playlist's
/// popularity.
pub fn overlap(user: &[TrackRecord], other: &[TrackRecord], against: Source, n: usize) -> Overlap {
    let mut by_id: HashMap<&str, Vec<&TrackRecord>> = HashMap::new();
    for track in other {
        by_id.entry(track.track_id.as_str()).or_default().push(track);
    }

    let joined: Vec<SharedTrack> = user
        .iter()
        .flat_map(|left| {
            by_id
                .get(left.track_id.as_str())
                .into_iter()
                .flatten()
                .map(move |right| SharedTrack {
                    track_id: left.track_id.clone(),
                    track_name: left.track_name.clone(),
                    artist_name: left.artist_name.clone(),
                    popularity: right.popularity,
                })
        })
        .collect();

    let shared_count = joined.len();
    let mut top_shared = joined;
    top_shared.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    top_shared.truncate(n);

    Overlap {
        against,
        shared_count,
        top_shared,
    }
}

/// Number of distinct genres present in both lists.
pub fn shared_genre_count(a: &[String], b: &[String]) -> usize {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.intersection(&b).count()
}

/// Signed difference of mean popularities, `user − global`.
pub fn popularity_delta(user: &[TrackRecord], global: &[TrackRecord]) -> f64 {
    mean_popularity(user) - mean_popularity(global)
}

/// |A ∩ B| / |A ∪ B|, 0 when both sets are empty.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

pub fn artist_set(tracks: &[TrackRecord]) -> HashSet<&str> {
    tracks.iter().map(|t| t.artist_name.as_str()).collect()
}

/// Pairwise Jaccard similarity of the artist sets, indexed in
/// [`Source::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    pub sources: [Source; 3],
    pub values: [[f64; 3]; 3],
}

impl SimilarityMatrix {
    pub fn build(datasets: &Datasets) -> Self {
        let sets: Vec<HashSet<&str>> = Source::ALL
            .iter()
            .map(|s| artist_set(datasets.tracks(*s)))
            .collect();

        let mut values = [[0.0; 3]; 3];
        for (i, a) in sets.iter().enumerate() {
            for (j, b) in sets.iter().enumerate() {
                values[i][j] = jaccard(a, b);
            }
        }

        Self {
            sources: Source::ALL,
            values,
        }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// The value as shown to the user: the diagonal is masked.
    pub fn display_value(&self, i: usize, j: usize) -> Option<f64> {
        (i != j).then(|| self.values[i][j])
    }

    /// Smallest and largest off-diagonal value.
    pub fn display_range(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for i in 0..3 {
            for j in 0..3 {
                if let Some(v) = self.display_value(i, j) {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
        }
        (lo, hi)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub source: Source,
    pub curve: Option<DensityCurve>,
}

/// Everything the dashboard renders for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub summary: PlaylistSummary,
    pub top_tracks: Vec<TrackRecord>,
    pub top_genres: Vec<GenreCount>,
    pub curator_overlap: Overlap,
    pub shared_genres_with_curator: usize,
    pub global_overlap: Overlap,
    pub popularity_delta: f64,
    pub similarity: SimilarityMatrix,
    pub distributions: Vec<Distribution>,
}

impl AnalysisReport {
    pub fn build(datasets: &Datasets) -> Self {
        let user_genres = flatten_genres(&datasets.user, &datasets.user_genres);
        let curator_genres = flatten_genres(&datasets.curator, &datasets.curator_genres);

        let distributions = Source::ALL
            .iter()
            .map(|source| {
                let samples: Vec<f64> = datasets
                    .tracks(*source)
                    .iter()
                    .map(|t| t.popularity as f64)
                    .collect();
                Distribution {
                    source: *source,
                    curve: gaussian_kde(&samples, GRID_SIZE),
                }
            })
            .collect();

        Self {
            summary: summarize(&datasets.user),
            top_tracks: top_tracks(&datasets.user, TOP_N),
            top_genres: top_genres(&user_genres, TOP_N),
            curator_overlap: overlap(&datasets.user, &datasets.curator, Source::Curator, TOP_N),
            shared_genres_with_curator: shared_genre_count(&user_genres, &curator_genres),
            global_overlap: overlap(&datasets.user, &datasets.global, Source::Global, TOP_N),
            popularity_delta: popularity_delta(&datasets.user, &datasets.global),
            similarity: SimilarityMatrix::build(datasets),
            distributions,
        }
    }
}
