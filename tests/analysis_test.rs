mod common;

use std::collections::HashSet;

use common::track;
use sporlboard::{
    analysis::{
        AnalysisReport, Datasets, SimilarityMatrix, TOP_N, artist_set, flatten_genres, jaccard,
        kde::{GRID_SIZE, gaussian_kde},
        mean_popularity, overlap, popularity_delta, shared_genre_count, summarize, top_genres,
        top_tracks,
    },
    types::{GenreMap, Source},
};

fn genres(pairs: &[(&str, &[&str])]) -> GenreMap {
    pairs
        .iter()
        .map(|(id, list)| (id.to_string(), list.iter().map(|g| g.to_string()).collect()))
        .collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_summarize() {
    let tracks = vec![
        track("t1", 80, "A", Source::User),
        track("t2", 40, "B", Source::User),
        track("t3", 60, "C", Source::User),
    ];

    let summary = summarize(&tracks);

    assert_eq!(summary.count, 3);
    assert!((summary.mean_popularity - 60.0).abs() < 1e-9);
    assert_eq!(summary.max_popularity, Some(80));
}

#[test]
fn test_summarize_empty_playlist() {
    let summary = summarize(&[]);

    assert_eq!(summary.count, 0);
    assert!(summary.mean_popularity.is_nan());
    assert_eq!(summary.max_popularity, None);
}

#[test]
fn test_top_tracks_sorted_descending() {
    let tracks: Vec<_> = [10, 90, 30, 70, 50, 20, 80]
        .iter()
        .enumerate()
        .map(|(i, p)| track(&format!("t{}", i), *p, "A", Source::User))
        .collect();

    let top = top_tracks(&tracks, TOP_N);
    let pops: Vec<u8> = top.iter().map(|t| t.popularity).collect();

    assert_eq!(pops, vec![90, 80, 70, 50, 30]);
}

#[test]
fn test_top_tracks_ties_keep_playlist_order() {
    let tracks = vec![
        track("first", 50, "A", Source::User),
        track("second", 50, "B", Source::User),
        track("top", 60, "C", Source::User),
        track("third", 50, "D", Source::User),
    ];

    let ids: Vec<String> = top_tracks(&tracks, 3)
        .into_iter()
        .map(|t| t.track_id)
        .collect();

    assert_eq!(ids, vec!["top", "first", "second"]);
}

#[test]
fn test_top_tracks_fewer_than_n() {
    let tracks = vec![track("t1", 10, "A", Source::User)];
    assert_eq!(top_tracks(&tracks, TOP_N).len(), 1);
}

#[test]
fn test_flatten_genres() {
    let tracks = vec![
        track("t1", 50, "A", Source::User),
        track("t2", 50, "B", Source::User),
        track("t3", 50, "A", Source::User),
        track("t4", 50, "Missing", Source::User),
    ];
    let map = genres(&[("A_id", &["pop", "dance"]), ("B_id", &["rock"])]);

    assert_eq!(
        flatten_genres(&tracks, &map),
        strings(&["pop", "dance", "rock", "pop", "dance"])
    );
}

#[test]
fn test_top_genres_counts_and_ties() {
    let list = strings(&["indie", "pop", "rock", "pop", "jazz", "rock", "folk", "metal"]);

    let top = top_genres(&list, TOP_N);
    let names: Vec<&str> = top.iter().map(|g| g.genre.as_str()).collect();
    let counts: Vec<usize> = top.iter().map(|g| g.count).collect();

    assert_eq!(names, vec!["pop", "rock", "indie", "jazz", "folk"]);
    assert_eq!(counts, vec![2, 2, 1, 1, 1]);
}

#[test]
fn test_top_genres_empty() {
    assert!(top_genres(&[], TOP_N).is_empty());
}

#[test]
fn test_overlap_single_shared_track() {
    let user = vec![track("t1", 80, "A", Source::User)];
    let curator = vec![track("t1", 80, "A", Source::Curator)];

    let result = overlap(&user, &curator, Source::Curator, TOP_N);

    assert_eq!(result.against, Source::Curator);
    assert_eq!(result.shared_count, 1);
    assert_eq!(result.top_shared.len(), 1);
    assert_eq!(result.top_shared[0].track_id, "t1");

    let sim = jaccard(&artist_set(&user), &artist_set(&curator));
    assert_eq!(sim, 1.0);
}

#[test]
fn test_overlap_uses_compared_popularity() {
    let user = vec![
        track("a", 10, "A", Source::User),
        track("b", 20, "B", Source::User),
        track("c", 30, "C", Source::User),
    ];
    let global = vec![
        track("c", 55, "C", Source::Global),
        track("a", 95, "A", Source::Global),
        track("x", 99, "X", Source::Global),
    ];

    let result = overlap(&user, &global, Source::Global, TOP_N);
    let shared: Vec<(&str, u8)> = result
        .top_shared
        .iter()
        .map(|t| (t.track_id.as_str(), t.popularity))
        .collect();

    assert_eq!(result.shared_count, 2);
    assert_eq!(shared, vec![("a", 95), ("c", 55)]);
}

#[test]
fn test_overlap_counts_every_matching_pair() {
    let user = vec![
        track("dup", 50, "A", Source::User),
        track("dup", 50, "A", Source::User),
    ];
    let curator = vec![track("dup", 70, "A", Source::Curator)];

    assert_eq!(overlap(&user, &curator, Source::Curator, TOP_N).shared_count, 2);
}

#[test]
fn test_overlap_empty_is_not_an_error() {
    let user = vec![track("a", 10, "A", Source::User)];
    let curator = vec![track("b", 10, "B", Source::Curator)];

    let result = overlap(&user, &curator, Source::Curator, TOP_N);

    assert!(result.is_empty());
    assert!(result.top_shared.is_empty());
}

#[test]
fn test_overlap_truncates_to_top_n() {
    let user: Vec<_> = (0..8)
        .map(|i| track(&format!("t{}", i), 50, "A", Source::User))
        .collect();
    let global: Vec<_> = (0..8)
        .map(|i| track(&format!("t{}", i), 10 * i as u8, "A", Source::Global))
        .collect();

    let result = overlap(&user, &global, Source::Global, TOP_N);

    assert_eq!(result.shared_count, 8);
    assert_eq!(result.top_shared.len(), TOP_N);
    assert_eq!(result.top_shared[0].popularity, 70);
}

#[test]
fn test_shared_genre_count() {
    let user = strings(&["pop", "rock", "pop", "jazz"]);
    let curator = strings(&["rock", "jazz", "jazz", "metal"]);

    assert_eq!(shared_genre_count(&user, &curator), 2);
    assert_eq!(shared_genre_count(&user, &[]), 0);
}

#[test]
fn test_popularity_delta_is_signed() {
    let user = vec![
        track("a", 40, "A", Source::User),
        track("b", 60, "B", Source::User),
    ];
    let global = vec![
        track("c", 90, "C", Source::Global),
        track("d", 70, "D", Source::Global),
        track("e", 80, "E", Source::Global),
    ];

    let delta = popularity_delta(&user, &global);

    assert!((delta - (mean_popularity(&user) - mean_popularity(&global))).abs() < 1e-12);
    assert!((delta + 30.0).abs() < 1e-9);
}

#[test]
fn test_jaccard_self_and_empty() {
    let set: HashSet<&str> = ["A", "B", "C"].into_iter().collect();
    let empty: HashSet<&str> = HashSet::new();

    assert_eq!(jaccard(&set, &set), 1.0);
    assert_eq!(jaccard(&empty, &empty), 0.0);
    assert_eq!(jaccard(&set, &empty), 0.0);
}

#[test]
fn test_jaccard_is_symmetric() {
    let a: HashSet<&str> = ["A", "B", "C"].into_iter().collect();
    let b: HashSet<&str> = ["B", "C", "D", "E"].into_iter().collect();

    assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    assert!((jaccard(&a, &b) - 0.4).abs() < 1e-12);
}

#[test]
fn test_similarity_matrix() {
    let datasets = Datasets {
        user: vec![
            track("t1", 50, "A", Source::User),
            track("t2", 50, "B", Source::User),
        ],
        global: vec![track("g1", 50, "B", Source::Global)],
        curator: vec![],
        ..Default::default()
    };

    let matrix = SimilarityMatrix::build(&datasets);

    assert_eq!(matrix.sources, Source::ALL);
    assert_eq!(matrix.get(0, 1), 0.5);
    assert_eq!(matrix.get(1, 0), 0.5);
    assert_eq!(matrix.get(0, 2), 0.0);
    assert_eq!(matrix.get(0, 0), 1.0);
    assert_eq!(matrix.get(2, 2), 0.0);

    for i in 0..3 {
        assert_eq!(matrix.display_value(i, i), None);
    }
    assert_eq!(matrix.display_value(0, 1), Some(0.5));
    assert_eq!(matrix.display_range(), (0.0, 0.5));
}

#[test]
fn test_report_for_single_shared_track() {
    let datasets = Datasets {
        user: vec![track("t1", 80, "A", Source::User)],
        global: vec![],
        curator: vec![track("t1", 80, "A", Source::Curator)],
        user_genres: genres(&[("A_id", &["pop"])]),
        curator_genres: genres(&[("A_id", &["pop"])]),
    };

    let report = AnalysisReport::build(&datasets);

    assert_eq!(report.summary.count, 1);
    assert_eq!(report.curator_overlap.shared_count, 1);
    assert_eq!(report.shared_genres_with_curator, 1);
    assert!(report.global_overlap.is_empty());
    assert_eq!(report.similarity.get(0, 2), 1.0);
    assert!(report.popularity_delta.is_nan());
    assert_eq!(report.top_genres.len(), 1);
    assert_eq!(report.distributions.len(), 3);
    assert!(report.distributions.iter().all(|d| d.curve.is_none()));
}

#[test]
fn test_report_for_empty_user_playlist() {
    let datasets = Datasets {
        global: vec![
            track("g1", 70, "X", Source::Global),
            track("g2", 90, "Y", Source::Global),
        ],
        ..Default::default()
    };

    let report = AnalysisReport::build(&datasets);

    assert_eq!(report.summary.count, 0);
    assert!(report.summary.mean_popularity.is_nan());
    assert!(report.top_tracks.is_empty());
    assert!(report.top_genres.is_empty());
    assert!(report.curator_overlap.is_empty());
    assert!(report.distributions[0].curve.is_none());
    assert!(report.distributions[1].curve.is_some());
}

#[test]
fn test_gaussian_kde_needs_two_samples() {
    assert!(gaussian_kde(&[], GRID_SIZE).is_none());
    assert!(gaussian_kde(&[42.0], GRID_SIZE).is_none());
}

#[test]
fn test_gaussian_kde_zero_variance() {
    assert!(gaussian_kde(&[50.0, 50.0, 50.0], GRID_SIZE).is_none());
}

#[test]
fn test_gaussian_kde_curve_shape() {
    let samples = [20.0, 35.0, 50.0, 55.0, 60.0, 80.0];

    let curve = gaussian_kde(&samples, GRID_SIZE).expect("curve");

    assert_eq!(curve.points.len(), GRID_SIZE);
    assert!(curve.bandwidth > 0.0);

    let (lo, hi) = curve.x_range();
    assert!(lo < 20.0);
    assert!(hi > 80.0);
    assert!(curve.points.iter().all(|(_, y)| *y >= 0.0));

    // the curve spans three bandwidths past the samples, so nearly all mass
    // lies on the grid
    let step = (hi - lo) / (GRID_SIZE - 1) as f64;
    let area: f64 = curve.points.iter().map(|(_, y)| y * step).sum();
    assert!((area - 1.0).abs() < 0.02, "area = {}", area);
}

#[test]
fn test_gaussian_kde_scott_bandwidth() {
    let samples = [10.0, 20.0];

    let curve = gaussian_kde(&samples, GRID_SIZE).expect("curve");

    // sample std of [10, 20] is sqrt(50)
    let expected = 50f64.sqrt() * 2f64.powf(-0.2);
    assert!((curve.bandwidth - expected).abs() < 1e-9);
}
