use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    analysis::{AnalysisReport, Overlap},
    config::Settings,
    error, info,
    management::collect_datasets,
    render::{format_delta, format_max, format_mean, format_similarity},
    success,
    types::{GenreTableRow, SimilarityTableRow, Source, TrackTableRow},
    utils,
};

/// Analyzes one playlist and prints the report to the terminal.
pub async fn analyze(input: String) {
    let settings = Settings::from_env();
    let credentials = super::require_credentials();
    let state = super::bootstrap(credentials, settings).await;

    let client = state.session.lock().await.client();
    let Some(client) = client else {
        error!("No cached token. Please run sporlboard auth");
    };

    let Some(playlist_id) = utils::extract_playlist_id(&input) else {
        error!("Please pass a playlist link or id.");
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching data from Spotify...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let datasets =
        collect_datasets(client.as_ref(), &state.memo, &state.settings, &playlist_id).await;
    pb.finish_and_clear();

    let report = AnalysisReport::build(&datasets);
    print_report(&report);
}

fn print_report(report: &AnalysisReport) {
    println!();
    success!("Your Playlist Snapshot");
    info!("Total tracks: {}", report.summary.count);
    info!(
        "Average popularity: {}",
        format_mean(report.summary.mean_popularity)
    );
    info!(
        "Top popularity: {}",
        format_max(report.summary.max_popularity)
    );

    if !report.top_tracks.is_empty() {
        let rows: Vec<TrackTableRow> = report
            .top_tracks
            .iter()
            .enumerate()
            .map(|(i, t)| TrackTableRow {
                rank: i + 1,
                track: t.track_name.clone(),
                artist: t.artist_name.clone(),
                popularity: t.popularity,
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if !report.top_genres.is_empty() {
        let rows: Vec<GenreTableRow> = report
            .top_genres
            .iter()
            .map(|g| GenreTableRow {
                genre: g.genre.clone(),
                tracks: g.count,
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    println!();
    success!("You vs. the Curator");
    info!("Shared songs: {}", report.curator_overlap.shared_count);
    info!("Shared genres: {}", report.shared_genres_with_curator);
    print_overlap(
        &report.curator_overlap,
        "No overlap with the curator's playlist – you're unique!",
    );

    println!();
    success!("You vs. Global Hits");
    info!("Shared with Global: {}", report.global_overlap.shared_count);
    info!(
        "Average popularity vs. Global: {}",
        format_delta(report.popularity_delta)
    );
    print_overlap(
        &report.global_overlap,
        "You're discovering outside the mainstream – nice!",
    );

    println!();
    success!("Artist similarity (Jaccard)");
    let rows: Vec<SimilarityTableRow> = Source::ALL
        .iter()
        .enumerate()
        .map(|(i, source)| SimilarityTableRow {
            playlist: source.display_name().to_string(),
            user: format_similarity(report.similarity.display_value(i, 0)),
            global: format_similarity(report.similarity.display_value(i, 1)),
            curator: format_similarity(report.similarity.display_value(i, 2)),
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn print_overlap(overlap: &Overlap, empty_note: &str) {
    if overlap.is_empty() {
        info!("{}", empty_note);
        return;
    }

    let rows: Vec<TrackTableRow> = overlap
        .top_shared
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            track: t.track_name.clone(),
            artist: t.artist_name.clone(),
            popularity: t.popularity,
        })
        .collect();
    println!("{}", Table::new(rows));
}
