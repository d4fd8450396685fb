mod common;

use common::track;
use sporlboard::{
    analysis::{AnalysisReport, Datasets, Distribution, SimilarityMatrix, kde::gaussian_kde},
    render::{
        charts::{greens, kde_chart, similarity_heatmap},
        format_delta, format_max, format_mean, format_similarity,
        pages::{credentials_error_page, form_page, report_page},
    },
    types::Source,
};

#[test]
fn test_number_formatting() {
    assert_eq!(format_mean(61.24), "61.2");
    assert_eq!(format_mean(f64::NAN), "NaN");
    assert_eq!(format_delta(4.24), "+4.2 points");
    assert_eq!(format_delta(-12.0), "-12.0 points");
    assert_eq!(format_max(Some(97)), "97");
    assert_eq!(format_max(None), "–");
    assert_eq!(format_similarity(Some(0.3333)), "0.33");
    assert_eq!(format_similarity(None), "");
}

#[test]
fn test_greens_ramp_endpoints() {
    assert_eq!(greens(0.0), "#f7fcf5");
    assert_eq!(greens(1.0), "#00441b");
    assert_eq!(greens(-3.0), "#f7fcf5");
    assert_eq!(greens(f64::NAN), "#f7fcf5");
    assert_eq!(greens(0.5), "#74c476");
}

#[test]
fn test_kde_chart_without_curves() {
    let distributions: Vec<Distribution> = Source::ALL
        .iter()
        .map(|s| Distribution {
            source: *s,
            curve: None,
        })
        .collect();

    let svg = kde_chart(&distributions);

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("Not enough tracks for a density estimate."));
    assert!(!svg.contains("<path"));
}

#[test]
fn test_kde_chart_with_curves() {
    let distributions = vec![
        Distribution {
            source: Source::User,
            curve: gaussian_kde(&[30.0, 50.0, 70.0], 200),
        },
        Distribution {
            source: Source::Global,
            curve: None,
        },
        Distribution {
            source: Source::Curator,
            curve: gaussian_kde(&[10.0, 20.0, 25.0], 200),
        },
    ];

    let svg = kde_chart(&distributions);

    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains("Popularity Score"));
    assert!(svg.contains("Density"));
    // every playlist is listed in the legend
    assert!(svg.contains("Your Playlist"));
    assert!(svg.contains("Global Hits"));
    assert!(svg.contains("Curator&#39;s Playlist"));
}

#[test]
fn test_similarity_heatmap_masks_diagonal() {
    let datasets = Datasets {
        user: vec![
            track("t1", 50, "A", Source::User),
            track("t2", 50, "B", Source::User),
        ],
        global: vec![track("g1", 50, "B", Source::Global)],
        curator: vec![track("c1", 50, "A", Source::Curator)],
        ..Default::default()
    };

    let svg = similarity_heatmap(&SimilarityMatrix::build(&datasets));

    // six off-diagonal cells, no diagonal
    assert_eq!(svg.matches("<rect").count(), 6);
    assert!(svg.contains("Similarity (artists)"));
    assert!(svg.contains(">0.50<"));
    assert!(!svg.contains(">1.00<"));
}

#[test]
fn test_form_page_escapes_input() {
    let html = form_page(r#""><script>"#, Some("Paste a playlist link or id to start."));

    assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("Paste a playlist link or id to start."));
}

#[test]
fn test_credentials_error_page() {
    let html = credentials_error_page("missing Spotify credentials: SPOTIFY_API_REDIRECT_URI");

    assert!(html.contains("Configuration error."));
    assert!(html.contains("SPOTIFY_API_REDIRECT_URI"));
}

#[test]
fn test_report_page_empty_playlist() {
    let report = AnalysisReport::build(&Datasets::default());

    let html = report_page("", &report);

    assert!(html.contains("Total tracks"));
    assert!(html.contains("NaN"));
    assert!(html.contains("No overlap with the curator&#39;s playlist – you&#39;re unique!"));
    assert!(html.contains("You&#39;re discovering outside the mainstream – nice!"));
}
