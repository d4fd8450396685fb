//! Presentation of an [`AnalysisReport`](crate::analysis::AnalysisReport).
//!
//! - [`pages`] - HTML pages of the dashboard
//! - [`charts`] - inline SVG charts (density curves, similarity heat-map)
//!
//! The number formatting below is shared with the terminal report.

pub mod charts;
pub mod pages;

/// Mean popularity with one decimal, `NaN` for an empty playlist.
pub fn format_mean(value: f64) -> String {
    format!("{:.1}", value)
}

/// Signed popularity delta, e.g. `+4.2 points`.
pub fn format_delta(value: f64) -> String {
    format!("{:+.1} points", value)
}

pub fn format_max(value: Option<u8>) -> String {
    value.map_or_else(|| "–".to_string(), |v| v.to_string())
}

pub fn format_similarity(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{:.2}", v))
}
