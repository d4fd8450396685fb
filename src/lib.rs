//! sporlboard library
//!
//! Compares a user-supplied Spotify playlist against two reference playlists
//! ("global hits" and a curator's playlist). It pulls track and artist
//! metadata from the Spotify Web API, aggregates popularity and genre
//! statistics and renders them as a small web dashboard or a terminal report.
//!
//! # Modules
//!
//! - `analysis` - Aggregation and comparison of the fetched playlists
//! - `api` - HTTP handlers of the dashboard server
//! - `cli` - Command-line interface implementations
//! - `config` - Settings, `.env` loading and credential resolution
//! - `management` - Token cache, auth session and memoization
//! - `render` - HTML pages and SVG charts
//! - `server` - axum router and server startup
//! - `spotify` - Spotify Web API client, OAuth flow and fetchers
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Boxed dynamic error with Send + Sync bounds so it can cross await points
/// and task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Retrieved {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal conditions of the command-line entry points, such as
/// missing credentials. Code after this macro does not run.
///
/// # Example
///
/// ```
/// error!("Missing required credential: {}", name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: a skipped playlist page, a failed genre
/// batch, an odd looking playlist id.
///
/// # Example
///
/// ```
/// warning!("Skipping artist batch {}: {}", index, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
