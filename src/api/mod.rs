//! # API Module
//!
//! HTTP handlers of the dashboard server, built on axum.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`, the analysis form, or a login link while no token
//!   is cached
//! - [`analyze`] - `GET /analyze?playlist=…`, runs one analysis and renders
//!   the report
//! - [`login`] - `GET /login`, redirects to Spotify's authorize page
//! - [`callback`] - `GET /callback`, completes the authorization-code flow
//! - [`health`] - `GET /health`, status and version
//! - [`misconfigured`] - fallback of the server started without credentials
//!
//! Handlers get the shared [`AppState`](crate::server::AppState) through an
//! `Extension` layer.

mod auth;
mod dashboard;
mod health;

pub use auth::callback;
pub use auth::login;
pub use dashboard::AnalyzeParams;
pub use dashboard::analyze;
pub use dashboard::index;
pub use dashboard::misconfigured;
pub use health::health;
