//! # CLI Module
//!
//! User-facing commands of sporlboard.
//!
//! - [`serve`] - runs the web dashboard
//! - [`auth`] - logs in from the terminal and caches the token
//! - [`analyze`] - prints the analysis of one playlist as tables
//!
//! All commands share the same bootstrap: settings from the environment,
//! credentials from the environment or the secrets store, and a
//! [`Session`] that picks up a token cached by an earlier login.
//!
//! ## Usage
//!
//! ```bash
//! sporlboard auth                                   # log in once
//! sporlboard serve --open                           # dashboard in the browser
//! sporlboard analyze https://open.spotify.com/playlist/<id>
//! ```

mod analyze;
mod auth;
mod serve;

pub use analyze::analyze;
pub use auth::auth;
pub use serve::serve;

use crate::{
    config::{Credentials, SecretsStore, Settings},
    error,
    management::{Session, TokenManager},
    server::AppState,
    spotify::auth::OAuthClient,
};

/// Resolves the credentials or terminates the program.
fn require_credentials() -> Credentials {
    let secrets = SecretsStore::load(&SecretsStore::default_path());
    match Credentials::resolve(&secrets) {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    }
}

/// Builds the shared state and restores a cached token if there is one.
async fn bootstrap(credentials: Credentials, settings: Settings) -> AppState {
    let oauth = OAuthClient::new(credentials, &settings);
    let mut session = Session::new(oauth, settings.api_url.clone(), TokenManager::token_path());
    session.restore().await;
    AppState::new(settings, session)
}
