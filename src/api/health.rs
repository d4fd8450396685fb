use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{management::AuthPhase, server::AppState};

/// Liveness probe. Also reports whether a Spotify token is available.
pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    let phase = state.session.lock().await.phase();
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": phase != AuthPhase::AwaitingAuthorization
    }))
}
