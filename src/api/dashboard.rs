use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    analysis::AnalysisReport,
    info,
    management::{AuthPhase, collect_datasets},
    render::pages,
    server::AppState,
    utils,
};

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub playlist: String,
}

pub async fn index(Extension(state): Extension<AppState>) -> Html<String> {
    if state.session.lock().await.phase() == AuthPhase::AwaitingAuthorization {
        return Html(pages::login_page());
    }
    Html(pages::form_page("", None))
}

/// Runs one analysis per form submission.
pub async fn analyze(
    Query(params): Query<AnalyzeParams>,
    Extension(state): Extension<AppState>,
) -> Response {
    let client = state.session.lock().await.client();
    let Some(client) = client else {
        return (StatusCode::UNAUTHORIZED, Html(pages::login_page())).into_response();
    };

    let Some(playlist_id) = utils::extract_playlist_id(&params.playlist) else {
        return Html(pages::form_page(
            &params.playlist,
            Some("Paste a playlist link or id to start."),
        ))
        .into_response();
    };

    info!("Analyzing playlist {}", playlist_id);
    let datasets =
        collect_datasets(client.as_ref(), &state.memo, &state.settings, &playlist_id).await;
    let report = AnalysisReport::build(&datasets);

    Html(pages::report_page(&params.playlist, &report)).into_response()
}

/// Served on every route when the credentials are incomplete.
pub async fn misconfigured(Extension(message): Extension<String>) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Html(pages::credentials_error_page(&message)),
    )
        .into_response()
}
