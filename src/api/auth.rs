use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{render::pages, server::AppState, success, utils, warning};

/// Starts a login: remembers a fresh `state` and sends the browser to
/// Spotify's authorize page.
pub async fn login(Extension(state): Extension<AppState>) -> Redirect {
    let url = state
        .session
        .lock()
        .await
        .begin_authorization(utils::generate_state());
    Redirect::to(&url)
}

/// OAuth redirect target. Exchanges the code for a token and sends the user
/// back to the dashboard, which from now on renders the analysis form.
///
/// The session is only locked to check the state and to store the token, not
/// during the exchange. Memoized fetches are dropped, they may stem from a
/// token that stopped working.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Response {
    if let Some(reason) = params.get("error") {
        warning!("Spotify denied the authorization: {}", reason);
        return Html(pages::message_page(
            "Login failed",
            &format!("Spotify reported: {}", reason),
        ))
        .into_response();
    }

    let (Some(code), Some(oauth_state)) = (params.get("code"), params.get("state")) else {
        return Html(pages::message_page(
            "Login failed",
            "The callback is missing the authorization code.",
        ))
        .into_response();
    };

    let accepted = state.session.lock().await.accept_callback(oauth_state);
    let result = match accepted {
        Ok(exchange) => exchange.run(code).await,
        Err(e) => Err(e),
    };

    match result {
        Ok((tokens, cache_warning)) => {
            if let Some(e) = cache_warning {
                warning!("Failed to save token to cache: {}", e);
            }
            state.session.lock().await.install_tokens(tokens);
            state.memo.clear().await;
            success!("Authorized with Spotify.");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            warning!("Login failed: {}", e);
            Html(pages::message_page("Login failed", &e.to_string())).into_response()
        }
    }
}
