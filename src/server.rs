use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{
    Res, api,
    config::Settings,
    info,
    management::{Memo, Session},
    warning,
};

/// Shared context handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub session: Arc<Mutex<Session>>,
    pub memo: Arc<Memo>,
}

impl AppState {
    pub fn new(settings: Settings, session: Session) -> Self {
        Self {
            settings: Arc::new(settings),
            session: Arc::new(Mutex::new(session)),
            memo: Arc::new(Memo::new()),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/analyze", get(api::analyze))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Router used when the credentials are incomplete: every route renders the
/// same static error page.
pub fn misconfigured_app(message: String) -> Router {
    Router::new()
        .fallback(api::misconfigured)
        .layer(Extension(message))
}

pub async fn serve(router: Router, server_addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(server_addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

pub async fn start_api_server(state: AppState) {
    let server_addr = state.settings.server_addr.clone();
    if let Err(e) = serve(app(state), &server_addr).await {
        warning!("Server on {} stopped: {}", server_addr, e);
    }
}
