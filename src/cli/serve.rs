use crate::{
    config::{Credentials, SecretsStore, Settings},
    error, info,
    management::AuthPhase,
    server::{self, app, misconfigured_app},
    warning,
};

/// Runs the dashboard until the process is stopped.
///
/// Incomplete credentials don't stop the server from starting, but it then
/// only serves a static configuration error page.
pub async fn serve(open: bool) {
    let settings = Settings::from_env();
    let secrets = SecretsStore::load(&SecretsStore::default_path());

    let router = match Credentials::resolve(&secrets) {
        Ok(credentials) => {
            let state = super::bootstrap(credentials, settings.clone()).await;
            if state.session.lock().await.phase() != AuthPhase::AwaitingAuthorization {
                info!("Using cached Spotify token.");
            } else {
                info!("No cached token, the dashboard will ask for a login.");
            }
            app(state)
        }
        Err(e) => {
            warning!("{}. Serving the configuration error page only.", e);
            misconfigured_app(e.to_string())
        }
    };

    if open {
        let url = format!("http://{}", settings.server_addr);
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. The dashboard runs at {}", url);
        }
    }

    if let Err(e) = server::serve(router, &settings.server_addr).await {
        error!("Dashboard server failed: {}", e);
    }
}
