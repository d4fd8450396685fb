use crate::{config::Settings, spotify};

pub async fn auth() {
    let settings = Settings::from_env();
    let credentials = super::require_credentials();
    let state = super::bootstrap(credentials, settings).await;
    spotify::auth::auth(state).await;
}
