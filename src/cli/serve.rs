use std::sync::Arc;

use crate::{
    config::Config,
    error, info,
    management::{FileTokenStore, RefreshScheduler},
    server::{AppState, start_api_server},
};

/// Runs the HTTP server.
///
/// In serve mode a background task refreshes the access token every
/// `REFRESH_INTERVAL_SECS`. In setup mode no refresh runs, since there may be
/// no refresh token yet.
pub async fn serve(config: Config) {
    let config = Arc::new(config);
    let store = Arc::new(FileTokenStore::new(&config.token_store_dir));
    let state = AppState::new(Arc::clone(&config), Arc::clone(&store));

    if config.is_setup_mode() {
        info!("REDIRECT_URL is set, serving the authorization flow only");
    } else {
        let scheduler = RefreshScheduler::new(Arc::clone(&store), state.oauth.clone());
        let period = config.refresh_interval;
        info!("Refreshing the access token every {}s", period.as_secs());
        tokio::spawn(async move { scheduler.run_every(period).await });
    }

    info!(
        "Listening on {} (tokens in {})",
        config.server_addr,
        store.dir().display()
    );
    if let Err(e) = start_api_server(state).await {
        error!("Server stopped. Err: {}", e);
    }
}
