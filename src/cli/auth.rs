use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;

use crate::{
    config::Config,
    error, info,
    management::{FileTokenStore, TokenManager},
    server::{AppState, serve_until},
    success, warning,
};

/// How long `setup` waits for the provider to redirect back.
const SETUP_TIMEOUT: Duration = Duration::from_secs(300);
const SETUP_POLL: Duration = Duration::from_secs(1);

/// Runs the one-time authorization flow from the terminal.
///
/// Starts the server in setup mode, opens the provider's consent page in the
/// default browser and waits until the callback has stored a new token pair.
/// `REDIRECT_URL` must point at this server's address and be registered with
/// the Spotify application.
pub async fn setup(config: Config) {
    let Some(redirect_url) = config.redirect_url.clone() else {
        error!("REDIRECT_URL must be set to run the authorization flow");
    };

    let store = Arc::new(FileTokenStore::new(&config.token_store_dir));
    let state = AppState::new(Arc::new(config), Arc::clone(&store));

    let auth_url = match state.oauth.authorize_url(&redirect_url) {
        Ok(url) => url,
        Err(e) => error!("Cannot build the authorize URL. Err: {}", e),
    };

    let listener = match TcpListener::bind(state.config.server_addr).await {
        Ok(l) => l,
        Err(e) => error!(
            "Cannot bind {}. Err: {}",
            state.config.server_addr, e
        ),
    };

    let tokens = TokenManager::new(store);
    let previous = tokens.current_pair().await;

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }
    info!("Waiting for the authorization callback on {}", redirect_url);

    let stored = async move {
        tokens
            .wait_for_new_pair(previous, SETUP_TIMEOUT, SETUP_POLL)
            .await
    };
    match serve_until(listener, state, stored).await {
        Ok(true) => success!("Authentication successful!"),
        Ok(false) => error!("Authentication failed or timed out."),
        Err(e) => error!("Server stopped. Err: {}", e),
    }
}
