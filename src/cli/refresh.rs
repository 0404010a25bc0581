use std::sync::Arc;

use crate::{
    config::Config,
    error,
    management::{FileTokenStore, RefreshScheduler},
    spotify::OAuthClient,
    success,
};

/// One scheduled refresh run, for hosts that drive the cadence with cron.
pub async fn refresh(config: Config) {
    let store = Arc::new(FileTokenStore::new(&config.token_store_dir));
    let scheduler = RefreshScheduler::new(store, OAuthClient::new(&config));

    match scheduler.run_once().await {
        Ok(token) if token.refresh_token.is_some() => {
            success!("Access token refreshed, refresh token rotated")
        }
        Ok(_) => success!("Access token refreshed"),
        Err(e) => error!("Token refresh failed. Err: {}", e),
    }
}
