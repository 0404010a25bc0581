use std::{sync::Arc, time::Duration};

use tokio::time::{MissedTickBehavior, interval};

use crate::{
    error::BridgeError,
    management::{TokenManager, store::TokenStore},
    spotify::OAuthClient,
    success,
    types::RefreshedToken,
    warning,
};

/// Keeps the stored access token valid by trading the refresh token on a timer.
///
/// The scheduler does not look at token expiry. It relies on being triggered
/// more often than the provider's access token lifetime (about an hour), either
/// by [`RefreshScheduler::run_every`] or by an external cron calling
/// `nowplay refresh`.
pub struct RefreshScheduler<S> {
    tokens: TokenManager<S>,
    oauth: OAuthClient,
}

impl<S: TokenStore> RefreshScheduler<S> {
    pub fn new(store: Arc<S>, oauth: OAuthClient) -> Self {
        Self {
            tokens: TokenManager::new(store),
            oauth,
        }
    }

    /// Performs a single refresh run.
    ///
    /// # Steps
    ///
    /// 1. Read `refresh-token`; if absent, fail without writing anything
    /// 2. Exchange it at the token endpoint
    /// 3. Write `access-token`, and `refresh-token` only if it was rotated
    ///
    /// # Errors
    ///
    /// - [`BridgeError::MissingCredential`] when setup was never completed
    /// - [`BridgeError::Upstream`] / [`BridgeError::Transport`] when the grant fails
    /// - [`BridgeError::Io`] when the write-back fails
    pub async fn run_once(&self) -> Result<RefreshedToken, BridgeError> {
        let refresh_token = self.tokens.refresh_token().await?;
        let refreshed = self.oauth.refresh_access_token(&refresh_token).await?;
        self.tokens.persist_refreshed(&refreshed).await?;
        Ok(refreshed)
    }

    /// Runs [`RefreshScheduler::run_once`] on every tick, forever.
    ///
    /// The first tick fires immediately. A failed run is logged and skipped;
    /// the next tick simply tries again.
    pub async fn run_every(&self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(token) if token.refresh_token.is_some() => {
                    success!("Access token refreshed (refresh token rotated)")
                }
                Ok(_) => success!("Access token refreshed"),
                Err(e) => warning!("Token refresh failed: {}", e),
            }
        }
    }
}
