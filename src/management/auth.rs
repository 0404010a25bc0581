use std::{sync::Arc, time::Duration};

use tokio::time::{Instant, sleep};

use crate::{
    error::BridgeError,
    management::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore},
    types::{RefreshedToken, TokenPair},
};

/// Typed access to the two token keys of a [`TokenStore`].
pub struct TokenManager<S> {
    store: Arc<S>,
}

impl<S> Clone for TokenManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TokenStore> TokenManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        TokenManager { store }
    }

    /// Current access token, or [`BridgeError::MissingCredential`] when the
    /// authorization flow never ran.
    pub async fn access_token(&self) -> Result<String, BridgeError> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty())
            .ok_or(BridgeError::MissingCredential(ACCESS_TOKEN_KEY))
    }

    pub async fn refresh_token(&self) -> Result<String, BridgeError> {
        self.store
            .get(REFRESH_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty())
            .ok_or(BridgeError::MissingCredential(REFRESH_TOKEN_KEY))
    }

    /// Stores a freshly authorized pair, access token first.
    pub async fn persist(&self, pair: &TokenPair) -> Result<(), BridgeError> {
        self.store.put(ACCESS_TOKEN_KEY, &pair.access_token).await?;
        self.store.put(REFRESH_TOKEN_KEY, &pair.refresh_token).await
    }

    /// Stores the outcome of a refresh grant.
    ///
    /// The access token is always overwritten. The refresh token is only
    /// replaced when the provider sent a new, non-empty one.
    pub async fn persist_refreshed(&self, token: &RefreshedToken) -> Result<(), BridgeError> {
        self.store.put(ACCESS_TOKEN_KEY, &token.access_token).await?;
        if let Some(rotated) = token.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.store.put(REFRESH_TOKEN_KEY, rotated).await?;
        }
        Ok(())
    }

    /// The stored pair, if both tokens are present.
    pub async fn current_pair(&self) -> Option<TokenPair> {
        Some(TokenPair {
            access_token: self.access_token().await.ok()?,
            refresh_token: self.refresh_token().await.ok()?,
        })
    }

    /// Polls every `poll` until the stored pair differs from `previous`.
    ///
    /// Either token changing counts, since the provider may hand out the same
    /// refresh token again. Resolves to `false` once `timeout` has passed.
    pub async fn wait_for_new_pair(
        &self,
        previous: Option<TokenPair>,
        timeout: Duration,
        poll: Duration,
    ) -> bool {
        let start = Instant::now();

        loop {
            if let Some(current) = self.current_pair().await {
                if previous.as_ref() != Some(&current) {
                    return true;
                }
            }
            if start.elapsed() >= timeout {
                return false;
            }
            sleep(poll).await;
        }
    }
}
