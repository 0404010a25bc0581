use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{
    api,
    config::Config,
    error::BridgeError,
    management::{TokenManager, TokenStore},
    spotify::{NowPlayingClient, OAuthClient},
};

/// Everything a request handler needs, built once at start-up.
pub struct AppState<S> {
    pub config: Arc<Config>,
    pub tokens: TokenManager<S>,
    pub oauth: OAuthClient,
    pub player: NowPlayingClient,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            tokens: self.tokens.clone(),
            oauth: self.oauth.clone(),
            player: self.player.clone(),
        }
    }
}

impl<S: TokenStore> AppState<S> {
    pub fn new(config: Arc<Config>, store: Arc<S>) -> Self {
        Self {
            oauth: OAuthClient::new(&config),
            player: NowPlayingClient::new(&config),
            tokens: TokenManager::new(store),
            config,
        }
    }
}

pub fn build_router<S: TokenStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(api::health::<S>))
        .fallback(api::dispatch::<S>)
        .with_state(state)
}

/// Binds `config.server_addr` and serves until the process exits.
pub async fn start_api_server<S: TokenStore>(state: AppState<S>) -> Result<(), BridgeError> {
    let listener = TcpListener::bind(state.config.server_addr).await?;
    serve(listener, state).await
}

/// Serves on an already bound listener.
pub async fn serve<S: TokenStore>(
    listener: TcpListener,
    state: AppState<S>,
) -> Result<(), BridgeError> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Serves until `done` resolves, then shuts down gracefully.
///
/// In-flight requests are allowed to finish, so the response that triggered
/// `done` still reaches the client. Returns what `done` resolved to.
pub async fn serve_until<S, F>(
    listener: TcpListener,
    state: AppState<S>,
    done: F,
) -> Result<bool, BridgeError>
where
    S: TokenStore,
    F: Future<Output = bool> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let signal = async move {
        let _ = tx.send(done.await);
    };

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(signal)
        .await?;
    Ok(rx.await.unwrap_or(false))
}
