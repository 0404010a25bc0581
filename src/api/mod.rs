//! # API Module
//!
//! HTTP handlers for the bridge. Every request except `/health` goes through
//! [`dispatch`], which picks one of two behaviours based on configuration:
//!
//! - **Setup mode** (`REDIRECT_URL` set): [`setup::authorize`] runs the one-time
//!   authorization-code flow and stores the resulting token pair.
//! - **Serve mode**: [`now_playing::now_playing`] reads the stored access token
//!   and returns the flattened currently-playing track with the fixed
//!   `Access-Control-Allow-Origin` header.
//!
//! Handlers return `Result<Response, BridgeError>`; the error side renders as a
//! bare 5xx through `BridgeError`'s `IntoResponse` impl.

mod health;
mod now_playing;
mod setup;

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Response,
};

use crate::{error::BridgeError, management::TokenStore, server::AppState};

pub use health::health;
pub use now_playing::now_playing;
pub use setup::authorize;

/// Routes a request into the setup flow or the public read path.
pub async fn dispatch<S: TokenStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, BridgeError> {
    match state.config.redirect_url.as_deref() {
        Some(redirect_url) => authorize(&state, redirect_url, &params).await,
        None => now_playing(&state).await,
    }
}
