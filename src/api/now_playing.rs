use axum::{
    Json,
    http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
    response::{IntoResponse, Response},
};

use crate::{error::BridgeError, management::TokenStore, server::AppState};

/// Public read path: stored access token in, flattened track out.
pub async fn now_playing<S: TokenStore>(state: &AppState<S>) -> Result<Response, BridgeError> {
    let access_token = state.tokens.access_token().await?;
    let body = state.player.fetch_now_playing(&access_token).await?;

    let mut res = Json(body).into_response();
    res.headers_mut().insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        state.config.allowed_origin.clone(),
    );
    Ok(res)
}
