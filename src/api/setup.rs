use std::collections::HashMap;

use axum::{
    Json,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{error::BridgeError, management::TokenStore, server::AppState, success};

/// One-time authorization flow.
///
/// Without a `code` parameter the caller is sent to the provider's consent
/// page with a `302 Found`. With one, the code is exchanged, both tokens are
/// stored, and the pair is echoed back as JSON.
pub async fn authorize<S: TokenStore>(
    state: &AppState<S>,
    redirect_url: &str,
    params: &HashMap<String, String>,
) -> Result<Response, BridgeError> {
    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        let url = state.oauth.authorize_url(redirect_url)?;
        return Ok((StatusCode::FOUND, [(LOCATION, url)]).into_response());
    };

    let pair = state
        .oauth
        .exchange_authorization_code(code, redirect_url)
        .await?;
    state.tokens.persist(&pair).await?;
    success!("Authorization completed, tokens stored");

    Ok(Json(pair).into_response())
}
