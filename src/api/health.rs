use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::{management::TokenStore, server::AppState};

pub async fn health<S: TokenStore>(State(state): State<AppState<S>>) -> Json<Value> {
    let mode = if state.config.is_setup_mode() {
        "setup"
    } else {
        "serve"
    };

    Json(json!({
        "status": "ok",
        "mode": mode,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
