#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use nowplay::config::Config;
use serde_json::Value;
use tempfile::TempDir;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub params: HashMap<String, String>,
}

impl RecordedRequest {
    /// Decodes a `Basic` authorization header into `id:secret`.
    pub fn basic_credentials(&self) -> Option<String> {
        let encoded = self.authorization.as_deref()?.strip_prefix("Basic ")?;
        let decoded = STANDARD.decode(encoded).ok()?;
        String::from_utf8(decoded).ok()
    }
}

pub struct MockState {
    pub token_status: u16,
    pub token_body: Value,
    pub playing_status: u16,
    pub playing_body: Value,
    pub token_requests: Vec<RecordedRequest>,
    pub playing_requests: Vec<RecordedRequest>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            token_status: 200,
            token_body: Value::Null,
            playing_status: 204,
            playing_body: Value::Null,
            token_requests: Vec::new(),
            playing_requests: Vec::new(),
        }
    }
}

type Shared = Arc<Mutex<MockState>>;

/// In-process stand-in for both the accounts service and the Web API.
pub struct MockProvider {
    pub base_url: String,
    pub state: Shared,
    // removed on drop
    scratch: TempDir,
}

impl MockProvider {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let router = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player/currently-playing", get(currently_playing))
            .with_state(Arc::clone(&state));

        Self {
            base_url: spawn(router).await,
            state,
            scratch: tempfile::tempdir().unwrap(),
        }
    }

    pub async fn respond_token(&self, status: u16, body: Value) {
        let mut s = self.state.lock().await;
        s.token_status = status;
        s.token_body = body;
    }

    pub async fn respond_playing(&self, status: u16, body: Value) {
        let mut s = self.state.lock().await;
        s.playing_status = status;
        s.playing_body = body;
    }

    pub async fn token_requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.token_requests.clone()
    }

    pub async fn playing_requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.playing_requests.clone()
    }

    pub fn config(&self, redirect_url: Option<&str>) -> Config {
        Config {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_url: redirect_url.map(str::to_string),
            server_addr: "127.0.0.1:0".parse().unwrap(),
            allowed_origin: HeaderValue::from_static("https://shadeofyou.github.io"),
            market: "JP".to_string(),
            refresh_interval: Duration::from_secs(1800),
            token_store_dir: self.scratch.path().join("tokens"),
            api_url: format!("{}/v1", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            auth_url: format!("{}/authorize", self.base_url),
        }
    }
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().await;
    s.token_requests.push(RecordedRequest {
        authorization: auth_header(&headers),
        params: form,
    });
    reply(s.token_status, &s.token_body)
}

async fn currently_playing(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().await;
    s.playing_requests.push(RecordedRequest {
        authorization: auth_header(&headers),
        params: query,
    });
    reply(s.playing_status, &s.playing_body)
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn reply(status: u16, body: &Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap();
    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }
    (status, Json(body.clone())).into_response()
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
