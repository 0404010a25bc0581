use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every failure a component can report.
///
/// None of these are retried. The router turns them into a bare 5xx response
/// and the refresh loop logs them and waits for the next tick.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The provider answered with a status the operation does not accept.
    #[error("Spotify API Error ({status})")]
    Upstream { status: StatusCode },

    /// The provider could not be reached or its body could not be decoded.
    #[error("Spotify API Error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A token the operation depends on is not in the store.
    #[error("{0} is null")]
    MissingCredential(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the token store, or binding the listener, failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Status code the router answers with for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Upstream { .. } | Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::MissingCredential(_) | Self::Config(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        crate::warning!("Request failed: {}", self);
        (self.http_status(), self.to_string()).into_response()
    }
}
