//! Configuration for the now-playing bridge.
//!
//! Values come from environment variables, optionally seeded from a `.env` file
//! in the local data directory. They are read exactly once into an immutable
//! [`Config`] which is then handed by reference to every component constructor.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults for everything except the client credentials

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use axum::http::HeaderValue;

use crate::error::BridgeError;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8787";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://shadeofyou.github.io";
pub const DEFAULT_MARKET: &str = "JP";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30 * 60;
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Loads environment variables from `<data_local_dir>/nowplay/.env`.
///
/// Creates the directory if needed. A missing `.env` file is fine, since every
/// value can also be supplied by the real environment, which always wins.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/nowplay/.env`
/// - macOS: `~/Library/Application Support/nowplay/.env`
/// - Windows: `%LOCALAPPDATA%/nowplay/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Root directory for files owned by this application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("nowplay");
    path
}

/// Immutable runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// Presence switches the router into the one-time setup flow.
    pub redirect_url: Option<String>,
    pub server_addr: SocketAddr,
    /// Value of `Access-Control-Allow-Origin` on the public endpoint.
    pub allowed_origin: HeaderValue,
    pub market: String,
    pub refresh_interval: Duration,
    pub token_store_dir: PathBuf,
    pub api_url: String,
    pub token_url: String,
    pub auth_url: String,
}

impl Config {
    /// Builds the configuration from the current process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] when `CLIENT_ID` or `CLIENT_SECRET` is
    /// missing, or when `SERVER_ADDRESS`, `ALLOWED_ORIGIN` or
    /// `REFRESH_INTERVAL_SECS` cannot be parsed.
    pub fn from_env() -> Result<Self, BridgeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| BridgeError::Config(format!("{key} must be set")))
        };

        let server_addr = match get("SERVER_ADDRESS") {
            Some(addr) => SocketAddr::from_str(&addr).map_err(|e| {
                BridgeError::Config(format!("SERVER_ADDRESS `{addr}` is invalid: {e}"))
            })?,
            None => SocketAddr::from_str(DEFAULT_SERVER_ADDRESS)
                .map_err(|e| BridgeError::Config(e.to_string()))?,
        };

        let origin = get("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin = HeaderValue::from_str(&origin).map_err(|e| {
            BridgeError::Config(format!("ALLOWED_ORIGIN `{origin}` is invalid: {e}"))
        })?;

        let refresh_secs = match get("REFRESH_INTERVAL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(BridgeError::Config(format!(
                        "REFRESH_INTERVAL_SECS `{raw}` must be a positive integer"
                    )));
                }
            },
            None => DEFAULT_REFRESH_INTERVAL_SECS,
        };

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            redirect_url: get("REDIRECT_URL"),
            server_addr,
            allowed_origin,
            market: get("MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            refresh_interval: Duration::from_secs(refresh_secs),
            token_store_dir: get("TOKEN_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir().join("tokens")),
            api_url: trim_url(get("SPOTIFY_API_URL"), DEFAULT_SPOTIFY_API_URL),
            token_url: trim_url(get("SPOTIFY_API_TOKEN_URL"), DEFAULT_SPOTIFY_API_TOKEN_URL),
            auth_url: trim_url(get("SPOTIFY_API_AUTH_URL"), DEFAULT_SPOTIFY_API_AUTH_URL),
        })
    }

    /// True when the router should run the authorization flow instead of reads.
    pub fn is_setup_mode(&self) -> bool {
        self.redirect_url.is_some()
    }
}

fn trim_url(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
