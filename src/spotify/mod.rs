//! # Spotify Integration Module
//!
//! The two places this crate talks to Spotify:
//!
//! - [`auth`] - the accounts service token endpoint. Exchanges the one-time
//!   authorization code for a token pair and trades the refresh token for new
//!   access tokens. Both grants use HTTP Basic with the client id and secret.
//! - [`player`] - `GET /me/player/currently-playing` with a bearer token and a
//!   fixed market, plus the pure mapping into the public [`NowPlaying`] shape.
//!
//! ```text
//! api / cli / management
//!          ↓
//!   OAuthClient   NowPlayingClient
//!          ↓             ↓
//!  accounts.spotify.com  api.spotify.com
//! ```
//!
//! ## Status handling
//!
//! Token grants accept `200` only. The player endpoint accepts `200` and `204`
//! (nothing playing). Every other status becomes [`BridgeError::Upstream`]
//! with no retry.
//!
//! [`NowPlaying`]: crate::types::NowPlaying
//! [`BridgeError::Upstream`]: crate::error::BridgeError::Upstream

pub mod auth;
pub mod player;

pub use auth::OAuthClient;
pub use player::{NowPlayingClient, to_now_playing};
