//! # CLI Module
//!
//! Command implementations behind the `nowplay` binary. Each command receives
//! the already validated [`Config`](crate::config::Config), builds the
//! components it needs, and reports through the console macros.
//!
//! ## Commands
//!
//! - [`serve`] - HTTP server; in serve mode also the periodic token refresh
//! - [`setup`] - One-time authorization: opens the consent page and waits for
//!   the callback to store a token pair
//! - [`refresh`] - A single refresh run, meant for an external cron
//! - [`now_playing`] - One read of the current track, as a table or JSON
//!
//! ## Usage Patterns
//!
//! ### Initial Setup
//! ```bash
//! REDIRECT_URL=http://127.0.0.1:8787/callback nowplay setup
//! ```
//!
//! ### Regular Usage
//! ```bash
//! nowplay serve                    # public endpoint + refresh every 30 minutes
//! nowplay now-playing --json       # what the endpoint would return
//! ```
//!
//! ### Cron-driven Refresh
//! ```bash
//! */30 * * * * nowplay refresh
//! ```
//!
//! Fatal start-up problems (missing credentials, unbindable address) end the
//! process through `error!`; failures while serving are logged and answered
//! with a 5xx instead.

mod auth;
mod now_playing;
mod refresh;
mod serve;

pub use auth::setup;
pub use now_playing::now_playing;
pub use refresh::refresh;
pub use serve::serve;
