//! Spotify "now playing" bridge library
//!
//! This library keeps a single Spotify OAuth token pair alive and serves a
//! simplified view of the user's currently playing track. The token pair is
//! obtained once through the authorization-code flow, persisted in a small
//! key-value store, refreshed on a fixed cadence, and read back for every
//! "now playing" request.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the public endpoint and the one-time setup flow
//! - `cli` - Command-line entry points (serve, setup, refresh, now-playing)
//! - `config` - Immutable configuration built from environment variables
//! - `error` - The error union shared by every component
//! - `management` - Token persistence and the scheduled refresh
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Token endpoint client and the currently-playing adapter
//! - `types` - Provider and public data structures
//!
//! # Example
//!
//! ```
//! use nowplay::{config, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     let config = Config::from_env()?;
//!     println!("listening on {}", config.server_addr);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

pub use error::BridgeError;

/// Prints an informational line prefixed with a blue `o`.
///
/// Used for progress notes that need no action from the user, such as the
/// listening address or the setup URL.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Serving on {}", addr);
/// info!("Refreshing every {}s", interval.as_secs());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
///
/// Reports a completed step, for example a stored token pair or a finished
/// refresh.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Token pair stored");
/// success!("Access token refreshed");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line prefixed with a red `!` and exits with code 1.
///
/// Only meant for start-up failures in CLI commands. Request handlers and the
/// refresh loop report through [`warning!`] and keep running.
///
/// # Arguments
///
/// The macro accepts the same arguments as `eprintln!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration: {}", e);
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`.
///
/// Goes to stderr and does not stop the program. Failed refresh ticks and
/// failed requests are reported this way.
///
/// # Arguments
///
/// The macro accepts the same arguments as `eprintln!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Refresh failed, keeping the current token. Err: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
