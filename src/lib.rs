//! Spotify Top Tracks Sync Library
//!
//! This library provides a small web backend that authenticates a single Spotify
//! user through the OAuth 2.0 authorization-code flow and replaces the contents
//! of configured playlists with that user's current top tracks.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for authentication, playlist sync and health
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds and their JSON response mapping
//! - `management` - Session-bound authentication state
//! - `server` - Router construction and HTTP listener
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - The top tracks to playlist synchronization procedure
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use topsync::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> topsync::Res<()> {
//!     config::load_env().ok();
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config, false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation of the crate reports an [`error::AppError`], which
/// knows how to render itself as a JSON error response at the request boundary.
///
/// # Example
///
/// ```
/// use topsync::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::AppError>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Requesting top tracks, offset: {}", offset);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Inserted {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup errors such as missing configuration or a port
/// that cannot be bound. Request-time failures never reach this macro; they are
/// turned into JSON responses instead.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems, e.g. a failed playlist phase that is still
/// reported back to the caller.
///
/// # Example
///
/// ```
/// warning!("Failed to remove tracks: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
