//! Configuration management for the top tracks sync server.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. All values are read once at startup into a
//! [`Config`] which is then shared read-only by every request.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf};

use crate::{Res, error::AppError, sync::SyncWindow, utils};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the current working directory first and then in
/// the platform-specific local data directory under `topsync/.env`. Variables
/// that are already set are never overwritten, so the process environment
/// always wins.
///
/// # Directory Structure
///
/// The data directory file is looked up in:
/// - Linux: `~/.local/share/topsync/.env`
/// - macOS: `~/Library/Application Support/topsync/.env`
/// - Windows: `%LOCALAPPDATA%/topsync/.env`
///
/// # Errors
///
/// A missing file is skipped silently. An existing file that cannot be read or
/// parsed is reported as an error string.
pub fn load_env() -> Result<(), String> {
    for path in env_paths() {
        if path.is_file() {
            dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        }
    }

    Ok(())
}

fn env_paths() -> Vec<PathBuf> {
    let mut data_path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_path.push("topsync/.env");

    vec![PathBuf::from(".env"), data_path]
}

/// Playlist identifiers the sync routes write into.
///
/// `shared` is used by the windowless route and as the fallback for every
/// window that has no playlist of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistTargets {
    pub shared: Option<String>,
    pub short: Option<String>,
    pub medium: Option<String>,
    pub long: Option<String>,
}

impl PlaylistTargets {
    pub fn for_window(&self, window: SyncWindow) -> Option<&str> {
        let own = match window {
            SyncWindow::Default => None,
            SyncWindow::Short => self.short.as_deref(),
            SyncWindow::Medium => self.medium.as_deref(),
            SyncWindow::Long => self.long.as_deref(),
        };

        own.or(self.shared.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_none() && self.short.is_none() && self.medium.is_none() && self.long.is_none()
    }
}

#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub playlists: PlaylistTargets,
    pub port: u16,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("playlists", &self.playlists)
            .field("port", &self.port)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `CLIENT_ID`, `CLIENT_SECRET`, `REDIRECT_URI` - Spotify application credentials
    /// - `SCOPES` - comma-separated list of permission scopes
    /// - `PLAYLIST_TRACKS_TOP_50` (or `ID_PLAYLIST_TRACKS_TOP_50`) - shared playlist
    /// - `ID_PLAYLIST_TRACKS_TOP_50_SHORT` / `_MEDIUM` / `_LONG` - per window playlists
    /// - `PORT` - listening port, defaults to 3000
    /// - `SPOTIFY_API_AUTH_URL`, `SPOTIFY_API_TOKEN_URL`, `SPOTIFY_API_URL` - endpoint overrides
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] naming every missing required variable,
    /// or when `PORT` is not a valid port number.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // blank values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let client_id = required("CLIENT_ID");
        let client_secret = required("CLIENT_SECRET");
        let redirect_uri = required("REDIRECT_URI");
        let scopes = utils::split_scopes(&required("SCOPES"));
        if scopes.is_empty() && !missing.contains(&"SCOPES") {
            missing.push("SCOPES");
        }

        let playlists = PlaylistTargets {
            shared: get("PLAYLIST_TRACKS_TOP_50").or_else(|| get("ID_PLAYLIST_TRACKS_TOP_50")),
            short: get("ID_PLAYLIST_TRACKS_TOP_50_SHORT"),
            medium: get("ID_PLAYLIST_TRACKS_TOP_50_MEDIUM"),
            long: get("ID_PLAYLIST_TRACKS_TOP_50_LONG"),
        };
        if playlists.is_empty() {
            missing.push("PLAYLIST_TRACKS_TOP_50");
        }

        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "Missing environment variables: {}",
                missing.join(", ")
            )));
        }

        let port = match get("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| {
                AppError::Configuration(format!("Invalid PORT '{}': {}", port, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            scopes,
            playlists,
            port,
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}
