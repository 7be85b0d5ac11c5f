//! # API Module
//!
//! HTTP handlers of the top tracks sync server.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /auth/login`, redirects to Spotify's authorization page
//! - [`callback`] - `GET /auth/callback?code&state`, completes the code exchange
//! - [`logout`] - `GET /auth/logout`, discards the session
//!
//! ### Playlist Sync
//!
//! - [`top_tracks`] - `POST /user/top-tracks`, windowless top tracks
//! - [`top_tracks_short`] - `POST /user/top-tracks-short`
//! - [`top_tracks_medium`] - `POST /user/top-tracks-medium`
//! - [`top_tracks_long`] - `POST /user/top-tracks-long`
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, status and version
//!
//! Every handler answers with a JSON body carrying either a `message` or an
//! `error` field. Failures are always `400`.

mod auth;
mod health;
mod user;

pub use auth::{CallbackParams, callback, login, logout};
pub use health::health;
pub use user::{top_tracks, top_tracks_long, top_tracks_medium, top_tracks_short};
