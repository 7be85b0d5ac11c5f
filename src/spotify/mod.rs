//! # Spotify Integration Module
//!
//! This module is the boundary to the Spotify Web API. Everything the server
//! needs from Spotify goes through the [`MusicApi`] trait, which
//! [`SpotifyClient`] implements on top of `reqwest`.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! Auth gate (management) / Sync procedure (sync)
//!          ↓
//! MusicApi
//!     ├── Authentication (authorize URL, code exchange, refresh)
//!     ├── Top tracks
//!     └── Playlist read / remove / add
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Credentials
//!
//! A client carries at most one [`Credential`]. Clients are cheap to build and
//! are created per request with the credential of that request's session, so
//! two browser sessions never share tokens.
//!
//! ## Error Handling
//!
//! Non-2xx responses become [`AppError::Api`] with the message Spotify put in
//! the error body. Transport and decoding failures become [`AppError::Http`].
//! Nothing is retried.
//!
//! ## API Coverage
//!
//! - `GET /authorize` - authorization redirect (URL construction only)
//! - `POST /api/token` - code exchange and token refresh
//! - `GET /me/top/tracks` - user's top tracks per ranking window
//! - `GET /playlists/{playlist_id}/tracks` - current playlist contents
//! - `DELETE /playlists/{playlist_id}/tracks` - bulk removal
//! - `POST /playlists/{playlist_id}/tracks` - bulk insertion

use std::{future::Future, sync::Arc};

use reqwest::{Client, RequestBuilder, Response};

use crate::{
    Res,
    config::Config,
    error::AppError,
    types::{
        Credential, SnapshotResponse, SpotifyErrorResponse, TimeRange, TokenResponse,
        TopTracksPage, TrackRef,
    },
};

pub mod auth;
pub mod playlist;
pub mod tracks;

/// Call surface of the remote music service.
///
/// The auth gate and the sync procedure are written against this trait so they
/// can be driven by a recording fake in tests.
pub trait MusicApi: Send + Sync {
    fn build_authorize_url(&self, scopes: &[String], state: &str) -> Res<String>;

    fn set_credential(&mut self, credential: Credential);

    fn clear_credential(&mut self);

    fn credential(&self) -> Option<&Credential>;

    fn exchange_code(&self, code: &str) -> impl Future<Output = Res<TokenResponse>> + Send;

    fn refresh_credential(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Res<TokenResponse>> + Send;

    fn list_top_tracks(
        &self,
        time_range: Option<TimeRange>,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Res<TopTracksPage>> + Send;

    fn list_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> impl Future<Output = Res<Vec<TrackRef>>> + Send;

    fn remove_tracks_from_playlist(
        &self,
        playlist_id: &str,
        tracks: &[TrackRef],
    ) -> impl Future<Output = Res<SnapshotResponse>> + Send;

    fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> impl Future<Output = Res<SnapshotResponse>> + Send;
}

/// `reqwest` backed [`MusicApi`] talking to the real Spotify endpoints.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    config: Arc<Config>,
    http: Client,
    credential: Option<Credential>,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>, http: Client) -> Self {
        Self {
            config,
            http,
            credential: None,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{base}{path}",
            base = self.config.api_url.trim_end_matches('/'),
            path = path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> Res<RequestBuilder> {
        let credential = self.credential.as_ref().ok_or(AppError::Unauthenticated)?;
        Ok(request.bearer_auth(&credential.access_token))
    }
}

impl MusicApi for SpotifyClient {
    fn build_authorize_url(&self, scopes: &[String], state: &str) -> Res<String> {
        auth::authorize_url(&self.config, scopes, state)
    }

    fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    fn clear_credential(&mut self) {
        self.credential = None;
    }

    fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    async fn exchange_code(&self, code: &str) -> Res<TokenResponse> {
        auth::exchange_code(&self.http, &self.config, code).await
    }

    async fn refresh_credential(&self, refresh_token: &str) -> Res<TokenResponse> {
        auth::refresh_token(&self.http, &self.config, refresh_token).await
    }

    async fn list_top_tracks(
        &self,
        time_range: Option<TimeRange>,
        limit: u32,
        offset: u32,
    ) -> Res<TopTracksPage> {
        tracks::get_top_tracks(self, time_range, limit, offset).await
    }

    async fn list_playlist_tracks(&self, playlist_id: &str) -> Res<Vec<TrackRef>> {
        playlist::get_tracks(self, playlist_id).await
    }

    async fn remove_tracks_from_playlist(
        &self,
        playlist_id: &str,
        tracks: &[TrackRef],
    ) -> Res<SnapshotResponse> {
        playlist::remove_tracks(self, playlist_id, tracks).await
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<SnapshotResponse> {
        playlist::add_tracks(self, playlist_id, uris).await
    }
}

/// Turns a non-2xx response into [`AppError::Api`].
///
/// Spotify puts a readable message into the JSON error body. When the body is
/// missing or not JSON the canonical reason of the status code is used.
pub(crate) async fn check_response(response: Response) -> Res<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<SpotifyErrorResponse>(&body)
        .map(|e| e.message())
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}
