use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every failure the server can report.
///
/// Startup code treats [`AppError::Configuration`] as fatal. Everything else is
/// caught at the request boundary and rendered as `400 {"error": "..."}`; no
/// distinction between client, auth and upstream errors is made on the wire.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    AuthorizationUrl(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not authenticated, visit /auth/login first")]
    Unauthenticated,

    #[error("No top tracks found")]
    NoTracksFound,

    #[error("{0}")]
    PlaylistMutation(String),

    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(json!({
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}
