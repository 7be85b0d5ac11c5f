use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Seconds before the nominal expiry at which a credential is treated as stale.
pub const EXPIRY_BUFFER_SECS: u64 = 240;

/// Access/refresh token pair held by one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Credential {
    pub fn new(access_token: String, refresh_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_BUFFER_SECS >= self.obtained_at + self.expires_in
    }
}

/// Body of the token endpoint for both the code exchange and the refresh grant.
///
/// Every field is optional because the gate has to report a response that
/// lacks either token instead of failing to decode it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRef {
    pub uri: String,
}

impl TrackRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// One page of `GET /me/top/tracks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTracksPage {
    pub items: Vec<TrackRef>,
    pub total: u32,
}

/// Ranking window over which Spotify computes top tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    // null for local files and tracks that are no longer available
    pub track: Option<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

/// Confirmation returned by playlist mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: Option<String>,
}

impl SnapshotResponse {
    pub fn confirmed(id: impl Into<String>) -> Self {
        Self {
            snapshot_id: Some(id.into()),
        }
    }

    pub fn is_committed(&self) -> bool {
        self.snapshot_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyErrorResponse {
    pub error: SpotifyErrorBody,
    pub error_description: Option<String>,
}

/// Spotify reports API errors as an object and OAuth errors as a plain code.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SpotifyErrorBody {
    Detail { status: Option<u16>, message: String },
    Code(String),
}

impl SpotifyErrorResponse {
    pub fn message(&self) -> String {
        match (&self.error, &self.error_description) {
            (SpotifyErrorBody::Detail { message, .. }, _) => message.clone(),
            (SpotifyErrorBody::Code(code), Some(description)) => {
                format!("{}: {}", code, description)
            }
            (SpotifyErrorBody::Code(code), None) => code.clone(),
        }
    }
}
