#![allow(dead_code)]

use std::sync::Mutex;

use topsync::{
    Res,
    error::AppError,
    spotify::MusicApi,
    types::{Credential, SnapshotResponse, TimeRange, TokenResponse, TopTracksPage, TrackRef},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    TopTracks {
        time_range: Option<TimeRange>,
        limit: u32,
        offset: u32,
        token: Option<String>,
    },
    ListPlaylist(String),
    Remove(String, Vec<TrackRef>),
    Add(String, Vec<String>),
    Exchange(String),
    Refresh(String),
}

/// In-memory stand-in for Spotify that records every call and applies
/// playlist mutations to its own playlist.
#[derive(Debug, Default)]
pub struct MockApi {
    pub top_tracks: Vec<TrackRef>,
    /// Reported `total`; defaults to the length of `top_tracks`.
    pub total: Option<u32>,
    pub playlist: Mutex<Vec<TrackRef>>,
    pub fail_remove: bool,
    pub fail_add: bool,
    pub exchange: TokenResponse,
    pub exchange_error: Option<String>,
    pub refresh: TokenResponse,
    pub credential: Option<Credential>,
    pub calls: Mutex<Vec<Call>>,
}

pub fn uris(ids: &[&str]) -> Vec<TrackRef> {
    ids.iter()
        .map(|id| TrackRef::new(format!("spotify:track:{}", id)))
        .collect()
}

pub fn numbered(count: usize) -> Vec<TrackRef> {
    (0..count)
        .map(|i| TrackRef::new(format!("spotify:track:{}", i)))
        .collect()
}

pub fn tokens(access: &str, refresh: &str) -> TokenResponse {
    TokenResponse {
        access_token: Some(access.to_string()),
        refresh_token: Some(refresh.to_string()),
        expires_in: Some(3600),
        scope: Some("user-top-read".to_string()),
    }
}

impl MockApi {
    pub fn new(top_tracks: Vec<TrackRef>, playlist: Vec<TrackRef>) -> Self {
        Self {
            top_tracks,
            playlist: Mutex::new(playlist),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn playlist(&self) -> Vec<TrackRef> {
        self.playlist.lock().unwrap().clone()
    }

    pub fn count(&self, matcher: fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matcher(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MusicApi for MockApi {
    fn build_authorize_url(&self, scopes: &[String], state: &str) -> Res<String> {
        Ok(format!(
            "https://accounts.test/authorize?scope={}&state={}",
            scopes.join("%20"),
            state
        ))
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
        self.record(Call::Exchange(code.to_string()));
        match &self.exchange_error {
            Some(message) => Err(AppError::Api {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(self.exchange.clone()),
        }
    }

    async fn refresh_credential(&self, refresh_token: &str) -> Res<TokenResponse> {
        self.record(Call::Refresh(refresh_token.to_string()));
        Ok(self.refresh.clone())
    }

    async fn list_top_tracks(
        &self,
        time_range: Option<TimeRange>,
        limit: u32,
        offset: u32,
    ) -> Res<TopTracksPage> {
        self.record(Call::TopTracks {
            time_range,
            limit,
            offset,
            token: self.credential.as_ref().map(|c| c.access_token.clone()),
        });

        let start = (offset as usize).min(self.top_tracks.len());
        let end = (start + limit as usize).min(self.top_tracks.len());
        Ok(TopTracksPage {
            items: self.top_tracks[start..end].to_vec(),
            total: self.total.unwrap_or(self.top_tracks.len() as u32),
        })
    }

    async fn list_playlist_tracks(&self, playlist_id: &str) -> Res<Vec<TrackRef>> {
        self.record(Call::ListPlaylist(playlist_id.to_string()));
        Ok(self.playlist())
    }

    async fn remove_tracks_from_playlist(
        &self,
        playlist_id: &str,
        tracks: &[TrackRef],
    ) -> Res<SnapshotResponse> {
        self.record(Call::Remove(playlist_id.to_string(), tracks.to_vec()));
        if self.fail_remove {
            return Ok(SnapshotResponse::default());
        }

        self.playlist.lock().unwrap().retain(|t| !tracks.contains(t));
        Ok(SnapshotResponse::confirmed("snapshot-remove"))
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<SnapshotResponse> {
        self.record(Call::Add(playlist_id.to_string(), uris.to_vec()));
        if self.fail_add {
            return Ok(SnapshotResponse::default());
        }

        self.playlist
            .lock()
            .unwrap()
            .extend(uris.iter().map(|u| TrackRef::new(u.as_str())));
        Ok(SnapshotResponse::confirmed("snapshot-add"))
    }
}
