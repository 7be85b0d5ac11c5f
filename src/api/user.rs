use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::{
    Res,
    error::AppError,
    info,
    management::{self, AuthSession},
    server::AppState,
    sync::{self, SyncReport, SyncWindow},
};

impl IntoResponse for SyncReport {
    fn into_response(self) -> Response {
        let message = self.message();
        let body = if self.is_success() {
            json!({ "message": message })
        } else {
            json!({ "error": message })
        };

        (self.status(), Json(body)).into_response()
    }
}

async fn sync_window(state: AppState, session: Session, window: SyncWindow) -> Res<SyncReport> {
    let playlist_id = state
        .config
        .playlists
        .for_window(window)
        .ok_or_else(|| {
            AppError::Configuration(format!("No playlist configured for the {} window", window))
        })?
        .to_string();

    let mut client = state.client();
    management::restore_credential(&mut client, &AuthSession::new(&session)).await?;

    let report = sync::sync_top_tracks(&client, window, &playlist_id).await?;
    info!("Sync of the {} window finished with {}.", report.window, report.status());

    Ok(report)
}

pub async fn top_tracks(State(state): State<AppState>, session: Session) -> Res<SyncReport> {
    sync_window(state, session, SyncWindow::Default).await
}

pub async fn top_tracks_short(State(state): State<AppState>, session: Session) -> Res<SyncReport> {
    sync_window(state, session, SyncWindow::Short).await
}

pub async fn top_tracks_medium(State(state): State<AppState>, session: Session) -> Res<SyncReport> {
    sync_window(state, session, SyncWindow::Medium).await
}

pub async fn top_tracks_long(State(state): State<AppState>, session: Session) -> Res<SyncReport> {
    sync_window(state, session, SyncWindow::Long).await
}
