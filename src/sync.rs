//! Top tracks to playlist synchronization.
//!
//! A sync makes one playlist equal to the user's current top tracks for a
//! ranking window. It runs in three phases:
//!
//! 1. **Fetch** - collect the ranked tracks, paginated depending on the window.
//!    Zero tracks on the remote side aborts before anything is mutated.
//! 2. **Clear** - remove everything the playlist currently holds in one request.
//! 3. **Insert** - append all fetched tracks in rank order in one request.
//!
//! Clear and insert fail independently: a failed clear is recorded and the
//! insert is still attempted. Both outcomes end up in a [`SyncReport`] which
//! decides the final response.

use std::fmt;

use axum::http::StatusCode;

use crate::{
    Res,
    error::AppError,
    info,
    spotify::MusicApi,
    success,
    types::{SnapshotResponse, TimeRange, TrackRef},
    warning,
};

/// Page size used for every top tracks request.
pub const PAGE_LIMIT: u32 = 50;

/// Which top tracks a sync route mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncWindow {
    /// No explicit ranking window, Spotify's own default applies.
    Default,
    Short,
    Medium,
    Long,
}

/// How the fetch phase walks through the top tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Keep requesting while a page comes back full.
    UntilShortPage,
    /// Keep requesting while `offset < total`.
    UntilTotal,
    /// One request only.
    SinglePage,
}

impl SyncWindow {
    pub const ALL: [SyncWindow; 4] = [
        SyncWindow::Default,
        SyncWindow::Short,
        SyncWindow::Medium,
        SyncWindow::Long,
    ];

    pub fn time_range(self) -> Option<TimeRange> {
        match self {
            SyncWindow::Default => None,
            SyncWindow::Short => Some(TimeRange::Short),
            SyncWindow::Medium => Some(TimeRange::Medium),
            SyncWindow::Long => Some(TimeRange::Long),
        }
    }

    pub fn pagination(self) -> Pagination {
        match self {
            SyncWindow::Default => Pagination::UntilShortPage,
            SyncWindow::Medium => Pagination::UntilTotal,
            SyncWindow::Short | SyncWindow::Long => Pagination::SinglePage,
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            SyncWindow::Default => "/user/top-tracks",
            SyncWindow::Short => "/user/top-tracks-short",
            SyncWindow::Medium => "/user/top-tracks-medium",
            SyncWindow::Long => "/user/top-tracks-long",
        }
    }
}

impl fmt::Display for SyncWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_range() {
            Some(range) => write!(f, "{}", range),
            None => f.write_str("default"),
        }
    }
}

/// Outcome of the clear or insert phase.
#[derive(Debug)]
pub enum PhaseOutcome {
    /// The phase committed, touching this many tracks.
    Done(usize),
    /// Nothing to do.
    Skipped,
    Failed(AppError),
}

impl PhaseOutcome {
    fn from_result(result: Res<usize>) -> Self {
        match result {
            Ok(0) => PhaseOutcome::Skipped,
            Ok(n) => PhaseOutcome::Done(n),
            Err(e) => PhaseOutcome::Failed(e),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PhaseOutcome::Failed(_))
    }

    fn error(&self) -> Option<&AppError> {
        match self {
            PhaseOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Aggregated result of the clear and insert phases of one sync.
#[derive(Debug)]
pub struct SyncReport {
    pub window: SyncWindow,
    pub fetched: usize,
    pub cleared: PhaseOutcome,
    pub inserted: PhaseOutcome,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        !self.cleared.is_failed() && !self.inserted.is_failed()
    }

    /// `400` if any phase failed, `200` if there was nothing to insert,
    /// `201` otherwise.
    pub fn status(&self) -> StatusCode {
        if !self.is_success() {
            StatusCode::BAD_REQUEST
        } else if matches!(self.inserted, PhaseOutcome::Skipped) {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        }
    }

    /// Error messages of all failed phases, in phase order, or the success message.
    pub fn message(&self) -> String {
        let errors: Vec<String> = [&self.cleared, &self.inserted]
            .into_iter()
            .filter_map(PhaseOutcome::error)
            .map(ToString::to_string)
            .collect();

        if !errors.is_empty() {
            errors.join("; ")
        } else if matches!(self.inserted, PhaseOutcome::Skipped) {
            "No new tracks to insert".to_string()
        } else {
            "Top tracks added successfully".to_string()
        }
    }
}

/// Replaces the contents of `playlist_id` with the user's top tracks for `window`.
///
/// # Errors
///
/// Only the fetch phase fails the call itself ([`AppError::NoTracksFound`] or
/// any upstream error); the playlist is untouched in that case. Clear and
/// insert failures are reported through the returned [`SyncReport`].
pub async fn sync_top_tracks<C: MusicApi>(
    client: &C,
    window: SyncWindow,
    playlist_id: &str,
) -> Res<SyncReport> {
    info!("Fetching {} top tracks.", window);
    let tracks = match fetch_top_tracks(client, window).await {
        Ok(tracks) => tracks,
        Err(e) => {
            warning!("Failed to fetch top tracks: {}", e);
            return Err(e);
        }
    };
    success!("Fetched {} top tracks.", tracks.len());

    info!("Removing old tracks from playlist {}.", playlist_id);
    let cleared = PhaseOutcome::from_result(clear_playlist(client, playlist_id).await);
    match &cleared {
        PhaseOutcome::Done(n) => success!("Removed {} tracks.", n),
        PhaseOutcome::Skipped => info!("No tracks to remove."),
        PhaseOutcome::Failed(e) => warning!("Failed to remove tracks: {}", e),
    }

    info!("Inserting new tracks.");
    let inserted = PhaseOutcome::from_result(insert_tracks(client, playlist_id, &tracks).await);
    match &inserted {
        PhaseOutcome::Done(n) => success!("Inserted {} tracks.", n),
        PhaseOutcome::Skipped => info!("No new tracks to insert."),
        PhaseOutcome::Failed(e) => warning!("Failed to insert tracks: {}", e),
    }

    Ok(SyncReport {
        window,
        fetched: tracks.len(),
        cleared,
        inserted,
    })
}

/// Collects the ranked top tracks for `window`, highest rank first.
pub async fn fetch_top_tracks<C: MusicApi>(client: &C, window: SyncWindow) -> Res<Vec<TrackRef>> {
    let pagination = window.pagination();
    let mut tracks = Vec::new();
    let mut offset = 0;

    loop {
        info!("Requesting top tracks, offset: {}", offset);
        let page = client
            .list_top_tracks(window.time_range(), PAGE_LIMIT, offset)
            .await?;

        // the page-size walk only trusts `total` on the first page
        let check_total = pagination != Pagination::UntilShortPage || offset == 0;
        if check_total && page.total == 0 {
            return Err(AppError::NoTracksFound);
        }

        let page_len = page.items.len();
        tracks.extend(page.items);
        offset += PAGE_LIMIT;

        let done = match pagination {
            Pagination::SinglePage => true,
            Pagination::UntilShortPage => page_len < PAGE_LIMIT as usize,
            Pagination::UntilTotal => offset >= page.total,
        };
        if done {
            break;
        }
    }

    Ok(tracks)
}

async fn clear_playlist<C: MusicApi>(client: &C, playlist_id: &str) -> Res<usize> {
    let existing = client.list_playlist_tracks(playlist_id).await?;
    if existing.is_empty() {
        return Ok(0);
    }

    let snapshot = client
        .remove_tracks_from_playlist(playlist_id, &existing)
        .await?;
    require_snapshot(&snapshot, "Error to remove tracks from playlist")?;

    Ok(existing.len())
}

async fn insert_tracks<C: MusicApi>(
    client: &C,
    playlist_id: &str,
    tracks: &[TrackRef],
) -> Res<usize> {
    if tracks.is_empty() {
        return Ok(0);
    }

    let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
    let snapshot = client.add_tracks_to_playlist(playlist_id, &uris).await?;
    require_snapshot(&snapshot, "Error to add tracks to playlist")?;

    Ok(uris.len())
}

fn require_snapshot(snapshot: &SnapshotResponse, message: &str) -> Res<()> {
    if snapshot.is_committed() {
        Ok(())
    } else {
        Err(AppError::PlaylistMutation(message.to_string()))
    }
}
