use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::{
    api,
    config::Config,
    error, info,
    spotify::SpotifyClient,
    success,
    sync::SyncWindow,
    warning,
};

pub const SESSION_COOKIE: &str = "topsync.sess";

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: Client::new(),
        }
    }

    /// A client without credential; handlers load the session's one into it.
    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(Arc::clone(&self.config), self.http.clone())
    }
}

/// Builds the application router with its session layer.
///
/// Every sync route is mounted. A window without a playlist answers with a
/// configuration error, which is also announced once at startup.
pub fn router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(false)
        .with_http_only(true)
        // the Spotify redirect back to the callback is a cross-site navigation
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    let mut app = Router::new()
        .route("/health", get(api::health))
        .route("/auth/login", get(api::login))
        .route("/auth/callback", get(api::callback))
        .route("/auth/logout", get(api::logout));

    for window in SyncWindow::ALL {
        if state.config.playlists.for_window(window).is_none() {
            warning!(
                "No playlist configured for the {} window, {} will reject every request.",
                window,
                window.route()
            );
        }

        let handler = match window {
            SyncWindow::Default => post(api::top_tracks),
            SyncWindow::Short => post(api::top_tracks_short),
            SyncWindow::Medium => post(api::top_tracks_medium),
            SyncWindow::Long => post(api::top_tracks_long),
        };
        app = app.route(window.route(), handler);
    }

    app.layer(session_layer).with_state(state)
}

pub async fn start_api_server(config: Config, open_browser: bool) {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };
    success!("Listening on http://{}", addr);

    if open_browser {
        let login_url = format!("http://localhost:{}/auth/login", addr.port());
        if webbrowser::open(&login_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                login_url
            )
        } else {
            info!("Opened {} in the browser.", login_url);
        }
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
