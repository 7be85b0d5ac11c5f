use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use reqwest::Url;
use serde_json::{Value, json};
use topsync::{
    config::{self, Config, PlaylistTargets},
    server::{self, AppState, SESSION_COOKIE},
};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header as header_is, method, path, query_param},
};

fn test_config(playlists: PlaylistTargets) -> Config {
    Config {
        client_id: "client-123".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost:3000/auth/callback".into(),
        scopes: vec!["user-top-read".into(), "playlist-modify-private".into()],
        playlists,
        port: 3000,
        auth_url: config::DEFAULT_AUTH_URL.into(),
        token_url: "http://127.0.0.1:9/api/token".into(),
        api_url: "http://127.0.0.1:9/v1".into(),
    }
}

fn app() -> Router {
    server::router(AppState::new(test_config(PlaylistTargets {
        shared: Some("shared".into()),
        ..Default::default()
    })))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    post_with_cookie(uri, None)
}

fn post_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn session_cookie(response: &Response) -> String {
    let value = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap();
    value.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_login_redirects_to_spotify() {
    let response = app().oneshot(get("/auth/login", None)).await.unwrap();

    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(location.contains("client_id=client-123"));
    assert!(location.contains("state="));
    assert!(session_cookie(&response).starts_with(SESSION_COOKIE));
}

#[tokio::test]
async fn test_callback_without_parameters() {
    let response = app().oneshot(get("/auth/callback", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "Missing code or state");
}

#[tokio::test]
async fn test_callback_with_forged_state() {
    let app = app();

    let login = app.clone().oneshot(get("/auth/login", None)).await.unwrap();
    let cookie = session_cookie(&login);

    let response = app
        .oneshot(get(
            "/auth/callback?code=abc&state=forged",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "Invalid state");
}

#[tokio::test]
async fn test_sync_requires_login() {
    let response = app().oneshot(post("/user/top-tracks-short")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Not authenticated"));
}

#[tokio::test]
async fn test_unconfigured_window_answers_with_json_error() {
    let app = server::router(AppState::new(test_config(PlaylistTargets {
        short: Some("short".into()),
        ..Default::default()
    })));

    for route in ["/user/top-tracks", "/user/top-tracks-long"] {
        let response = app.clone().oneshot(post(route)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("No playlist configured for the")
        );
    }

    let response = app.oneshot(post("/user/top-tracks-long")).await.unwrap();
    assert_eq!(
        json(response).await["error"],
        "No playlist configured for the long_term window"
    );
}

#[tokio::test]
async fn test_configured_window_still_requires_login() {
    let app = server::router(AppState::new(test_config(PlaylistTargets {
        short: Some("short".into()),
        ..Default::default()
    })));

    let response = app.oneshot(post("/user/top-tracks-short")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Not authenticated"));
}

#[tokio::test]
async fn test_logout() {
    let response = app().oneshot(get("/auth/logout", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["message"], "Successfully logged out");
}

async fn mount_spotify(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT1",
            "refresh_token": "RT1",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me/top/tracks"))
        .and(header_is("authorization", "Bearer AT1"))
        .and(query_param("time_range", "short_term"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "uri": "spotify:track:A" }, { "uri": "spotify:track:B" }],
            "total": 2,
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/short/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "track": { "uri": "spotify:track:OLD" } }, { "track": null }],
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/playlists/short/tracks"))
        .and(body_json(json!({ "tracks": [{ "uri": "spotify:track:OLD" }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "snapshot_id": "s1" })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/playlists/short/tracks"))
        .and(body_json(json!({ "uris": ["spotify:track:A", "spotify:track:B"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "s2" })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_sync_logout_over_http() {
    let spotify = MockServer::start().await;
    mount_spotify(&spotify).await;

    let mut config = test_config(PlaylistTargets {
        short: Some("short".into()),
        ..Default::default()
    });
    config.token_url = format!("{}/api/token", spotify.uri());
    config.api_url = format!("{}/v1", spotify.uri());
    let app = server::router(AppState::new(config));

    let login = app.clone().oneshot(get("/auth/login", None)).await.unwrap();
    let cookie = session_cookie(&login);
    let location = login.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    let state = Url::parse(location)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let callback = app
        .clone()
        .oneshot(get(
            &format!("/auth/callback?code=the-code&state={}", state),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(callback.status(), StatusCode::OK);
    assert_eq!(json(callback).await["message"], "Successfully authenticated");

    let sync = app
        .clone()
        .oneshot(post_with_cookie("/user/top-tracks-short", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(sync.status(), StatusCode::CREATED);
    assert_eq!(json(sync).await["message"], "Top tracks added successfully");

    let logout = app
        .clone()
        .oneshot(get("/auth/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    let after = app
        .oneshot(post_with_cookie("/user/top-tracks-short", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::BAD_REQUEST);
    assert!(
        json(after).await["error"]
            .as_str()
            .unwrap()
            .contains("Not authenticated")
    );
}
