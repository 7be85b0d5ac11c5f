use reqwest::{Client, Url};

use crate::{Res, config::Config, error::AppError, spotify::check_response, types::TokenResponse};

/// Builds the Spotify authorization URL the login route redirects to.
///
/// # Arguments
///
/// * `config` - Application configuration holding client id, redirect URI and
///   the authorization endpoint
/// * `scopes` - Permission scopes to request, joined with spaces in the URL
/// * `state` - Anti-forgery token bound to the current session
///
/// # Errors
///
/// Returns [`AppError::AuthorizationUrl`] when client id, redirect URI or
/// scopes are empty, or when the configured endpoint is not a valid URL.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config, &["user-top-read".into()], "xyz")?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config, scopes: &[String], state: &str) -> Res<String> {
    if config.client_id.is_empty() || config.redirect_uri.is_empty() {
        return Err(AppError::AuthorizationUrl(
            "Client id and redirect URI are required to build the authorization URL".into(),
        ));
    }

    if scopes.is_empty() {
        return Err(AppError::AuthorizationUrl(
            "At least one scope is required to build the authorization URL".into(),
        ));
    }

    let scope = scopes.join(" ");
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| AppError::AuthorizationUrl(format!("Invalid authorization URL: {}", e)))?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// Uses the `authorization_code` grant with HTTP basic client authentication.
/// The raw token body is returned; validating that both tokens are present is
/// left to the caller.
pub async fn exchange_code(http: &Client, config: &Config, code: &str) -> Res<TokenResponse> {
    let res = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let res = check_response(res).await?;
    Ok(res.json::<TokenResponse>().await?)
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token; when the response carries
/// none the caller keeps using the old one.
pub async fn refresh_token(http: &Client, config: &Config, refresh_token: &str) -> Res<TokenResponse> {
    let res = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    let res = check_response(res).await?;
    Ok(res.json::<TokenResponse>().await?)
}
