use crate::{
    Res,
    error::AppError,
    info,
    management::AuthSession,
    spotify::MusicApi,
    success,
    types::{Credential, TokenResponse},
    utils, warning,
};

/// Access token lifetime assumed when the token endpoint does not report one.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Starts the authorization-code flow for this session.
///
/// Stores a fresh anti-forgery token in the session and returns the Spotify
/// authorization URL the caller has to be redirected to.
///
/// # Errors
///
/// [`AppError::AuthorizationUrl`] when the URL cannot be built, e.g. because
/// of misconfigured client credentials.
pub async fn begin_login<C: MusicApi>(
    client: &C,
    session: &AuthSession<'_>,
    scopes: &[String],
) -> Res<String> {
    let state = utils::generate_state();
    session.set_state(&state).await?;

    let url = client.build_authorize_url(scopes, &state)?;
    info!("Redirecting to Spotify authorization.");
    Ok(url)
}

/// Completes the authorization-code flow.
///
/// The anti-forgery check happens before any network call: a request with a
/// missing or mismatching `state` never reaches the token endpoint and leaves
/// the session as it was. On a match the stored token is consumed, the code is
/// exchanged and the resulting credential becomes the session's credential.
///
/// # Errors
///
/// [`AppError::BadRequest`] with
/// - `"Missing code or state"` when either parameter is absent or empty
/// - `"Invalid state"` when `state` differs from the stored token
/// - the upstream message when the exchange fails
/// - a description when the token response lacks either token
pub async fn complete_login<C: MusicApi>(
    client: &mut C,
    session: &AuthSession<'_>,
    code: Option<&str>,
    state: Option<&str>,
) -> Res<()> {
    let (Some(code), Some(state)) = (
        code.filter(|c| !c.is_empty()),
        state.filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest("Missing code or state".into()));
    };

    if session.state().await?.as_deref() != Some(state) {
        warning!("Rejected callback with an invalid state.");
        return Err(AppError::BadRequest("Invalid state".into()));
    }

    session.clear_state().await?;

    let token = client
        .exchange_code(code)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let credential = credential_from(token, None).ok_or_else(|| {
        AppError::BadRequest("Error to get access token or refresh token".into())
    })?;

    session.set_credential(&credential).await?;
    client.set_credential(credential);

    success!("Authentication successful!");
    Ok(())
}

/// Ends the session and forgets its credential. Always succeeds.
pub async fn logout<C: MusicApi>(client: &mut C, session: &AuthSession<'_>) {
    if let Err(e) = session.discard().await {
        warning!("Failed to discard session: {}", e);
    }

    client.clear_credential();
    info!("Logged out.");
}

/// Loads the session's credential into `client`, refreshing it first if it
/// is about to expire.
///
/// A refreshed credential is written back to the session so later requests
/// pick it up.
///
/// # Errors
///
/// [`AppError::Unauthenticated`] when the session holds no credential,
/// [`AppError::BadRequest`] when the refresh is rejected.
pub async fn restore_credential<C: MusicApi>(client: &mut C, session: &AuthSession<'_>) -> Res<()> {
    let Some(credential) = session.credential().await? else {
        return Err(AppError::Unauthenticated);
    };

    let credential = if credential.is_expired() {
        info!("Access token expired, refreshing.");
        let token = client
            .refresh_credential(&credential.refresh_token)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let fresh = credential_from(token, Some(&credential.refresh_token)).ok_or_else(|| {
            AppError::BadRequest("Error to refresh access token".into())
        })?;
        session.set_credential(&fresh).await?;
        fresh
    } else {
        credential
    };

    client.set_credential(credential);
    Ok(())
}

/// Builds a credential from a token response; `fallback_refresh` covers the
/// refresh grant, where Spotify may omit the refresh token.
fn credential_from(token: TokenResponse, fallback_refresh: Option<&str>) -> Option<Credential> {
    let access_token = token.access_token.filter(|t| !t.is_empty())?;
    let refresh_token = token
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| fallback_refresh.map(String::from))?;

    Some(Credential::new(
        access_token,
        refresh_token,
        token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
    ))
}
