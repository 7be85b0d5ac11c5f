use crate::{
    Res,
    spotify::{SpotifyClient, check_response},
    types::{TimeRange, TopTracksPage},
};

/// Retrieves one page of the current user's top tracks.
///
/// # Arguments
///
/// * `client` - Client carrying the session's credential
/// * `time_range` - Ranking window; `None` leaves the choice to Spotify
/// * `limit` - Page size (1-50)
/// * `offset` - Index of the first item to return
///
/// # API Endpoint
///
/// Uses Spotify's `/me/top/tracks` endpoint with the `limit`, `offset` and
/// optional `time_range` query parameters.
pub async fn get_top_tracks(
    client: &SpotifyClient,
    time_range: Option<TimeRange>,
    limit: u32,
    offset: u32,
) -> Res<TopTracksPage> {
    let mut query = vec![
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ];
    if let Some(range) = time_range {
        query.push(("time_range", range.as_str().to_string()));
    }

    let request = client.http.get(client.api_url("/me/top/tracks")).query(&query);
    let response = client.authorized(request)?.send().await?;
    let response = check_response(response).await?;

    Ok(response.json::<TopTracksPage>().await?)
}
