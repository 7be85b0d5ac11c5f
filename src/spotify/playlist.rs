use crate::{
    Res,
    spotify::{SpotifyClient, check_response},
    types::{
        AddTracksRequest, PlaylistTracksResponse, RemoveTracksRequest, SnapshotResponse, TrackRef,
    },
};

fn tracks_url(client: &SpotifyClient, playlist_id: &str) -> String {
    client.api_url(&format!("/playlists/{id}/tracks", id = playlist_id))
}

/// Returns the track references currently stored in a playlist.
///
/// Items without a track (local files, tracks removed from the catalogue) are
/// skipped since they cannot be addressed by URI.
pub async fn get_tracks(client: &SpotifyClient, playlist_id: &str) -> Res<Vec<TrackRef>> {
    let request = client.http.get(tracks_url(client, playlist_id));
    let response = client.authorized(request)?.send().await?;
    let response = check_response(response).await?;

    let json = response.json::<PlaylistTracksResponse>().await?;
    Ok(json.items.into_iter().filter_map(|item| item.track).collect())
}

/// Removes every occurrence of the given tracks from a playlist in one request.
pub async fn remove_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    tracks: &[TrackRef],
) -> Res<SnapshotResponse> {
    let body = RemoveTracksRequest {
        tracks: tracks.to_vec(),
    };

    let request = client.http.delete(tracks_url(client, playlist_id)).json(&body);
    let response = client.authorized(request)?.send().await?;
    let response = check_response(response).await?;

    Ok(response.json::<SnapshotResponse>().await?)
}

/// Appends tracks to a playlist in the given order in one request.
pub async fn add_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[String],
) -> Res<SnapshotResponse> {
    let body = AddTracksRequest {
        uris: uris.to_vec(),
    };

    let request = client.http.post(tracks_url(client, playlist_id)).json(&body);
    let response = client.authorized(request)?.send().await?;
    let response = check_response(response).await?;

    Ok(response.json::<SnapshotResponse>().await?)
}
