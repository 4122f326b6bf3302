use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    error::{ChromaticError, Result},
    types::{TopTracksResponse, Track},
    utils::Term,
};

/// Something that can rank a listener's tracks.
#[async_trait]
pub trait TrackSource: Send + Sync {
    async fn top_tracks(&self, token: &str, term: Term, limit: u32) -> Result<Vec<Track>>;
}

/// [`TrackSource`] backed by the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyTrackSource {
    client: Client,
    api_url: String,
}

impl SpotifyTrackSource {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl TrackSource for SpotifyTrackSource {
    async fn top_tracks(&self, token: &str, term: Term, limit: u32) -> Result<Vec<Track>> {
        get_top_tracks(&self.client, &self.api_url, token, term, limit).await
    }
}

/// Retrieves the user's top tracks from `GET /me/top/tracks`.
///
/// # Arguments
///
/// * `client` - HTTP client, already configured with the request timeout
/// * `api_url` - Web API base URL, e.g. `https://api.spotify.com/v1`
/// * `token` - Bearer token forwarded from the client
/// * `term` - Ranking window (`short_term`, `medium_term`, `long_term`)
/// * `limit` - Number of tracks, 1-50
///
/// # Errors
///
/// - `UpstreamUnauthorized` for a 401 (invalid or expired token)
/// - `UpstreamError` for any other non-success status, for a success body that
///   carries an `error` object, and for a body that is not a track list
/// - `UpstreamUnavailable` when Spotify cannot be reached or the request times out
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    term: Term,
    limit: u32,
) -> Result<Vec<Track>> {
    let api_url = format!(
        "{uri}/me/top/tracks?limit={limit}&time_range={range}",
        uri = api_url,
        limit = limit,
        range = term.as_time_range()
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| ChromaticError::UpstreamUnavailable(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ChromaticError::UpstreamUnauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ChromaticError::UpstreamError {
            status: status.as_u16(),
            message: body,
        });
    }

    let json: Value = response
        .json()
        .await
        .map_err(|e| ChromaticError::UpstreamError {
            status: StatusCode::BAD_GATEWAY.as_u16(),
            message: format!("unreadable response: {}", e),
        })?;

    parse_top_tracks(json)
}

/// Turns a top-tracks response body into tracks.
pub fn parse_top_tracks(json: Value) -> Result<Vec<Track>> {
    if let Some(error) = json.get("error") {
        return Err(ChromaticError::UpstreamError {
            status: StatusCode::BAD_REQUEST.as_u16(),
            message: error.to_string(),
        });
    }

    let response: TopTracksResponse =
        serde_json::from_value(json).map_err(|e| ChromaticError::UpstreamError {
            status: StatusCode::BAD_GATEWAY.as_u16(),
            message: format!("unexpected response shape: {}", e),
        })?;

    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_top_tracks() {
        let body = json!({
            "items": [{
                "id": "t1",
                "name": "Song",
                "artists": [{"id": "a1", "name": "Artist"}, {"name": "Guest"}],
                "album": {
                    "id": "al1",
                    "name": "Album",
                    "images": [{"url": "https://i.scdn.co/image/1", "height": 640, "width": 640}]
                },
                "popularity": 80
            }],
            "total": 1
        });

        let tracks = parse_top_tracks(body).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artists.len(), 2);
        assert_eq!(tracks[0].album.artwork_url(), Some("https://i.scdn.co/image/1"));
    }

    #[test]
    fn test_local_track_without_id() {
        let body = json!({
            "items": [{
                "id": null,
                "name": "Home Recording",
                "artists": [{"id": null, "name": "Me"}],
                "album": {"id": "local", "name": "Local Files", "images": []}
            }]
        });

        let tracks = parse_top_tracks(body).unwrap();
        assert_eq!(tracks[0].id, None);
        assert_eq!(tracks[0].album.artwork_url(), None);
    }

    #[test]
    fn test_error_body_is_upstream_error() {
        let body = json!({"error": {"status": 400, "message": "Invalid limit"}});
        let err = parse_top_tracks(body).unwrap_err();
        assert!(matches!(err, ChromaticError::UpstreamError { status: 400, .. }));
    }

    #[test]
    fn test_malformed_body_is_bad_gateway() {
        let err = parse_top_tracks(json!({"items": "nope"})).unwrap_err();
        assert!(matches!(err, ChromaticError::UpstreamError { status: 502, .. }));
    }
}
