use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::RemoteError,
    spotify::SpotifyApi,
    types::{
        ArtistGenres, AudioFeatures, CreatePlaylistRequest, CreatePlaylistResponse,
        GetAudioFeaturesResponse, GetSeveralArtistsResponse, Page, PlaylistItem,
        PlaylistTracksRequest, SavedTrackItem,
    },
    utils, warning,
};

/// HTTP implementation of [`SpotifyApi`] for one user session.
///
/// The client carries the session's access token; build a new one whenever
/// the token changes.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(api_url: &str, token: &str) -> Self {
        SpotifyClient {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, RemoteError> {
        let response = request.bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            warning!("Spotify call {} failed with {}", endpoint, status);
            return Err(RemoteError::Status {
                status,
                endpoint: endpoint.to_string(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let endpoint = path.split('?').next().unwrap_or(path);
        let response = self
            .send(self.client.get(self.url(path)), endpoint)
            .await?;
        decode(response, endpoint).await
    }
}

/// Reads a JSON body. A body that arrives but does not decode is malformed,
/// only a failure to read it is a transport error.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<T, RemoteError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| RemoteError::Malformed(format!("{}: {}", endpoint, e)))
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn saved_tracks(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Page<SavedTrackItem>, RemoteError> {
        self.get_json(&format!(
            "/me/tracks?limit={limit}&offset={offset}",
            limit = limit,
            offset = offset
        ))
        .await
    }

    async fn playlists(&self, limit: u32, offset: u64) -> Result<Page<PlaylistItem>, RemoteError> {
        self.get_json(&format!(
            "/me/playlists?limit={limit}&offset={offset}",
            limit = limit,
            offset = offset
        ))
        .await
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<ArtistGenres>, RemoteError> {
        let res: GetSeveralArtistsResponse = self
            .get_json(&format!("/artists?ids={ids}", ids = utils::join_ids(ids)))
            .await?;
        Ok(res.artists)
    }

    async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, RemoteError> {
        let res: GetAudioFeaturesResponse = self
            .get_json(&format!(
                "/audio-features?ids={ids}",
                ids = utils::join_ids(ids)
            ))
            .await?;
        Ok(res.audio_features)
    }

    async fn create_playlist(&self, name: &str, public: bool) -> Result<String, RemoteError> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public,
        };

        let response = self
            .send(
                self.client.post(self.url("/me/playlists")).json(&body),
                "/me/playlists",
            )
            .await?;

        let created: CreatePlaylistResponse = decode(response, "/me/playlists").await?;
        Ok(created.id)
    }

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), RemoteError> {
        let path = format!("/playlists/{id}/tracks", id = playlist_id);
        let body = PlaylistTracksRequest {
            uris: uris.to_vec(),
        };
        self.send(self.client.put(self.url(&path)).json(&body), &path)
            .await?;
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), RemoteError> {
        let path = format!("/playlists/{id}/tracks", id = playlist_id);
        let body = PlaylistTracksRequest {
            uris: uris.to_vec(),
        };
        self.send(self.client.post(self.url(&path)).json(&body), &path)
            .await?;
        Ok(())
    }
}
