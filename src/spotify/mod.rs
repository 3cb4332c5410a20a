//! # Spotify Integration Module
//!
//! Everything Vibester asks of the Spotify Web API goes through the
//! [`SpotifyApi`] trait. The sort pipeline is generic over it, so the same
//! code runs against the real service through [`SpotifyClient`] and against
//! an in-memory platform in the tests.
//!
//! ## API Coverage
//!
//! - `GET /me/tracks` - saved tracks, paginated
//! - `GET /me/playlists` - the user's playlists, paginated
//! - `GET /artists?ids=` - up to 50 artists per call, for genres
//! - `GET /audio-features?ids=` - up to 100 tracks per call
//! - `POST /me/playlists` - create a playlist
//! - `PUT /playlists/{id}/tracks` - replace the contents, up to 100 URIs
//! - `POST /playlists/{id}/tracks` - append, up to 100 URIs
//!
//! The authorization code exchange and token refresh live in [`auth`].
//!
//! ## Error Handling
//!
//! Any non-success status, transport failure or undecodable body becomes a
//! [`RemoteError`]. Nothing is retried; a failed call ends the sort run.

use async_trait::async_trait;

use crate::{
    error::RemoteError,
    types::{ArtistGenres, AudioFeatures, Page, PlaylistItem, SavedTrackItem},
};

pub mod auth;
mod client;

pub use client::SpotifyClient;
pub(crate) use client::decode;

#[async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn saved_tracks(&self, limit: u32, offset: u64)
    -> Result<Page<SavedTrackItem>, RemoteError>;

    async fn playlists(&self, limit: u32, offset: u64) -> Result<Page<PlaylistItem>, RemoteError>;

    /// Artists for `ids`, in the order of `ids`.
    async fn artists(&self, ids: &[String]) -> Result<Vec<ArtistGenres>, RemoteError>;

    /// Audio features for `ids`, in the order of `ids`. Tracks Spotify has
    /// no analysis for come back as `None`.
    async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, RemoteError>;

    /// Creates a playlist on the current user's account and returns its id.
    async fn create_playlist(&self, name: &str, public: bool) -> Result<String, RemoteError>;

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), RemoteError>;

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), RemoteError>;
}
