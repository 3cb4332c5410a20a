#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use vibester::{
    error::RemoteError,
    spotify::SpotifyApi,
    types::{
        ArtistGenres, AudioFeatures, Page, PlaylistItem, ReleaseDatePrecision, RemoteTrack,
        SavedTrackItem, TrackAlbum, TrackArtist,
    },
};

/// One call made against the fake platform.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SavedTracks { limit: u32, offset: u64 },
    Playlists { limit: u32, offset: u64 },
    Artists(usize),
    AudioFeatures(usize),
    Create(String),
    Replace(String, usize),
    Append(String, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SavedTracks,
    Playlists,
    Artists,
    AudioFeatures,
    Create,
    Write,
}

#[derive(Debug, Clone)]
pub struct FakePlaylist {
    pub id: String,
    pub name: String,
    pub uris: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    saved: Vec<SavedTrackItem>,
    reported_total: Option<u64>,
    genres: HashMap<String, Vec<String>>,
    features: HashMap<String, AudioFeatures>,
    playlists: Vec<FakePlaylist>,
    calls: Vec<Call>,
    failing: Option<Endpoint>,
    created: usize,
}

/// An in-memory Spotify account.
#[derive(Debug, Default)]
pub struct FakeSpotify {
    state: Mutex<State>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a track by `artist_id`, with neutral audio features.
    pub fn save_track(&self, track_id: &str, artist_id: &str, release_date: &str) {
        let precision = match release_date.len() {
            4 => ReleaseDatePrecision::Year,
            7 => ReleaseDatePrecision::Month,
            _ => ReleaseDatePrecision::Day,
        };
        let mut state = self.state.lock().unwrap();
        state.saved.push(SavedTrackItem {
            track: RemoteTrack {
                id: track_id.to_string(),
                name: format!("Track {}", track_id),
                uri: uri(track_id),
                artists: vec![TrackArtist {
                    id: artist_id.to_string(),
                    name: format!("Artist {}", artist_id),
                }],
                album: TrackAlbum {
                    release_date: release_date.to_string(),
                    release_date_precision: precision,
                },
            },
        });
        state.features.insert(
            track_id.to_string(),
            AudioFeatures {
                danceability: 0.5,
                energy: 0.5,
                valence: 0.5,
            },
        );
    }

    pub fn set_genres(&self, artist_id: &str, genres: &[&str]) {
        self.state.lock().unwrap().genres.insert(
            artist_id.to_string(),
            genres.iter().map(|g| g.to_string()).collect(),
        );
    }

    pub fn set_features(&self, track_id: &str, danceability: f64, energy: f64, valence: f64) {
        self.state.lock().unwrap().features.insert(
            track_id.to_string(),
            AudioFeatures {
                danceability,
                energy,
                valence,
            },
        );
    }

    pub fn drop_features(&self, track_id: &str) {
        self.state.lock().unwrap().features.remove(track_id);
    }

    /// Makes the saved tracks endpoint report `total` regardless of what
    /// is actually saved.
    pub fn report_total(&self, total: u64) {
        self.state.lock().unwrap().reported_total = Some(total);
    }

    pub fn add_playlist(&self, id: &str, name: &str, uris: &[String]) {
        self.state.lock().unwrap().playlists.push(FakePlaylist {
            id: id.to_string(),
            name: name.to_string(),
            uris: uris.to_vec(),
        });
    }

    pub fn fail(&self, endpoint: Endpoint) {
        self.state.lock().unwrap().failing = Some(endpoint);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn playlists(&self) -> Vec<FakePlaylist> {
        self.state.lock().unwrap().playlists.clone()
    }

    pub fn playlist(&self, id: &str) -> Option<FakePlaylist> {
        self.playlists().into_iter().find(|p| p.id == id)
    }

    pub fn write_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Replace(..) | Call::Append(..)))
            .count()
    }

    fn record(&self, call: Call, endpoint: Endpoint) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing == Some(endpoint) {
            return Err(RemoteError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                endpoint: format!("{:?}", endpoint),
            });
        }
        Ok(())
    }
}

pub fn uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

fn page<T: Clone>(items: &[T], total: u64, limit: u32, offset: u64) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + limit as usize).min(items.len());
    Page {
        total,
        items: items[start..end].to_vec(),
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn saved_tracks(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Page<SavedTrackItem>, RemoteError> {
        self.record(Call::SavedTracks { limit, offset }, Endpoint::SavedTracks)?;
        let state = self.state.lock().unwrap();
        let total = state.reported_total.unwrap_or(state.saved.len() as u64);
        Ok(page(&state.saved, total, limit, offset))
    }

    async fn playlists(&self, limit: u32, offset: u64) -> Result<Page<PlaylistItem>, RemoteError> {
        self.record(Call::Playlists { limit, offset }, Endpoint::Playlists)?;
        let state = self.state.lock().unwrap();
        let items: Vec<PlaylistItem> = state
            .playlists
            .iter()
            .map(|p| PlaylistItem {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .collect();
        Ok(page(&items, items.len() as u64, limit, offset))
    }

    async fn artists(&self, ids: &[String]) -> Result<Vec<ArtistGenres>, RemoteError> {
        assert!(ids.len() <= 50, "artist batch of {}", ids.len());
        self.record(Call::Artists(ids.len()), Endpoint::Artists)?;
        let state = self.state.lock().unwrap();
        Ok(ids
            .iter()
            .map(|id| ArtistGenres {
                genres: state.genres.get(id).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn audio_features(
        &self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, RemoteError> {
        assert!(ids.len() <= 100, "audio features batch of {}", ids.len());
        self.record(Call::AudioFeatures(ids.len()), Endpoint::AudioFeatures)?;
        let state = self.state.lock().unwrap();
        Ok(ids.iter().map(|id| state.features.get(id).copied()).collect())
    }

    async fn create_playlist(&self, name: &str, public: bool) -> Result<String, RemoteError> {
        assert!(public, "playlists are created public");
        self.record(Call::Create(name.to_string()), Endpoint::Create)?;
        let mut state = self.state.lock().unwrap();
        state.created += 1;
        let id = format!("new-{}", state.created);
        state.playlists.push(FakePlaylist {
            id: id.clone(),
            name: name.to_string(),
            uris: Vec::new(),
        });
        Ok(id)
    }

    async fn replace_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), RemoteError> {
        assert!(uris.len() <= 100, "write batch of {}", uris.len());
        self.record(
            Call::Replace(playlist_id.to_string(), uris.len()),
            Endpoint::Write,
        )?;
        let mut state = self.state.lock().unwrap();
        let playlist = find_playlist(&mut state.playlists, playlist_id)?;
        playlist.uris = uris.to_vec();
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), RemoteError> {
        assert!(uris.len() <= 100, "write batch of {}", uris.len());
        self.record(
            Call::Append(playlist_id.to_string(), uris.len()),
            Endpoint::Write,
        )?;
        let mut state = self.state.lock().unwrap();
        let playlist = find_playlist(&mut state.playlists, playlist_id)?;
        playlist.uris.extend_from_slice(uris);
        Ok(())
    }
}

fn find_playlist<'a>(
    playlists: &'a mut [FakePlaylist],
    playlist_id: &str,
) -> Result<&'a mut FakePlaylist, RemoteError> {
    playlists
        .iter_mut()
        .find(|p| p.id == playlist_id)
        .ok_or_else(|| RemoteError::Status {
            status: StatusCode::NOT_FOUND,
            endpoint: format!("/playlists/{}/tracks", playlist_id),
        })
}
