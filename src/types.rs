use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDatePrecision {
    Year,
    Month,
    Day,
    /// Any precision Spotify may add later. Dates with it are read like
    /// month and day dates.
    #[serde(other)]
    Other,
}

/// A saved track as the sort pipeline sees it.
///
/// `genre`, `decade` and the audio features are empty until the track has
/// been enriched.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_name: String,
    pub artist_name: String,
    pub track_id: String,
    pub artist_id: String,
    pub release_date: String,
    pub release_date_precision: ReleaseDatePrecision,
    pub track_uri: String,
    pub genre: Option<&'static str>,
    pub decade: Option<&'static str>,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub playlist_id: String,
    pub playlist_name: String,
}

/// Tracks of one category, by URI, in saved-track order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub label: String,
    pub uris: Vec<String>,
}

pub const DEFAULT_CUSTOM_PLAYLIST_NAME: &str = "Vibester Custom Playlist";

/// User supplied audio feature ranges, in percent (0-100).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomCriteria {
    #[serde(deserialize_with = "percent_range")]
    pub energy: [f64; 2],
    #[serde(deserialize_with = "percent_range")]
    pub danceability: [f64; 2],
    #[serde(deserialize_with = "percent_range")]
    pub valence: [f64; 2],
    #[serde(default)]
    pub name: String,
}

impl CustomCriteria {
    pub fn playlist_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_CUSTOM_PLAYLIST_NAME
        } else {
            &self.name
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Percent {
    Number(f64),
    Text(String),
}

// form inputs post their values as strings
fn percent_range<'de, D>(deserializer: D) -> Result<[f64; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let raw: [Percent; 2] = Deserialize::deserialize(deserializer)?;
    let mut range = [0.0; 2];
    for (slot, value) in range.iter_mut().zip(raw) {
        *slot = match value {
            Percent::Number(n) => n,
            Percent::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
        };
    }
    Ok(range)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrackItem {
    pub track: RemoteTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub release_date: String,
    pub release_date_precision: ReleaseDatePrecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralArtistsResponse {
    pub artists: Vec<ArtistGenres>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistGenres {
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRequest {
    pub uris: Vec<String>,
}
