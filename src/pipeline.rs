//! The three sort runs behind Vibester's pages.
//!
//! Every run starts from scratch: saved tracks are fetched, enriched with
//! genre, decade and audio features, grouped, and written out as playlists.
//! Nothing carries over between runs. The first failing remote call ends the
//! run; playlists written before it stay as they are.

use std::fmt;

use crate::{
    classifier,
    error::{RemoteError, SortError},
    fetcher::{self, ARTIST_BATCH_SIZE, AUDIO_FEATURES_BATCH_SIZE},
    info,
    reconciler::{self, group_by},
    spotify::SpotifyApi,
    success,
    types::{CustomCriteria, Track},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Fetching,
    Enriching,
    Grouping,
    Reconciling,
    Done,
    NoData,
    TooManyTracks,
}

impl RunState {
    /// Whether a run in this state may move on to `next`.
    ///
    /// Runs go forward one step at a time. Only `Fetching` may stop early,
    /// at `NoData` or `TooManyTracks`.
    pub fn can_advance_to(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Fetching, RunState::Enriching)
                | (RunState::Fetching, RunState::NoData)
                | (RunState::Fetching, RunState::TooManyTracks)
                | (RunState::Enriching, RunState::Grouping)
                | (RunState::Grouping, RunState::Reconciling)
                | (RunState::Reconciling, RunState::Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Done | RunState::NoData | RunState::TooManyTracks
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Fetching => "fetching",
            RunState::Enriching => "enriching",
            RunState::Grouping => "grouping",
            RunState::Reconciling => "reconciling",
            RunState::Done => "done",
            RunState::NoData => "no data",
            RunState::TooManyTracks => "too many tracks",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKind {
    Genre,
    Decade,
    Custom,
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKind::Genre => "genre",
            SortKind::Decade => "decade",
            SortKind::Custom => "custom",
        })
    }
}

struct Run {
    kind: SortKind,
    state: RunState,
}

impl Run {
    fn start(kind: SortKind) -> Self {
        info!("[{} sort] {}", kind, RunState::Fetching);
        Run {
            kind,
            state: RunState::Fetching,
        }
    }

    fn advance(&mut self, state: RunState) {
        debug_assert!(
            self.state.can_advance_to(state),
            "{} -> {}",
            self.state,
            state
        );
        self.state = state;
        match state {
            RunState::Done => success!("[{} sort] {}", self.kind, state),
            s if s.is_terminal() => warning!("[{} sort] {}", self.kind, s),
            _ => info!("[{} sort] {}", self.kind, state),
        }
    }

    /// Fetches and enriches the saved tracks, ending the run early when
    /// there are none or too many.
    async fn load<A: SpotifyApi + ?Sized>(&mut self, api: &A) -> Result<Vec<Track>, SortError> {
        let fetched = fetcher::saved_tracks(api).await;
        let mut tracks = match fetched {
            Ok(tracks) => tracks,
            Err(SortError::NoTracks) => {
                self.advance(RunState::NoData);
                return Err(SortError::NoTracks);
            }
            Err(err @ SortError::TooManyTracks { .. }) => {
                self.advance(RunState::TooManyTracks);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        self.advance(RunState::Enriching);
        enrich(api, &mut tracks).await?;
        Ok(tracks)
    }
}

/// Attaches genre, decade and audio features to every track.
///
/// Artist genres are looked up in batches of [`ARTIST_BATCH_SIZE`], audio
/// features in batches of [`AUDIO_FEATURES_BATCH_SIZE`].
pub async fn enrich<A: SpotifyApi + ?Sized>(
    api: &A,
    tracks: &mut [Track],
) -> Result<(), RemoteError> {
    let artist_ids: Vec<String> = tracks.iter().map(|t| t.artist_id.clone()).collect();
    let artists = fetcher::fetch_by_ids(&artist_ids, ARTIST_BATCH_SIZE, move |ids| async move {
        api.artists(&ids).await
    })
    .await?;

    let track_ids: Vec<String> = tracks.iter().map(|t| t.track_id.clone()).collect();
    let features = fetcher::fetch_by_ids(
        &track_ids,
        AUDIO_FEATURES_BATCH_SIZE,
        move |ids| async move { api.audio_features(&ids).await },
    )
    .await?;

    for ((track, artist), features) in tracks.iter_mut().zip(artists).zip(features) {
        let features = features.ok_or_else(|| {
            RemoteError::Malformed(format!("no audio features for track {}", track.track_id))
        })?;

        track.genre = classifier::genre_of(&artist.genres);
        track.decade = classifier::decade_of(&track.release_date, track.release_date_precision);
        track.danceability = features.danceability;
        track.energy = features.energy;
        track.valence = features.valence;
    }

    Ok(())
}

/// Sorts the saved tracks into one playlist per broad genre.
///
/// Tracks whose artist matches no known genre end up in no playlist.
pub async fn run_genre_sort<A: SpotifyApi + ?Sized>(api: &A) -> Result<Vec<String>, SortError> {
    let mut run = Run::start(SortKind::Genre);
    let tracks = run.load(api).await?;

    run.advance(RunState::Grouping);
    let groups = group_by(&tracks, |t| t.genre);

    run.advance(RunState::Reconciling);
    let existing = fetcher::playlists(api).await?;
    let playlist_ids = reconciler::reconcile(api, &groups, &existing).await?;

    run.advance(RunState::Done);
    Ok(playlist_ids)
}

/// Sorts the saved tracks into one playlist per release decade.
pub async fn run_decade_sort<A: SpotifyApi + ?Sized>(api: &A) -> Result<Vec<String>, SortError> {
    let mut run = Run::start(SortKind::Decade);
    let tracks = run.load(api).await?;

    run.advance(RunState::Grouping);
    let groups = group_by(&tracks, |t| t.decade);

    run.advance(RunState::Reconciling);
    let existing = fetcher::playlists(api).await?;
    let playlist_ids = reconciler::reconcile(api, &groups, &existing).await?;

    run.advance(RunState::Done);
    Ok(playlist_ids)
}

/// Creates a new playlist of the saved tracks matching `criteria`.
pub async fn run_custom_sort<A: SpotifyApi + ?Sized>(
    api: &A,
    criteria: &CustomCriteria,
) -> Result<String, SortError> {
    let mut run = Run::start(SortKind::Custom);
    let tracks = run.load(api).await?;

    run.advance(RunState::Grouping);
    let uris: Vec<String> = tracks
        .iter()
        .filter(|t| classifier::matches_custom(t, criteria))
        .map(|t| t.track_uri.clone())
        .collect();

    run.advance(RunState::Reconciling);
    let playlist_id = reconciler::create_custom(api, criteria, &uris).await?;

    run.advance(RunState::Done);
    Ok(playlist_id)
}
