//! Paginated and batched retrieval from the Spotify Web API.
//!
//! Spotify caps how many items a single request may return or accept, so
//! bulk resources are pulled page by page and id lookups go out in batches.
//! Requests are issued one after the other; the next page is not requested
//! before the previous one has arrived.

use std::future::Future;

use crate::{
    error::{RemoteError, SortError},
    spotify::SpotifyApi,
    types::{Page, Playlist, PlaylistItem, SavedTrackItem, Track},
    utils,
};

/// Items per page when paging through saved tracks and playlists.
pub const PAGE_SIZE: u32 = 50;

/// Saved tracks above this count are refused instead of fetched.
pub const MAX_SAVED_TRACKS: u64 = 4000;

pub const ARTIST_BATCH_SIZE: usize = 50;
pub const AUDIO_FEATURES_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The resource holds no items at all.
    Empty,
    /// More items than the caller is willing to page through.
    OverCeiling { total: u64 },
    Items(Vec<T>),
}

/// Pages through a bulk resource.
///
/// A probe request with `limit=1` learns the total first. An empty resource
/// and one above `ceiling` are reported without fetching any pages;
/// otherwise every page is requested in offset order and the items are
/// concatenated. An empty page ends the paging early, since the resource
/// then holds fewer items than its reported total.
pub async fn fetch_all<T, F, Fut>(
    page_size: u32,
    ceiling: Option<u64>,
    mut fetch_page: F,
) -> Result<Fetched<T>, RemoteError>
where
    F: FnMut(u32, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, RemoteError>>,
{
    let total = fetch_page(1, 0).await?.total;

    if total == 0 {
        return Ok(Fetched::Empty);
    }
    if let Some(ceiling) = ceiling {
        if total > ceiling {
            return Ok(Fetched::OverCeiling { total });
        }
    }

    // `total` is whatever the server claims, so it only hints the capacity
    let mut items = Vec::with_capacity(total.min(MAX_SAVED_TRACKS) as usize);
    for offset in utils::page_offsets(total, page_size) {
        let page = fetch_page(page_size, offset).await?;
        if page.items.is_empty() {
            break;
        }
        items.extend(page.items);
    }

    Ok(Fetched::Items(items))
}

/// Looks up `ids` in batches of `batch_size`.
///
/// Responses are matched to ids by position inside each batch, so every
/// batch must answer with exactly one record per id.
pub async fn fetch_by_ids<R, F, Fut>(
    ids: &[String],
    batch_size: usize,
    mut fetch_batch: F,
) -> Result<Vec<R>, RemoteError>
where
    F: FnMut(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<R>, RemoteError>>,
{
    let mut records = Vec::with_capacity(ids.len());

    for batch in utils::chunk(ids, batch_size) {
        let response = fetch_batch(batch.to_vec()).await?;
        if response.len() != batch.len() {
            return Err(RemoteError::Malformed(format!(
                "asked for {} records, got {}",
                batch.len(),
                response.len()
            )));
        }
        records.extend(response);
    }

    Ok(records)
}

/// Fetches every saved track of the current user.
///
/// No saved tracks at all is [`SortError::NoTracks`], more than
/// [`MAX_SAVED_TRACKS`] is [`SortError::TooManyTracks`].
pub async fn saved_tracks<A: SpotifyApi + ?Sized>(api: &A) -> Result<Vec<Track>, SortError> {
    let fetched = fetch_all(PAGE_SIZE, Some(MAX_SAVED_TRACKS), move |limit, offset| {
        api.saved_tracks(limit, offset)
    })
    .await?;

    match fetched {
        Fetched::Empty => Err(SortError::NoTracks),
        Fetched::OverCeiling { total } => Err(SortError::TooManyTracks {
            total,
            limit: MAX_SAVED_TRACKS,
        }),
        Fetched::Items(items) => items
            .into_iter()
            .map(|item| to_track(item).map_err(SortError::from))
            .collect(),
    }
}

/// Fetches every playlist in the current user's library.
pub async fn playlists<A: SpotifyApi + ?Sized>(api: &A) -> Result<Vec<Playlist>, RemoteError> {
    let fetched = fetch_all(PAGE_SIZE, None, move |limit, offset| {
        api.playlists(limit, offset)
    })
    .await?;

    let items: Vec<PlaylistItem> = match fetched {
        Fetched::Items(items) => items,
        Fetched::Empty | Fetched::OverCeiling { .. } => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|p| Playlist {
            playlist_id: p.id,
            playlist_name: p.name,
        })
        .collect())
}

fn to_track(item: SavedTrackItem) -> Result<Track, RemoteError> {
    let track = item.track;
    let artist = track
        .artists
        .into_iter()
        .next()
        .ok_or_else(|| RemoteError::Malformed(format!("track {} has no artists", track.id)))?;

    Ok(Track {
        track_name: track.name,
        artist_name: artist.name,
        track_id: track.id,
        artist_id: artist.id,
        release_date: track.album.release_date,
        release_date_precision: track.album.release_date_precision,
        track_uri: track.uri,
        genre: None,
        decade: None,
        danceability: 0.0,
        energy: 0.0,
        valence: 0.0,
    })
}
