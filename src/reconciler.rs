//! Writes category groupings out as playlists.
//!
//! A category whose label matches one of the user's playlist names has that
//! playlist's contents overwritten; any other category gets a new public
//! playlist named after it. Playlist writes go out in batches of at most
//! [`PLAYLIST_WRITE_BATCH_SIZE`] URIs.

use std::collections::HashMap;

use crate::{
    error::RemoteError,
    info,
    spotify::SpotifyApi,
    types::{CategoryGroup, CustomCriteria, Playlist, Track},
    utils,
};

pub const PLAYLIST_WRITE_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The first batch replaces whatever the playlist held, the rest append.
    Overwrite,
    /// Every batch appends, for playlists that start out empty.
    Append,
}

/// Groups track URIs by the label `key` assigns them.
///
/// Groups come out in the order their label is first seen and keep the
/// tracks in their original order. Tracks without a label are left out.
pub fn group_by<F>(tracks: &[Track], key: F) -> Vec<CategoryGroup>
where
    F: Fn(&Track) -> Option<&str>,
{
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for track in tracks {
        let Some(label) = key(track) else {
            continue;
        };

        let slot = *index.entry(label.to_string()).or_insert_with(|| {
            groups.push(CategoryGroup {
                label: label.to_string(),
                uris: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].uris.push(track.track_uri.clone());
    }

    groups
}

/// Makes one playlist per group hold exactly the group's tracks.
///
/// Returns the id of the playlist used for each group, in group order.
pub async fn reconcile<A: SpotifyApi + ?Sized>(
    api: &A,
    groups: &[CategoryGroup],
    existing: &[Playlist],
) -> Result<Vec<String>, RemoteError> {
    let mut playlist_ids = Vec::with_capacity(groups.len());

    for group in groups {
        let found = existing.iter().find(|p| p.playlist_name == group.label);

        let playlist_id = match found {
            Some(playlist) => {
                info!(
                    "Overwriting playlist {} with {} tracks",
                    group.label,
                    group.uris.len()
                );
                write_tracks(api, &playlist.playlist_id, &group.uris, WriteMode::Overwrite)
                    .await?;
                playlist.playlist_id.clone()
            }
            None => {
                info!(
                    "Creating playlist {} with {} tracks",
                    group.label,
                    group.uris.len()
                );
                let playlist_id = api.create_playlist(&group.label, true).await?;
                write_tracks(api, &playlist_id, &group.uris, WriteMode::Append).await?;
                playlist_id
            }
        };

        playlist_ids.push(playlist_id);
    }

    Ok(playlist_ids)
}

/// Writes `uris` to a playlist in batches of [`PLAYLIST_WRITE_BATCH_SIZE`].
pub async fn write_tracks<A: SpotifyApi + ?Sized>(
    api: &A,
    playlist_id: &str,
    uris: &[String],
    mode: WriteMode,
) -> Result<(), RemoteError> {
    for (n, batch) in utils::chunk(uris, PLAYLIST_WRITE_BATCH_SIZE)
        .into_iter()
        .enumerate()
    {
        if n == 0 && mode == WriteMode::Overwrite {
            api.replace_tracks(playlist_id, batch).await?;
        } else {
            api.append_tracks(playlist_id, batch).await?;
        }
    }

    Ok(())
}

/// Creates a fresh playlist for a custom sort and fills it with `uris`.
///
/// Custom playlists are never reused, every run creates a new one even if a
/// playlist with the same name exists. The playlist is created even when no
/// track matched.
pub async fn create_custom<A: SpotifyApi + ?Sized>(
    api: &A,
    criteria: &CustomCriteria,
    uris: &[String],
) -> Result<String, RemoteError> {
    let name = criteria.playlist_name();
    info!("Creating custom playlist {} with {} tracks", name, uris.len());

    let playlist_id = api.create_playlist(name, true).await?;
    write_tracks(api, &playlist_id, uris, WriteMode::Append).await?;
    Ok(playlist_id)
}
