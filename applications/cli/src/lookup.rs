/// Resolve command-line keys to tracks, entries and saved playlists
use crate::error::{CliError, Result};
use mixtape_core::{EntryId, PlaylistEntry, SavedPlaylist, SavedPlaylistId, Track, TrackId};

/// Shortest id prefix accepted as a key
const MIN_PREFIX_LEN: usize = 4;

/// Find a track by full id, unique id prefix or exact name
pub fn find_track(tracks: &[&Track], key: &str) -> Result<TrackId> {
    find_unique(tracks, key, |track| (track.id.as_str(), track.name.as_str()))
        .map(|track| track.id.clone())
}

/// Find a saved playlist by full id, unique id prefix or exact name
pub fn find_saved_playlist(playlists: &[&SavedPlaylist], key: &str) -> Result<SavedPlaylistId> {
    find_unique(playlists, key, |playlist| {
        (playlist.id.as_str(), playlist.name.as_str())
    })
    .map(|playlist| playlist.id.clone())
}

/// Entry at a 1-based playlist position
pub fn entry_at(entries: &[PlaylistEntry], position: usize) -> Result<EntryId> {
    position
        .checked_sub(1)
        .and_then(|index| entries.get(index))
        .map(|entry| entry.entry_id.clone())
        .ok_or(CliError::InvalidPosition {
            position,
            len: entries.len(),
        })
}

fn find_unique<'a, T, F>(items: &[&'a T], key: &str, fields: F) -> Result<&'a T>
where
    F: Fn(&T) -> (&str, &str),
{
    if let Some(item) = items.iter().find(|item| fields(**item).0 == key) {
        return Ok(*item);
    }

    let mut matches: Vec<&'a T> = items
        .iter()
        .copied()
        .filter(|item| {
            let (id, name) = fields(*item);
            name == key || (key.len() >= MIN_PREFIX_LEN && id.starts_with(key))
        })
        .collect();

    match matches.len() {
        0 => Err(CliError::NotFound(key.to_string())),
        1 => Ok(matches.remove(0)),
        count => Err(CliError::Ambiguous {
            key: key.to_string(),
            count,
        }),
    }
}
