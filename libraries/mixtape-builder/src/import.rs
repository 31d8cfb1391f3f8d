//! Playlist file import matching

use mixtape_core::{PlaylistEntry, Track};
use serde::{Deserialize, Serialize};

/// Outcome of matching imported file names
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportMatch {
    /// New entries for the matched tracks, in file order
    pub entries: Vec<PlaylistEntry>,
    /// Number of names that matched
    pub matched: usize,
    /// Number of names with no matching track
    pub unmatched: usize,
}

/// Summary reported after an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Entries appended to the playlist
    pub matched: usize,
    /// Names that were skipped
    pub unmatched: usize,
}

/// Match file names against active tracks
///
/// Each name maps to the first track whose display name, origin path or file
/// name equals it exactly.
pub fn match_file_names(file_names: &[String], tracks: &[&Track]) -> ImportMatch {
    let mut result = ImportMatch::default();

    for file_name in file_names {
        match tracks.iter().find(|track| track.matches_file_name(file_name)) {
            Some(track) => {
                result.entries.push(PlaylistEntry::from_track(track));
                result.matched += 1;
            }
            None => result.unmatched += 1,
        }
    }

    result
}
