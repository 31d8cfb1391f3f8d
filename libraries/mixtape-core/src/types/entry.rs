/// Playlist entry domain type
use crate::types::{EntryId, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One appearance of a track in an ordered playlist
///
/// Carries a copy of the track's fields plus an entry id that is unique
/// within the playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Unique id of this appearance
    pub entry_id: EntryId,

    /// Snapshot of the source track
    #[serde(flatten)]
    pub track: Track,
}

impl PlaylistEntry {
    /// Create an entry for a track with a freshly generated entry id
    ///
    /// Never reuses the track id or any existing entry id, so the same track
    /// can be added any number of times.
    pub fn from_track(track: &Track) -> Self {
        let mut track = track.clone();
        track.deleted_at = None;
        Self {
            entry_id: EntryId::generate(),
            track,
        }
    }

    /// Id of the source track
    pub fn track_id(&self) -> &TrackId {
        &self.track.id
    }
}

impl Deref for PlaylistEntry {
    type Target = Track;

    fn deref(&self) -> &Self::Target {
        &self.track
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn entry_keeps_track_fields() {
        let track = Track::from_upload(PathBuf::from("/music/intro.mp3"), 42.5);
        let entry = PlaylistEntry::from_track(&track);

        assert_eq!(entry.track_id(), &track.id);
        assert_eq!(entry.name, "intro");
        assert_eq!(entry.duration_seconds, 42.5);
        assert_ne!(entry.entry_id.as_str(), track.id.as_str());
    }

    #[test]
    fn entry_serializes_flat() {
        let track = Track::from_upload(PathBuf::from("/music/intro.mp3"), 42.5);
        let entry = PlaylistEntry::from_track(&track);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["name"], "intro");
        assert_eq!(json["entry_id"], entry.entry_id.as_str());

        let back: PlaylistEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
