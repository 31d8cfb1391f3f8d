/// Saved playlist domain type
use crate::types::{PlaylistEntry, SavedPlaylistId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist stored in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlaylist {
    /// Unique playlist identifier
    pub id: SavedPlaylistId,

    /// Playlist name, unique among playlists that are not deleted
    pub name: String,

    /// Ordered entries
    pub items: Vec<PlaylistEntry>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last save or rename
    pub updated_at: DateTime<Utc>,

    /// When the playlist was moved to the recycle bin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SavedPlaylist {
    /// Create a new saved playlist stamped with the given time
    pub fn new(name: impl Into<String>, items: Vec<PlaylistEntry>, now: DateTime<Utc>) -> Self {
        Self {
            id: SavedPlaylistId::generate(),
            name: name.into(),
            items,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the playlist is in the recycle bin
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Sum of item durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.items.iter().map(|item| item.duration_seconds).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Track;
    use std::path::PathBuf;

    #[test]
    fn saved_playlist_creation() {
        let now = Utc::now();
        let track = Track::from_upload(PathBuf::from("a.mp3"), 30.0);
        let items = vec![
            PlaylistEntry::from_track(&track),
            PlaylistEntry::from_track(&track),
        ];
        let playlist = SavedPlaylist::new("Morning", items, now);

        assert_eq!(playlist.name, "Morning");
        assert_eq!(playlist.created_at, playlist.updated_at);
        assert_eq!(playlist.total_duration(), 60.0);
        assert!(!playlist.is_deleted());
    }
}
