//! Working playlist
//!
//! The ordered list being built. Entries carry their own ids so the same
//! track can appear more than once.

use crate::error::{BuilderError, Result};
use mixtape_core::{EntryId, PlaylistEntry, TrackId};
use std::collections::HashSet;
use tracing::debug;

/// Named, ordered list of playlist entries
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    name: String,
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Create a playlist from existing entries
    pub fn with_entries(name: impl Into<String>, entries: Vec<PlaylistEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Playlist name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the playlist
    ///
    /// The name is trimmed; a blank name is refused.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(BuilderError::InvalidName(name.to_string()));
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    /// Entries in order
    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current position of an entry
    pub fn position_of(&self, entry_id: &EntryId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| &entry.entry_id == entry_id)
    }

    /// Splice entries in at `index`
    ///
    /// An index past the end appends. Returns the index actually used.
    pub fn insert_many(&mut self, index: usize, entries: Vec<PlaylistEntry>) -> usize {
        let at = if index > self.entries.len() {
            debug!(
                index,
                len = self.entries.len(),
                "Insertion index beyond playlist end, appending"
            );
            self.entries.len()
        } else {
            index
        };

        self.entries.splice(at..at, entries);
        at
    }

    /// Append entries
    pub fn append(&mut self, entries: Vec<PlaylistEntry>) -> usize {
        self.insert_many(self.entries.len(), entries)
    }

    /// Move the entry at `from` to position `to`
    ///
    /// Both indices refer to positions before the move. Out-of-range indices
    /// leave the playlist unchanged and return false.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        true
    }

    /// Remove one entry
    pub fn remove(&mut self, entry_id: &EntryId) -> Option<PlaylistEntry> {
        let index = self.position_of(entry_id)?;
        Some(self.entries.remove(index))
    }

    /// Remove every entry whose source track is in `track_ids`
    ///
    /// Returns the number of entries removed.
    pub fn remove_tracks(&mut self, track_ids: &HashSet<TrackId>) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !track_ids.contains(entry.track_id()));
        before - self.entries.len()
    }

    /// Replace name and contents
    pub fn replace(&mut self, name: impl Into<String>, entries: Vec<PlaylistEntry>) {
        self.name = name.into();
        self.entries = entries;
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Mutable access to entries (duration repair at load)
    pub(crate) fn entries_mut(&mut self) -> &mut [PlaylistEntry] {
        &mut self.entries
    }

    /// Sum of entry durations in seconds
    pub fn total_duration(&self) -> f64 {
        self.entries.iter().map(|entry| entry.duration_seconds).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixtape_core::Track;
    use std::path::PathBuf;

    fn create_test_entry(name: &str) -> PlaylistEntry {
        let track = Track::from_upload(PathBuf::from(format!("{}.mp3", name)), 10.0);
        PlaylistEntry::from_track(&track)
    }

    fn names(playlist: &Playlist) -> Vec<String> {
        playlist.entries().iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn move_entry_is_array_move() {
        let mut playlist = Playlist::with_entries(
            "Test",
            ["A", "B", "C", "D"].iter().map(|n| create_test_entry(n)).collect(),
        );

        assert!(playlist.move_entry(1, 3));
        assert_eq!(names(&playlist), vec!["A", "C", "D", "B"]);

        assert!(playlist.move_entry(3, 0));
        assert_eq!(names(&playlist), vec!["B", "A", "C", "D"]);

        assert!(!playlist.move_entry(0, 9));
    }

    #[test]
    fn insert_many_beyond_end_appends() {
        let mut playlist = Playlist::with_entries("Test", vec![create_test_entry("A")]);
        let at = playlist.insert_many(7, vec![create_test_entry("B"), create_test_entry("C")]);

        assert_eq!(at, 1);
        assert_eq!(names(&playlist), vec!["A", "B", "C"]);
    }

    #[test]
    fn insert_many_splices_in_order() {
        let mut playlist = Playlist::with_entries(
            "Test",
            vec![create_test_entry("A"), create_test_entry("D")],
        );
        playlist.insert_many(1, vec![create_test_entry("B"), create_test_entry("C")]);
        assert_eq!(names(&playlist), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn remove_tracks_drops_every_appearance() {
        let track = Track::from_upload(PathBuf::from("loop.mp3"), 5.0);
        let mut playlist = Playlist::with_entries(
            "Test",
            vec![
                PlaylistEntry::from_track(&track),
                create_test_entry("other"),
                PlaylistEntry::from_track(&track),
            ],
        );

        let removed = playlist.remove_tracks(&HashSet::from([track.id.clone()]));
        assert_eq!(removed, 2);
        assert_eq!(names(&playlist), vec!["other"]);
    }

    #[test]
    fn blank_name_is_refused() {
        let mut playlist = Playlist::new("My Playlist");
        assert!(matches!(
            playlist.set_name("   "),
            Err(BuilderError::InvalidName(_))
        ));
        playlist.set_name("  Road Trip ").unwrap();
        assert_eq!(playlist.name(), "Road Trip");
    }

    #[test]
    fn total_duration_sums_entries() {
        let playlist = Playlist::with_entries(
            "Test",
            vec![create_test_entry("A"), create_test_entry("B")],
        );
        assert_eq!(playlist.total_duration(), 20.0);
    }
}
