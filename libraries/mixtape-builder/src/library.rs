//! Saved playlist library
//!
//! Saved playlists live in a recyclable collection, newest first. Names are
//! unique among playlists outside the recycle bin; saving under a taken name
//! hands back a [`PendingSave`] so the caller can decide what to do.

use crate::error::{BuilderError, Result};
use crate::lifecycle::EntityStore;
use chrono::{DateTime, Utc};
use mixtape_core::{PlaylistEntry, SavedPlaylist, SavedPlaylistId};
use tracing::info;

/// Save waiting for a collision decision
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    /// Requested name
    pub name: String,
    /// Items to save
    pub items: Vec<PlaylistEntry>,
    /// Playlist currently holding the name
    pub existing: SavedPlaylistId,
}

/// Result of a save request
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Saved under the requested name
    Saved(SavedPlaylistId),
    /// The name is taken; nothing was changed
    NameCollision(PendingSave),
}

/// Decision for a pending save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Replace the existing playlist's items, keeping its id and creation time
    Overwrite,
    /// Save under the first free ` (n)` suffixed name
    SaveAsNew,
}

/// Library of saved playlists
#[derive(Debug, Clone, Default)]
pub struct Library {
    playlists: EntityStore<SavedPlaylist>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library from loaded playlists
    pub fn from_vec(playlists: Vec<SavedPlaylist>) -> Self {
        Self {
            playlists: EntityStore::from_vec(playlists),
        }
    }

    /// Underlying recyclable collection
    pub fn store(&self) -> &EntityStore<SavedPlaylist> {
        &self.playlists
    }

    /// Mutable access to the underlying collection
    pub fn store_mut(&mut self) -> &mut EntityStore<SavedPlaylist> {
        &mut self.playlists
    }

    /// Active playlist with this exact name
    pub fn find_by_name(&self, name: &str) -> Option<&SavedPlaylist> {
        self.playlists
            .items()
            .iter()
            .find(|playlist| !playlist.is_deleted() && playlist.name == name)
    }

    /// Save items under a name
    ///
    /// Nothing changes when an active playlist already has the name.
    pub fn save(
        &mut self,
        name: &str,
        items: Vec<PlaylistEntry>,
        now: DateTime<Utc>,
    ) -> SaveOutcome {
        if let Some(existing) = self.find_by_name(name) {
            return SaveOutcome::NameCollision(PendingSave {
                name: name.to_string(),
                items,
                existing: existing.id.clone(),
            });
        }

        SaveOutcome::Saved(self.insert(name.to_string(), items, now))
    }

    /// Complete a save that hit a name collision
    ///
    /// Overwriting a playlist that has since been deleted or purged saves a
    /// new one instead.
    pub fn resolve(
        &mut self,
        pending: PendingSave,
        resolution: ConflictResolution,
        now: DateTime<Utc>,
    ) -> SavedPlaylistId {
        match resolution {
            ConflictResolution::Overwrite => {
                if let Some(existing) = self
                    .playlists
                    .get_mut(&pending.existing)
                    .filter(|playlist| !playlist.is_deleted())
                {
                    existing.items = pending.items;
                    existing.updated_at = now;
                    info!(id = %existing.id, name = %existing.name, "Overwrote saved playlist");
                    return existing.id.clone();
                }
                let name = self.unique_name(&pending.name);
                self.insert(name, pending.items, now)
            }
            ConflictResolution::SaveAsNew => {
                let name = self.unique_name(&pending.name);
                self.insert(name, pending.items, now)
            }
        }
    }

    /// First name of the form `base`, `base (1)`, `base (2)`, ... not in use
    pub fn unique_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        let mut counter = 1;
        while self.find_by_name(&name).is_some() {
            name = format!("{} ({})", base, counter);
            counter += 1;
        }
        name
    }

    /// Rename a saved playlist
    ///
    /// # Errors
    /// `InvalidName` for a blank name, `PlaylistNotFound` for an unknown or
    /// deleted id, `NameCollision` if another active playlist has the name.
    pub fn rename(&mut self, id: &SavedPlaylistId, name: &str, now: DateTime<Utc>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BuilderError::InvalidName(name.to_string()));
        }
        if self
            .find_by_name(name)
            .is_some_and(|other| &other.id != id)
        {
            return Err(BuilderError::NameCollision(name.to_string()));
        }

        let playlist = self
            .playlists
            .get_mut(id)
            .filter(|playlist| !playlist.is_deleted())
            .ok_or_else(|| BuilderError::PlaylistNotFound(id.clone()))?;
        playlist.name = name.to_string();
        playlist.updated_at = now;
        Ok(())
    }

    fn insert(
        &mut self,
        name: String,
        items: Vec<PlaylistEntry>,
        now: DateTime<Utc>,
    ) -> SavedPlaylistId {
        let playlist = SavedPlaylist::new(name, items, now);
        let id = playlist.id.clone();
        info!(id = %id, name = %playlist.name, items = playlist.items.len(), "Saved playlist");
        self.playlists.insert_front(playlist);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixtape_core::Track;
    use std::path::PathBuf;

    fn create_test_items(count: usize) -> Vec<PlaylistEntry> {
        (0..count)
            .map(|i| {
                let track = Track::from_upload(PathBuf::from(format!("{}.mp3", i)), 10.0);
                PlaylistEntry::from_track(&track)
            })
            .collect()
    }

    fn saved_id(outcome: SaveOutcome) -> SavedPlaylistId {
        match outcome {
            SaveOutcome::Saved(id) => id,
            SaveOutcome::NameCollision(pending) => panic!("unexpected collision: {:?}", pending),
        }
    }

    #[test]
    fn save_puts_newest_first() {
        let mut library = Library::new();
        let now = Utc::now();
        saved_id(library.save("First", create_test_items(1), now));
        saved_id(library.save("Second", create_test_items(2), now));

        let names: Vec<_> = library.store().active().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn collision_changes_nothing() {
        let mut library = Library::new();
        let now = Utc::now();
        let existing = saved_id(library.save("Mix", create_test_items(1), now));

        match library.save("Mix", create_test_items(3), now) {
            SaveOutcome::NameCollision(pending) => {
                assert_eq!(pending.existing, existing);
                assert_eq!(pending.items.len(), 3);
            }
            SaveOutcome::Saved(_) => panic!("expected collision"),
        }
        assert_eq!(library.store().len(), 1);
        assert_eq!(library.store().get(&existing).unwrap().items.len(), 1);
    }

    #[test]
    fn overwrite_keeps_id_and_created_at() {
        let mut library = Library::new();
        let created = Utc::now() - chrono::Duration::days(2);
        let existing = saved_id(library.save("Mix", create_test_items(1), created));

        let SaveOutcome::NameCollision(pending) = library.save("Mix", create_test_items(4), Utc::now())
        else {
            panic!("expected collision");
        };
        let now = Utc::now();
        let id = library.resolve(pending, ConflictResolution::Overwrite, now);

        let playlist = library.store().get(&id).unwrap();
        assert_eq!(id, existing);
        assert_eq!(playlist.items.len(), 4);
        assert_eq!(playlist.created_at, created);
        assert_eq!(playlist.updated_at, now);
        assert_eq!(library.store().len(), 1);
    }

    #[test]
    fn save_as_new_appends_counter() {
        let mut library = Library::new();
        let now = Utc::now();
        saved_id(library.save("Mix", create_test_items(1), now));
        saved_id(library.save("Mix (1)", create_test_items(1), now));

        let SaveOutcome::NameCollision(pending) = library.save("Mix", create_test_items(2), now)
        else {
            panic!("expected collision");
        };
        let id = library.resolve(pending, ConflictResolution::SaveAsNew, now);
        assert_eq!(library.store().get(&id).unwrap().name, "Mix (2)");
    }

    #[test]
    fn deleted_playlist_frees_its_name() {
        let mut library = Library::new();
        let now = Utc::now();
        let old = saved_id(library.save("Mix", create_test_items(1), now));
        library.store_mut().soft_delete(&[old], now);

        assert!(matches!(
            library.save("Mix", create_test_items(1), now),
            SaveOutcome::Saved(_)
        ));
    }

    #[test]
    fn rename_refuses_taken_name() {
        let mut library = Library::new();
        let now = Utc::now();
        let first = saved_id(library.save("A", create_test_items(1), now));
        saved_id(library.save("B", create_test_items(1), now));

        assert!(matches!(
            library.rename(&first, "B", now),
            Err(BuilderError::NameCollision(name)) if name == "B"
        ));
        assert!(matches!(
            library.rename(&first, " ", now),
            Err(BuilderError::InvalidName(_))
        ));

        library.rename(&first, "A", now).unwrap();
        library.rename(&first, "C", now).unwrap();
        assert_eq!(library.store().get(&first).unwrap().name, "C");
    }

    #[test]
    fn rename_unknown_playlist_fails() {
        let mut library = Library::new();
        let result = library.rename(&SavedPlaylistId::new("missing"), "X", Utc::now());
        assert!(matches!(result, Err(BuilderError::PlaylistNotFound(_))));
    }
}
