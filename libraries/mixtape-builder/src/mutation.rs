//! Playlist mutation engine
//!
//! Applies a resolved drop to the working playlist. Runs once per drop.

use crate::drag::{DragSubject, DropRequest, DropTarget};
use crate::lifecycle::EntityStore;
use crate::playlist::Playlist;
use mixtape_core::{PlaylistEntry, SavedPlaylist, Track};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of applying a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// An entry moved within the playlist
    Reordered {
        /// Position before the move
        from: usize,
        /// Position after the move
        to: usize,
    },
    /// New entries were spliced in
    Inserted {
        /// Position of the first new entry
        index: usize,
        /// Number of entries inserted
        count: usize,
    },
    /// Nothing changed
    Unchanged,
}

/// Apply a drop to the playlist
pub fn apply_drop(
    request: &DropRequest,
    playlist: &mut Playlist,
    tracks: &EntityStore<Track>,
    library: &EntityStore<SavedPlaylist>,
) -> DropOutcome {
    match (&request.subject, &request.target) {
        (DragSubject::PlaylistReorderItem(active), DropTarget::PlaylistEntry(over)) => {
            if active == over {
                return DropOutcome::Unchanged;
            }
            let (Some(from), Some(to)) = (playlist.position_of(active), playlist.position_of(over))
            else {
                debug!("Reorder target vanished, ignoring drop");
                return DropOutcome::Unchanged;
            };
            playlist.move_entry(from, to);
            DropOutcome::Reordered { from, to }
        }
        (DragSubject::PlaylistReorderItem(_), _) => DropOutcome::Unchanged,
        (subject, DropTarget::PlaylistContainer | DropTarget::PlaylistEntry(_)) => {
            let entries = source_entries(subject, tracks, library);
            if entries.is_empty() {
                return DropOutcome::Unchanged;
            }

            let count = entries.len();
            let index = playlist.insert_many(
                request.insertion_index.unwrap_or(playlist.len()),
                entries,
            );
            DropOutcome::Inserted { index, count }
        }
        _ => DropOutcome::Unchanged,
    }
}

/// Fresh entries for an insert subject
///
/// Batches follow the order of the track collection, not selection order.
/// Unknown and deleted sources are skipped.
fn source_entries(
    subject: &DragSubject,
    tracks: &EntityStore<Track>,
    library: &EntityStore<SavedPlaylist>,
) -> Vec<PlaylistEntry> {
    match subject {
        DragSubject::Track(id) => tracks
            .get_active(id)
            .map(PlaylistEntry::from_track)
            .into_iter()
            .collect(),
        DragSubject::SelectionBatch { members, .. } => tracks
            .active()
            .into_iter()
            .filter(|track| members.contains(&track.id))
            .map(PlaylistEntry::from_track)
            .collect(),
        DragSubject::LibraryPlaylist(id) => library
            .get_active(id)
            .map(|saved| {
                saved
                    .items
                    .iter()
                    .map(|item| PlaylistEntry::from_track(&item.track))
                    .collect()
            })
            .unwrap_or_default(),
        DragSubject::PlaylistReorderItem(_) => Vec::new(),
    }
}
