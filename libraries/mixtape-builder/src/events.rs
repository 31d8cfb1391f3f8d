//! Builder events
//!
//! Notices for the UI layer. Events are queued by the builder and drained
//! with `PlaylistBuilder::drain_events`:
//! - Collection changes (tracks, working playlist, library)
//! - Insertion point reveal/hide during a drag
//! - Import results
//! - Recoverable failures (persistence, duration probing)

use mixtape_core::Collection;
use serde::{Deserialize, Serialize};

/// Events emitted by the playlist builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuilderEvent {
    /// Tracks added, deleted, restored or purged
    TracksChanged {
        /// Tracks outside the recycle bin
        active: usize,
        /// Tracks in the recycle bin
        deleted: usize,
    },

    /// Working playlist changed (entries added/removed/reordered, renamed)
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Saved playlists added, renamed, deleted, restored or purged
    LibraryChanged {
        /// Playlists outside the recycle bin
        active: usize,
        /// Playlists in the recycle bin
        deleted: usize,
    },

    /// Insertion point opened or closed during a drag
    InsertionIndexChanged {
        /// Position of the gap, `None` when hidden
        index: Option<usize>,
    },

    /// Playlist file import finished
    ImportCompleted {
        /// File names that matched an uploaded track
        matched: usize,
        /// File names with no matching track
        unmatched: usize,
    },

    /// A snapshot could not be written; in-memory state is kept
    PersistenceWriteFailed {
        /// Collection that failed to save
        collection: Collection,
        /// Error message
        message: String,
    },

    /// Duration could not be read; the track keeps a zero duration
    DurationUnavailable {
        /// File that could not be probed
        file_name: String,
    },
}
