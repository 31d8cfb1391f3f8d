/// Core traits for Mixtape
use crate::error::Result;
use crate::types::{ExportItem, SavedPlaylist, SavedPlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use std::hash::Hash;
use std::path::Path;

/// Entity that can be moved to the recycle bin and restored
///
/// Implemented by `Track` and `SavedPlaylist`; the lifecycle manager in the
/// engine only talks to entities through this trait.
pub trait Recyclable {
    /// Identifier type of the entity
    type Id: Clone + Eq + Hash + std::fmt::Debug;

    /// Entity identifier
    fn id(&self) -> &Self::Id;

    /// When the entity was deleted, if it is in the recycle bin
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Set or clear the deletion timestamp
    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>);

    /// Whether the entity is in the recycle bin
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

impl Recyclable for Track {
    type Id = TrackId;

    fn id(&self) -> &TrackId {
        &self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.deleted_at = at;
    }
}

impl Recyclable for SavedPlaylist {
    type Id = SavedPlaylistId;

    fn id(&self) -> &SavedPlaylistId {
        &self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.deleted_at = at;
    }
}

/// Reads the duration of an audio file
///
/// Implementations return `MixtapeError::DurationUnavailable` when the
/// file's metadata cannot be read. Callers treat that as a zero duration.
pub trait DurationProbe: Send + Sync {
    /// Duration of the file in seconds
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or has no readable properties
    fn probe(&self, path: &Path) -> Result<f64>;
}

/// Encodes and decodes playlist files
pub trait PlaylistCodec: Send + Sync {
    /// Render export items as playlist file text
    fn encode(&self, items: &[ExportItem]) -> String;

    /// Extract bare file names from playlist file text
    fn decode(&self, content: &str) -> Vec<String>;
}

/// Destination for an exported playlist
pub trait ExportTarget: Send + Sync {
    /// Write the playlist under the given output file name
    ///
    /// # Errors
    /// Returns an error if the playlist could not be written
    fn export(&self, items: &[ExportItem], file_name: &str) -> Result<()>;
}
