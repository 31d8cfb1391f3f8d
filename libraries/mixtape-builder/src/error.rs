//! Error types for playlist building

use mixtape_core::{EntryId, MixtapeError, SavedPlaylistId, TrackId};
use thiserror::Error;

/// Playlist builder errors
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A drag session is already running
    #[error("A drag session is already in progress")]
    DragInProgress,

    /// A saved playlist with this name already exists
    #[error("A playlist named \"{0}\" already exists")]
    NameCollision(String),

    /// Names must contain something other than whitespace
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// Track is unknown or in the recycle bin
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Saved playlist is unknown or in the recycle bin
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(SavedPlaylistId),

    /// Entry is not part of the working playlist
    #[error("Playlist entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Error raised by a collaborator
    #[error(transparent)]
    Core(#[from] MixtapeError),
}

/// Result type for builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;

impl From<BuilderError> for MixtapeError {
    fn from(err: BuilderError) -> Self {
        match err {
            BuilderError::Core(inner) => inner,
            BuilderError::NameCollision(name) => MixtapeError::NameCollision(name),
            BuilderError::TrackNotFound(id) => MixtapeError::not_found("Track", id.to_string()),
            BuilderError::PlaylistNotFound(id) => {
                MixtapeError::not_found("Playlist", id.to_string())
            }
            BuilderError::EntryNotFound(id) => {
                MixtapeError::not_found("Playlist entry", id.to_string())
            }
            other => MixtapeError::invalid_input(other.to_string()),
        }
    }
}
