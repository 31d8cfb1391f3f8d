/// Core error types for Mixtape
use thiserror::Error;

/// Result type alias using `MixtapeError`
pub type Result<T> = std::result::Result<T, MixtapeError>;

/// Core error type for Mixtape
#[derive(Error, Debug)]
pub enum MixtapeError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audio metadata could not be read, callers fall back to a zero duration
    #[error("Duration unavailable: {0}")]
    DurationUnavailable(String),

    /// A snapshot could not be written to the record store
    #[error("Failed to persist {collection}: {reason}")]
    PersistenceWriteFailed { collection: String, reason: String },

    /// A saved playlist with this name already exists
    #[error("A playlist named \"{0}\" already exists")]
    NameCollision(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Export target errors
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MixtapeError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a duration unavailable error
    pub fn duration_unavailable(msg: impl Into<String>) -> Self {
        Self::DurationUnavailable(msg.into())
    }

    /// Create a persistence write failure
    pub fn persistence(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PersistenceWriteFailed {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_error_message() {
        let err = MixtapeError::persistence("tracks", "disk full");
        assert_eq!(err.to_string(), "Failed to persist tracks: disk full");
    }

    #[test]
    fn name_collision_message() {
        let err = MixtapeError::NameCollision("Road Trip".to_string());
        assert_eq!(
            err.to_string(),
            "A playlist named \"Road Trip\" already exists"
        );
    }
}
