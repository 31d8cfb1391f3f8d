/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No track or playlist matches \"{0}\"")]
    NotFound(String),

    #[error("\"{key}\" is ambiguous, it matches {count} items")]
    Ambiguous { key: String, count: usize },

    #[error("Position {position} is out of range (playlist has {len} entries)")]
    InvalidPosition { position: usize, len: usize },

    #[error(transparent)]
    Builder(#[from] mixtape_builder::BuilderError),

    #[error(transparent)]
    Core(#[from] mixtape_core::MixtapeError),

    #[error("Storage error: {0}")]
    Storage(#[from] mixtape_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
