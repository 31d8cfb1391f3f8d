//! Mixtape CLI Library
//!
//! Collaborators and helpers behind the `mixtape` binary: configuration,
//! the M3U codec, the directory export target, track/playlist lookup and
//! queueing tracks through the drag engine.
//!
//! This library exposes the components for testing purposes.

pub mod config;
pub mod error;
pub mod export;
pub mod lookup;
pub mod m3u;
pub mod queue;

// Re-export commonly used types for convenience
pub use config::MixtapeConfig;
pub use error::{CliError, Result};
pub use export::{copy_audio_files, DirectoryExport};
pub use m3u::M3uCodec;
pub use queue::queue_tracks;
