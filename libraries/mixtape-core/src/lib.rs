//! Mixtape Core
//!
//! Core types, collaborator traits, and error handling for Mixtape.
//!
//! This crate provides the building blocks shared by the playlist engine,
//! the storage backends and the command-line front end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaylistEntry`, `SavedPlaylist`
//! - **Identifiers**: `TrackId`, `EntryId`, `SavedPlaylistId`
//! - **Collaborator Traits**: `RecordStore`, `DurationProbe`, `PlaylistCodec`, `ExportTarget`
//! - **Error Handling**: Unified `MixtapeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::types::{PlaylistEntry, Track};
//! use std::path::PathBuf;
//!
//! let track = Track::from_upload(PathBuf::from("/music/song.mp3"), 184.0);
//! assert_eq!(track.name, "song");
//!
//! // The same track can appear twice, each appearance has its own entry id
//! let first = PlaylistEntry::from_track(&track);
//! let second = PlaylistEntry::from_track(&track);
//! assert_ne!(first.entry_id, second.entry_id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MixtapeError, Result};
pub use storage::{Collection, RecordStore};
pub use traits::{DurationProbe, ExportTarget, PlaylistCodec, Recyclable};

pub use types::{
    EntryId, ExportItem, PlaylistEntry, SavedPlaylist, SavedPlaylistId, SourceRef, Track, TrackId,
};
