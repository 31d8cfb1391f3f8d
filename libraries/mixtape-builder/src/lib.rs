//! Mixtape - Playlist Builder
//!
//! The engine behind building a playlist from uploaded tracks.
//!
//! This crate provides:
//! - Soft-delete lifecycle for tracks and saved playlists (recycle bin, retention sweep)
//! - Multi-select for tracks and saved playlists (tri-state select all)
//! - Drag sessions with a delayed insertion-point reveal
//! - Drop resolution (reorder vs. insert, selection batches, whole playlists)
//! - Saved playlist library with name-collision handling
//! - Playlist import matching and export preparation
//!
//! # Architecture
//!
//! `mixtape-builder` never touches files or databases directly. Storage,
//! duration probing, playlist file encoding and export are collaborators
//! defined in `mixtape-core` and passed in by the application.
//!
//! # Example: Building a playlist
//!
//! ```rust
//! use mixtape_builder::{BuilderConfig, PlaylistBuilder};
//! use mixtape_core::Track;
//! use std::path::PathBuf;
//!
//! let mut builder = PlaylistBuilder::new(BuilderConfig::default());
//! let ids = builder.add_tracks(vec![
//!     Track::from_upload(PathBuf::from("/music/intro.mp3"), 95.0),
//!     Track::from_upload(PathBuf::from("/music/outro.mp3"), 130.0),
//! ]);
//!
//! builder.add_to_playlist(&ids[1]).unwrap();
//! builder.add_to_playlist(&ids[0]).unwrap();
//! assert_eq!(builder.formatted_duration(), "00:03:45");
//!
//! // Deleting a track removes it from the playlist too
//! builder.delete_tracks(&ids[..1]);
//! assert_eq!(builder.playlist().len(), 1);
//! ```
//!
//! # Example: Reordering with drag and drop
//!
//! ```rust
//! use mixtape_builder::{BuilderConfig, DragGrab, DropOutcome, DropTarget, PlaylistBuilder};
//! use mixtape_core::Track;
//! use std::path::PathBuf;
//!
//! let mut builder = PlaylistBuilder::new(BuilderConfig::default());
//! let ids = builder.add_tracks(
//!     ["a", "b", "c"]
//!         .iter()
//!         .map(|n| Track::from_upload(PathBuf::from(format!("{}.mp3", n)), 60.0))
//!         .collect(),
//! );
//! for id in &ids {
//!     builder.add_to_playlist(id).unwrap();
//! }
//!
//! let first = builder.playlist().entries()[0].entry_id.clone();
//! let last = builder.playlist().entries()[2].entry_id.clone();
//!
//! builder.drag_start(DragGrab::PlaylistEntry(first)).unwrap();
//! let outcome = builder.drag_end(DropTarget::PlaylistEntry(last));
//! assert_eq!(outcome, DropOutcome::Reordered { from: 0, to: 2 });
//! ```

mod config;
mod drag;
mod error;
mod events;
pub mod export;
mod import;
mod library;
mod lifecycle;
mod manager;
mod mutation;
mod persistence;
mod playlist;
mod selection;
mod timer;

// Public exports
pub use config::BuilderConfig;
pub use drag::{
    DragGrab, DragSession, DragSubject, DropRequest, DropTarget, RevealTicket, TimerCommand,
};
pub use error::{BuilderError, Result};
pub use events::BuilderEvent;
pub use export::format_time;
pub use import::{match_file_names, ImportMatch, ImportReport};
pub use library::{ConflictResolution, Library, PendingSave, SaveOutcome};
pub use lifecycle::EntityStore;
pub use manager::PlaylistBuilder;
pub use mutation::{apply_drop, DropOutcome};
pub use persistence::Persister;
pub use playlist::Playlist;
pub use selection::Selection;
pub use timer::RevealScheduler;
