//! Mixtape Metadata
//!
//! Duration probing for uploaded audio files.
//!
//! The playlist engine only needs one fact about an audio file: how long it
//! plays. `LoftyDurationProbe` reads it from the file's audio properties
//! (MP3, FLAC, OGG, WAV, AAC, OPUS).
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_core::DurationProbe;
//! use mixtape_metadata::LoftyDurationProbe;
//! use std::path::Path;
//!
//! let probe = LoftyDurationProbe::new();
//! // Unreadable files fall back to a zero duration
//! let seconds = probe.probe(Path::new("/music/song.mp3")).unwrap_or(0.0);
//! println!("{seconds:.1}s");
//! ```

mod error;
mod probe;

pub use error::{MetadataError, Result};
pub use probe::LoftyDurationProbe;
