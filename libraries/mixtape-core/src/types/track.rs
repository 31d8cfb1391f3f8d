/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Handle to the audio file behind a track
///
/// The engine never opens the file itself; it only hands this to the
/// duration probe and the export target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Location of the file on disk
    pub path: PathBuf,

    /// File name as uploaded (e.g. `song.mp3`)
    pub file_name: String,
}

impl SourceRef {
    /// Create a source reference from a path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, file_name }
    }
}

/// Uploaded audio track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display name (file name without extension)
    pub name: String,

    /// Audio file handle
    pub source: SourceRef,

    /// Duration in seconds, 0 when unknown
    #[serde(default)]
    pub duration_seconds: f64,

    /// Original path or file name the track was uploaded from
    #[serde(default)]
    pub origin_path: Option<String>,

    /// When the track was moved to the recycle bin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(name: impl Into<String>, source: SourceRef) -> Self {
        Self {
            id: TrackId::generate(),
            name: name.into(),
            source,
            duration_seconds: 0.0,
            origin_path: None,
            deleted_at: None,
        }
    }

    /// Create a track for a freshly uploaded file
    ///
    /// The display name is the file name with its last extension stripped and
    /// the origin path is the uploaded file name.
    pub fn from_upload(path: impl Into<PathBuf>, duration_seconds: f64) -> Self {
        let source = SourceRef::from_path(path);
        let name = display_name(&source.path);
        let origin_path = Some(source.file_name.clone());

        Self {
            id: TrackId::generate(),
            name,
            source,
            duration_seconds: duration_seconds.max(0.0),
            origin_path,
            deleted_at: None,
        }
    }

    /// Whether the track is in the recycle bin
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether an imported file name refers to this track
    ///
    /// Matches exactly on the display name, the origin path, or the file name.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        self.name == file_name
            || self.origin_path.as_deref() == Some(file_name)
            || self.source.file_name == file_name
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
