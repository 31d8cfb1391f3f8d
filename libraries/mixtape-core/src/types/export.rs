/// Export item type
use serde::{Deserialize, Serialize};

/// One line of an exported playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportItem {
    /// Display name written next to the duration
    pub name: String,

    /// Audio file name
    pub file_name: String,

    /// Duration in seconds, 0 when unknown
    pub duration_seconds: f64,

    /// File name prefixed with the export base path, if any
    pub resolved_path: String,
}
