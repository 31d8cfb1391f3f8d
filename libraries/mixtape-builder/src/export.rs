//! Export preparation
//!
//! Turns playlist entries into the items handed to a codec or export target.

use mixtape_core::{ExportItem, PlaylistEntry};

/// Format seconds as `HH:MM:SS`
///
/// Zero, negative and non-finite values format as `00:00:00`. Fractional
/// seconds are truncated.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00:00".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Prefix a file name with the export base path
///
/// The separator is `/` when the base path contains one, `\` otherwise. No
/// separator is added if the base path already ends with either.
pub fn resolve_path(base_path: Option<&str>, file_name: &str) -> String {
    let Some(base) = base_path.filter(|base| !base.is_empty()) else {
        return file_name.to_string();
    };

    if base.ends_with('/') || base.ends_with('\\') {
        return format!("{}{}", base, file_name);
    }

    let separator = if base.contains('/') { '/' } else { '\\' };
    format!("{}{}{}", base, separator, file_name)
}

/// Build export items for the given entries
pub fn export_items(entries: &[PlaylistEntry], base_path: Option<&str>) -> Vec<ExportItem> {
    entries
        .iter()
        .map(|entry| ExportItem {
            name: entry.name.clone(),
            file_name: entry.source.file_name.clone(),
            duration_seconds: entry.duration_seconds,
            resolved_path: resolve_path(base_path, &entry.source.file_name),
        })
        .collect()
}
