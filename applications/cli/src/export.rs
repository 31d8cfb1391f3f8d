/// Directory export target - writes playlist files (and optionally audio) to disk
use crate::error::Result;
use crate::m3u::M3uCodec;
use mixtape_core::{ExportItem, ExportTarget, MixtapeError, PlaylistCodec, PlaylistEntry};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct DirectoryExport {
    output_dir: PathBuf,
    codec: M3uCodec,
}

impl DirectoryExport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            codec: M3uCodec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the playlist file will be written to
    pub fn playlist_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(sanitize_file_name(file_name))
    }
}

impl ExportTarget for DirectoryExport {
    fn export(&self, items: &[ExportItem], file_name: &str) -> mixtape_core::Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| MixtapeError::Export(format!("{}: {}", self.output_dir.display(), e)))?;

        let path = self.playlist_path(file_name);
        let content = self.codec.encode(items);
        std::fs::write(&path, content)
            .map_err(|e| MixtapeError::Export(format!("{}: {}", path.display(), e)))?;

        info!("Wrote {} entries to {}", items.len(), path.display());
        Ok(())
    }
}

/// Copy the audio file behind every entry into `output_dir`
///
/// Each source file is copied once even if it appears several times.
/// Returns the number of files copied.
pub async fn copy_audio_files(entries: &[PlaylistEntry], output_dir: &Path) -> Result<usize> {
    fs::create_dir_all(output_dir).await?;

    let mut seen = HashSet::new();
    let mut copied = 0;

    for entry in entries {
        if !seen.insert(entry.source.path.clone()) {
            continue;
        }

        let target = output_dir.join(&entry.source.file_name);
        match fs::copy(&entry.source.path, &target).await {
            Ok(bytes) => {
                debug!("Copied {} ({} bytes)", entry.source.file_name, bytes);
                copied += 1;
            }
            Err(e) => {
                warn!("Failed to copy {}: {}", entry.source.path.display(), e);
                return Err(e.into());
            }
        }
    }

    Ok(copied)
}

/// Replace characters that are not allowed in file names
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}
