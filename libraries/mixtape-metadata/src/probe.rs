/// Duration probe implementation using lofty
use crate::error::MetadataError;
use lofty::AudioFile;
use mixtape_core::DurationProbe;
use std::path::Path;
use tracing::debug;

/// Duration probe using the lofty library
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyDurationProbe;

impl LoftyDurationProbe {
    /// Create a new duration probe
    pub fn new() -> Self {
        Self
    }

    fn read_duration(path: &Path) -> crate::Result<f64> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let tagged_file = lofty::read_from_path(path)?;
        let seconds = tagged_file.properties().duration().as_secs_f64();

        if seconds.is_finite() && seconds > 0.0 {
            Ok(seconds)
        } else {
            Err(MetadataError::NoDuration(path.display().to_string()))
        }
    }
}

impl DurationProbe for LoftyDurationProbe {
    fn probe(&self, path: &Path) -> mixtape_core::Result<f64> {
        let seconds = Self::read_duration(path)?;
        debug!("Probed {}: {:.3}s", path.display(), seconds);
        Ok(seconds)
    }
}
