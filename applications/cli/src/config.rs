/// CLI configuration
use crate::error::{CliError, Result};
use mixtape_builder::BuilderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest recycle bin retention accepted from configuration (100 years)
pub const MAX_RETENTION_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MixtapeConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default = "default_export")]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Prefix written before each file name in exported playlists
    #[serde(default)]
    pub base_path: Option<String>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl MixtapeConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `mixtape.toml` (or the given file) if it exists, then applies
    /// `MIXTAPE_`-prefixed environment variables, e.g.
    /// `MIXTAPE_BUILDER__RETENTION_DAYS=7`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("mixtape.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(CliError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MIXTAPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.storage.database_url.starts_with("sqlite:") {
            return Err(CliError::Config(format!(
                "Unsupported database URL: {}",
                self.storage.database_url
            )));
        }

        if self.builder.retention_days > MAX_RETENTION_DAYS {
            return Err(CliError::Config(format!(
                "retention_days must be at most {}, got {}",
                MAX_RETENTION_DAYS, self.builder.retention_days
            )));
        }

        if self.builder.default_playlist_name.trim().is_empty() {
            return Err(CliError::Config(
                "Default playlist name must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MixtapeConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            builder: BuilderConfig::default(),
            export: default_export(),
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./mixtape.db".to_string()
}

fn default_export() -> ExportSettings {
    ExportSettings {
        base_path: None,
        output_dir: default_output_dir(),
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MixtapeConfig::default();
        assert_eq!(config.storage.database_url, "sqlite://./mixtape.db");
        assert_eq!(config.builder.retention_days, 30);
        assert!(config.export.base_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[builder]\nretention_days = 7\n\n[export]\nbase_path = \"/mnt/usb\""
        )
        .unwrap();

        let config = MixtapeConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.builder.retention_days, 7);
        assert_eq!(config.builder.reveal_delay_ms, 500);
        assert_eq!(config.export.base_path.as_deref(), Some("/mnt/usb"));
        assert_eq!(config.storage.database_url, "sqlite://./mixtape.db");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = MixtapeConfig::load(Some(Path::new("/nonexistent/mixtape.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_other_databases() {
        let mut config = MixtapeConfig::default();
        config.storage.database_url = "postgres://localhost/mixtape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_retention() {
        let mut config = MixtapeConfig::default();
        config.builder.retention_days = 200_000_000;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        config.builder.retention_days = MAX_RETENTION_DAYS;
        assert!(config.validate().is_ok());
    }
}
