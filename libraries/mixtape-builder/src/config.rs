//! Builder configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of days deleted items stay in the recycle bin
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Default dwell time before an insertion point is revealed
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 500;

/// Configuration for the playlist builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Days a deleted track or playlist is kept before the startup sweep
    /// purges it (default: 30)
    pub retention_days: u32,

    /// How long the pointer must rest on a playlist entry before the
    /// insertion point opens there, in milliseconds (default: 500)
    pub reveal_delay_ms: u64,

    /// Name of a fresh working playlist (default: "My Playlist")
    pub default_playlist_name: String,
}

impl BuilderConfig {
    /// Reveal delay as a `Duration`
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Retention window as a `chrono::Duration`
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            default_playlist_name: "My Playlist".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.reveal_delay(), Duration::from_millis(500));
        assert_eq!(config.retention(), chrono::Duration::days(30));
        assert_eq!(config.default_playlist_name, "My Playlist");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: BuilderConfig = serde_json::from_str(r#"{"retention_days": 7}"#).unwrap();
        assert_eq!(config.retention_days, 7);
        assert_eq!(config.reveal_delay_ms, 500);
    }
}
