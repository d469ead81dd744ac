//! Session configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_WINDOW_SECONDS: f64 = 20.0;
/// Upper bound for `window_seconds`.
pub const MAX_WINDOW_SECONDS: f64 = 3600.0;

/// Configuration shared by the loader, the waveform views, the exporter and
/// the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavecutConfig {
    /// Length of the scrolling playback window, in seconds.
    pub window_seconds: f64,
    /// Lower bound on overview points regardless of display width.
    pub max_display_points: usize,
    /// Target rate of the display series produced at load time, in Hz.
    pub display_rate: u32,
    /// Chunk size of the original-format copy path.
    pub chunk_bytes: usize,
    /// Directory created next to the source file for exported tracks.
    pub tracks_dir_name: String,
    /// Transport position tick interval, in milliseconds.
    pub position_interval_ms: u64,
}

impl Default for WavecutConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            max_display_points: 50_000,
            display_rate: 4000,
            chunk_bytes: 4096,
            tracks_dir_name: "tracks".to_string(),
            position_interval_ms: 30,
        }
    }
}

impl WavecutConfig {
    pub fn builder() -> WavecutConfigBuilder {
        WavecutConfigBuilder::default()
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Window length; an unrepresentable `window_seconds` falls back to the
    /// default. [`validate`](Self::validate) rejects such values.
    pub fn window_length(&self) -> Duration {
        Duration::try_from_secs_f64(self.window_seconds)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_WINDOW_SECONDS))
    }

    pub fn position_interval(&self) -> Duration {
        Duration::from_millis(self.position_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.window_seconds > 0.0 && self.window_seconds <= MAX_WINDOW_SECONDS) {
            return Err(Error::InvalidConfig(format!(
                "window_seconds {} out of range (0-{MAX_WINDOW_SECONDS} s)",
                self.window_seconds
            )));
        }
        if self.max_display_points == 0 {
            return Err(Error::InvalidConfig(
                "max_display_points must be non-zero".to_string(),
            ));
        }
        if self.display_rate == 0 || self.display_rate > 384_000 {
            return Err(Error::InvalidConfig(format!(
                "display_rate {} out of range (1-384000 Hz)",
                self.display_rate
            )));
        }
        if self.chunk_bytes == 0 {
            return Err(Error::InvalidConfig(
                "chunk_bytes must be non-zero".to_string(),
            ));
        }
        if self.tracks_dir_name.trim().is_empty()
            || self.tracks_dir_name.contains(['/', '\\'])
        {
            return Err(Error::InvalidConfig(format!(
                "tracks_dir_name {:?} must be a plain directory name",
                self.tracks_dir_name
            )));
        }
        if self.position_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "position_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`WavecutConfig`].
///
/// ```ignore
/// let config = WavecutConfig::builder()
///     .window_length(Duration::from_secs(10))
///     .display_rate(8000)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct WavecutConfigBuilder {
    config: WavecutConfig,
}

impl WavecutConfigBuilder {
    pub fn window_length(mut self, length: Duration) -> Self {
        self.config.window_seconds = length.as_secs_f64();
        self
    }

    pub fn max_display_points(mut self, points: usize) -> Self {
        self.config.max_display_points = points;
        self
    }

    pub fn display_rate(mut self, rate: u32) -> Self {
        self.config.display_rate = rate;
        self
    }

    pub fn chunk_bytes(mut self, bytes: usize) -> Self {
        self.config.chunk_bytes = bytes;
        self
    }

    pub fn tracks_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.tracks_dir_name = name.into();
        self
    }

    pub fn position_interval(mut self, interval: Duration) -> Self {
        self.config.position_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<WavecutConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WavecutConfig::default();
        assert_eq!(config.window_length(), Duration::from_secs(20));
        assert_eq!(config.max_display_points, 50_000);
        assert_eq!(config.display_rate, 4000);
        assert_eq!(config.chunk_bytes, 4096);
        assert_eq!(config.tracks_dir_name, "tracks");
        assert_eq!(config.position_interval(), Duration::from_millis(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_validates() {
        let config = WavecutConfig::builder()
            .window_length(Duration::from_secs(5))
            .chunk_bytes(1024)
            .build()
            .unwrap();
        assert_eq!(config.window_length(), Duration::from_secs(5));
        assert_eq!(config.chunk_bytes, 1024);

        let err = WavecutConfig::builder()
            .window_length(Duration::ZERO)
            .build();
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_oversized_window() {
        for seconds in [1e30, f64::INFINITY, f64::NAN, MAX_WINDOW_SECONDS + 1.0] {
            let config = WavecutConfig {
                window_seconds: seconds,
                ..WavecutConfig::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }

        // Not representable as a Duration
        let config = WavecutConfig {
            window_seconds: 1e30,
            ..WavecutConfig::default()
        };
        assert_eq!(config.window_length(), Duration::from_secs(20));

        let config = WavecutConfig {
            window_seconds: MAX_WINDOW_SECONDS,
            ..WavecutConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_nested_tracks_dir() {
        let err = WavecutConfig::builder().tracks_dir_name("a/b").build();
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavecut.json");
        std::fs::write(&path, r#"{ "window_seconds": 12.5, "display_rate": 2000 }"#).unwrap();

        let config = WavecutConfig::load(&path).unwrap();
        assert_eq!(config.window_seconds, 12.5);
        assert_eq!(config.display_rate, 2000);
        assert_eq!(config.chunk_bytes, 4096);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WavecutConfig::load(dir.path().join("nope.json"));
        assert!(matches!(err, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "chunk_bytes": 0 }"#).unwrap();
        assert!(matches!(
            WavecutConfig::load(&path),
            Err(Error::InvalidConfig(_))
        ));
    }
}
