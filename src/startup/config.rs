//! Launcher configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. JSON file given with `--config`
//! 3. environment (`PWFIELD_CAPSLOCK_POLL_MS`, `PWFIELD_LOG`)

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StartupError, StartupResult};
use crate::field::DEFAULT_POLL_INTERVAL_MS;

/// Shortest accepted Caps Lock sampling interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 50;
/// Longest accepted Caps Lock sampling interval.
pub const MAX_POLL_INTERVAL_MS: u64 = 5000;

pub const ENV_POLL_INTERVAL: &str = "PWFIELD_CAPSLOCK_POLL_MS";
pub const ENV_LOG_FILTER: &str = "PWFIELD_LOG";

/// Configuration for the launcher and the fields it creates.
///
/// # Example
///
/// ```
/// use pwfield::startup::LaunchConfig;
///
/// let config = LaunchConfig::default()
///     .with_capslock_poll_ms(500)
///     .with_show_password_by_default(true);
/// assert_eq!(config.poll_interval().as_millis(), 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Caps Lock sampling interval in milliseconds
    pub capslock_poll_ms: u64,
    /// Start every field in plaintext mode
    pub show_password_by_default: bool,
    /// Glyph drawn for each masked character
    pub mask_char: char,
    /// `tracing` filter directive for the log file
    pub log_filter: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            capslock_poll_ms: DEFAULT_POLL_INTERVAL_MS,
            show_password_by_default: false,
            mask_char: '●',
            log_filter: "info".to_string(),
        }
    }
}

impl LaunchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capslock_poll_ms(mut self, ms: u64) -> Self {
        self.capslock_poll_ms = ms;
        self
    }

    pub fn with_show_password_by_default(mut self, show: bool) -> Self {
        self.show_password_by_default = show;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Sampling interval, clamped to the supported range.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.capslock_poll_ms
                .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        )
    }

    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> StartupResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StartupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides. Unparsable values are ignored.
    pub fn apply_env(mut self) -> Self {
        if let Ok(value) = std::env::var(ENV_POLL_INTERVAL) {
            match value.trim().parse::<u64>() {
                Ok(ms) => self.capslock_poll_ms = ms,
                Err(_) => {
                    tracing::warn!(value = %value, "ignoring invalid {}", ENV_POLL_INTERVAL);
                }
            }
        }
        if let Ok(filter) = std::env::var(ENV_LOG_FILTER) {
            if !filter.trim().is_empty() {
                self.log_filter = filter;
            }
        }
        self
    }

    /// Defaults, then the optional config file, then the environment.
    pub fn load(path: Option<&Path>) -> StartupResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        std::env::remove_var(ENV_POLL_INTERVAL);
        std::env::remove_var(ENV_LOG_FILTER);
    }

    #[test]
    fn test_defaults() {
        let config = LaunchConfig::default();
        assert_eq!(config.capslock_poll_ms, 300);
        assert!(!config.show_password_by_default);
        assert_eq!(config.mask_char, '●');
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_poll_interval_is_clamped() {
        assert_eq!(
            LaunchConfig::new().with_capslock_poll_ms(1).poll_interval(),
            Duration::from_millis(MIN_POLL_INTERVAL_MS)
        );
        assert_eq!(
            LaunchConfig::new().with_capslock_poll_ms(60_000).poll_interval(),
            Duration::from_millis(MAX_POLL_INTERVAL_MS)
        );
        assert_eq!(
            LaunchConfig::new().with_capslock_poll_ms(400).poll_interval(),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"capslock_poll_ms": 450, "mask_char": "*"}}"#).unwrap();

        let config = LaunchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.capslock_poll_ms, 450);
        assert_eq!(config.mask_char, '*');
        assert!(!config.show_password_by_default);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = LaunchConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StartupError::ConfigRead { .. }));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = LaunchConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StartupError::ConfigParse { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"capslock_poll_ms": 450}}"#).unwrap();

        std::env::set_var(ENV_POLL_INTERVAL, "700");
        std::env::set_var(ENV_LOG_FILTER, "pwfield=trace");
        let config = LaunchConfig::load(Some(file.path())).unwrap();
        clear_env();

        assert_eq!(config.capslock_poll_ms, 700);
        assert_eq!(config.log_filter, "pwfield=trace");
    }

    #[test]
    #[serial]
    fn test_invalid_env_is_ignored() {
        clear_env();
        std::env::set_var(ENV_POLL_INTERVAL, "fast");
        let config = LaunchConfig::load(None).unwrap();
        clear_env();
        assert_eq!(config.capslock_poll_ms, DEFAULT_POLL_INTERVAL_MS);
    }
}
