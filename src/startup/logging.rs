//! Log file setup.
//!
//! The terminal belongs to the UI, so `tracing` output goes to
//! `<data_local_dir>/pwfield/pwfield.log`. Field contents are never logged.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LaunchConfig;
use crate::error::{StartupError, StartupResult};

/// Default log file location, if the platform has a data directory.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("pwfield").join("pwfield.log"))
}

/// Build the filter from the config, falling back to `info` on a bad
/// directive.
pub fn build_filter(config: &LaunchConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `path`.
pub fn init_logging(config: &LaunchConfig, path: &Path) -> StartupResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StartupError::Logging(e.to_string()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| StartupError::Logging(e.to_string()))
}
