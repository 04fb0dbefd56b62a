//! Errors that stop the launcher before or while it starts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::category::ErrorCategory;

/// Command-line usage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("missing value for option '{0}'")]
    MissingValue(String),

    #[error("option '{0}' does not take a value")]
    UnexpectedValue(String),
}

/// Failures while preparing to run.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read password from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to set up logging: {0}")]
    Logging(String),

    /// Known-answer test of a digest did not reproduce the expected output
    #[error("self-test of {algorithm} failed")]
    SelfTest { algorithm: &'static str },
}

impl StartupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StartupError::Cli(_) => ErrorCategory::Usage,
            StartupError::ConfigRead { .. } | StartupError::ConfigParse { .. } => {
                ErrorCategory::Configuration
            }
            StartupError::Stdin(_) | StartupError::Logging(_) => ErrorCategory::System,
            StartupError::SelfTest { .. } => ErrorCategory::Fatal,
        }
    }
}
