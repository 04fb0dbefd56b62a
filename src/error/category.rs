//! Error category classification.
//!
//! Categories decide how the launcher reacts to a failure: which exit code
//! it uses and what hint it prints.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Programming errors (invalid field pairing and similar misuse).
    /// Handled locally, never fatal.
    Client,

    /// Bad command-line usage.
    Usage,

    /// Missing or invalid configuration file.
    Configuration,

    /// OS-level failures (reading stdin, terminal I/O).
    System,

    /// The application must not start (failed cryptographic self-test).
    Fatal,
}

impl ErrorCategory {
    /// Process exit code used when an error of this category ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Usage => 2,
            _ => 1,
        }
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Client => "client",
            ErrorCategory::Usage => "usage",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
            ErrorCategory::Fatal => "fatal",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Client => {
                "This may be a bug. Please report this issue if it persists"
            }
            ErrorCategory::Usage => "Run with --help to see the available options",
            ErrorCategory::Configuration => "Check the file passed with --config",
            ErrorCategory::System => "Check that the input stream is readable",
            ErrorCategory::Fatal => {
                "Your system's cryptographic libraries may be broken; reinstall the application"
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
