//! Error types for pwfield.
//!
//! - **Field errors**: API misuse on a [`crate::field::PasswordForm`];
//!   always handled locally, never fatal
//! - **Startup errors**: CLI usage, configuration, stdin and self-test
//!   failures that end the launcher before the terminal UI starts
//! - **Error Categories**: map failures to exit codes and hints
//!
//! | Category | Description | Exit code |
//! |----------|-------------|-----------|
//! | Client | Pairing misuse | not fatal |
//! | Usage | Bad command line | 2 |
//! | Configuration | Config file issues | 1 |
//! | System | stdin / terminal I/O | 1 |
//! | Fatal | Cryptographic self-test failed | 1 |

mod category;
mod field;
mod startup;

pub use category::ErrorCategory;
pub use field::FieldError;
pub use startup::{CliError, StartupError};

/// Type alias for Results using StartupError.
pub type StartupResult<T> = Result<T, StartupError>;
