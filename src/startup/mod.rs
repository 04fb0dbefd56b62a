//! Startup sequence run before the terminal UI takes over.
//!
//! # Components
//!
//! - [`self_test`] - Cryptographic known-answer tests; failure halts startup
//! - [`config`] - Launcher configuration (defaults, `--config` file, env)
//! - [`logging`] - `tracing` subscriber writing to a log file
//! - [`pw_stdin`] - One password line per database argument
//!
//! # Usage
//!
//! ```ignore
//! use pwfield::startup::{collect_database_requests, run_self_test, LaunchConfig, StdinReader};
//!
//! run_self_test()?;
//! let config = LaunchConfig::load(options.config.as_deref())?;
//! let requests = collect_database_requests(&options, &mut StdinReader, &mut std::io::stdout())?;
//! ```

pub mod config;
pub mod logging;
pub mod pw_stdin;

pub use config::LaunchConfig;
pub use logging::{default_log_path, init_logging};
pub use pw_stdin::{
    collect_database_requests, DatabaseRequest, LineReader, PasswordReader, StdinReader,
    PASSWORD_PROMPT,
};
pub use self_test::run_self_test;
