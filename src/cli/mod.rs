//! CLI module for the pwfield launcher.
//!
//! The dispatcher runs first in `main()`. Help and version print and exit 0
//! before anything else (self-test, config, stdin, terminal) happens:
//!
//! ```ignore
//! use pwfield::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! let Some(options) = run_cli_command(command) else {
//!     return Ok(()); // help or version was printed
//! };
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, usage, CliCommand, LaunchOptions};
pub use version::{version_line, VERSION};

/// Handle informational commands.
///
/// Returns `None` after printing help or version, or the options of a
/// normal run.
pub fn run_cli_command(command: CliCommand) -> Option<LaunchOptions> {
    match command {
        CliCommand::Help => {
            println!("{}", usage());
            None
        }
        CliCommand::Version => {
            println!("{}", version_line());
            None
        }
        CliCommand::Run(options) => Some(options),
    }
}
