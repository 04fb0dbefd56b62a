//! Command-line argument parsing for the pwfield launcher.
//!
//! ```text
//! pwfield [OPTIONS] [filename(s)]
//! ```

use std::path::PathBuf;

use crate::error::CliError;

/// Options for a normal run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchOptions {
    /// Password databases to open, in command-line order
    pub files: Vec<String>,
    /// Custom config file
    pub config: Option<PathBuf>,
    /// Key file used for every database
    pub keyfile: Option<PathBuf>,
    /// Read one password line from stdin per database
    pub pw_stdin: bool,
    /// Parent window handle passed by browser integrations; accepted and
    /// logged, otherwise unused in a terminal
    pub parent_window: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print usage and exit
    Help,
    /// Print version and exit
    Version,
    /// Run the launcher
    Run(LaunchOptions),
}

/// Usage text printed for `--help`.
pub fn usage() -> String {
    [
        "pwfield - terminal password entry for password databases",
        "",
        "Usage: pwfield [OPTIONS] [filename(s)]",
        "",
        "Arguments:",
        "  [filename(s)]              filenames of the password databases to open (*.kdbx)",
        "",
        "Options:",
        "  --config <config>          path to a custom config file",
        "  --keyfile <keyfile>        key file of the database",
        "  --pw-stdin                 read password of the database from stdin",
        "  --pw, --parent-window <handle>",
        "                             parent window handle",
        "  -h, --help                 display this help",
        "  -V, --version              display version information",
    ]
    .join("\n")
}

/// Parse command-line arguments (program name first).
///
/// `--help` and `--version` win as soon as they are seen. `--opt value` and
/// `--opt=value` are both accepted; `--` ends option parsing. Flags reject
/// an inline value.
///
/// # Examples
///
/// ```
/// use pwfield::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["pwfield".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = LaunchOptions::default();
    let mut args = args.skip(1);
    let mut only_positional = false;

    while let Some(arg) = args.next() {
        if only_positional || arg == "-" || !arg.starts_with('-') {
            options.files.push(arg);
            continue;
        }

        let (name, inline_value) = match arg.split_once('=') {
            Some((name, value)) => (name.to_string(), Some(value.to_string())),
            None => (arg.clone(), None),
        };

        match name.as_str() {
            "--" | "-h" | "--help" | "-V" | "--version" | "--pw-stdin"
                if inline_value.is_some() =>
            {
                return Err(CliError::UnexpectedValue(name));
            }
            "--" => only_positional = true,
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "--pw-stdin" => options.pw_stdin = true,
            "--config" => {
                options.config = Some(PathBuf::from(take_value(&name, inline_value, &mut args)?));
            }
            "--keyfile" => {
                options.keyfile = Some(PathBuf::from(take_value(&name, inline_value, &mut args)?));
            }
            "--pw" | "--parent-window" => {
                options.parent_window = Some(take_value(&name, inline_value, &mut args)?);
            }
            _ => return Err(CliError::UnknownOption(arg)),
        }
    }

    Ok(CliCommand::Run(options))
}

fn take_value<I>(name: &str, inline: Option<String>, args: &mut I) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| args.next())
        .ok_or_else(|| CliError::MissingValue(name.to_string()))
}
