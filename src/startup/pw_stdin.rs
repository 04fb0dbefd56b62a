//! Reading database passwords from stdin (`--pw-stdin`).
//!
//! Browser integrations talk to the launcher with one password line per
//! database argument. A line is consumed for every file argument, before the
//! file is checked, so a missing or skipped file never shifts the passwords
//! of the files after it.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::cli::LaunchOptions;
use crate::error::{StartupError, StartupResult};

/// Room reserved for a line up front, so reading rarely reallocates.
const LINE_CAPACITY: usize = 256;

/// Prompt written before each password line.
pub const PASSWORD_PROMPT: &str = "Database password: ";

/// Source of one password line.
pub trait PasswordReader {
    fn read_password(&mut self) -> io::Result<SecretString>;
}

/// Reads from any buffered reader; one line per call.
///
/// End of input yields an empty password. The line terminator (`\n` or
/// `\r\n`) is stripped, nothing else.
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> PasswordReader for LineReader<R> {
    fn read_password(&mut self) -> io::Result<SecretString> {
        let mut line = Zeroizing::new(String::with_capacity(LINE_CAPACITY));
        self.inner.read_line(&mut line)?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(SecretString::new(std::mem::take(&mut *line)))
    }
}

/// Process stdin: hidden input via rpassword on a terminal, plain lines from
/// a pipe.
#[derive(Debug, Default)]
pub struct StdinReader;

impl PasswordReader for StdinReader {
    fn read_password(&mut self) -> io::Result<SecretString> {
        if io::stdin().is_terminal() {
            rpassword::read_password().map(SecretString::new)
        } else {
            LineReader::new(io::stdin().lock()).read_password()
        }
    }
}

/// A database the launcher should prompt for.
pub struct DatabaseRequest {
    pub path: PathBuf,
    /// Password read from stdin, if `--pw-stdin` was given. Wiped on drop.
    pub password: Option<SecretString>,
    pub keyfile: Option<PathBuf>,
}

impl fmt::Debug for DatabaseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseRequest")
            .field("path", &self.path)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("keyfile", &self.keyfile)
            .finish()
    }
}

/// Whether a file argument names a database worth prompting for.
///
/// Empty names, paths that do not exist and `.json` files (browser
/// integration manifests) are skipped.
pub fn is_openable(filename: &str) -> bool {
    !filename.is_empty()
        && Path::new(filename).exists()
        && !filename.to_lowercase().ends_with(".json")
}

/// Turn file arguments into database requests.
///
/// With `pw_stdin` set, exactly one line is read per file argument,
/// unconditionally, with [`PASSWORD_PROMPT`] written to `prompt` first.
pub fn collect_database_requests<P, W>(
    options: &LaunchOptions,
    reader: &mut P,
    prompt: &mut W,
) -> StartupResult<Vec<DatabaseRequest>>
where
    P: PasswordReader + ?Sized,
    W: Write + ?Sized,
{
    let mut requests = Vec::new();

    for filename in &options.files {
        let password = if options.pw_stdin {
            write!(prompt, "{}", PASSWORD_PROMPT)
                .and_then(|_| prompt.flush())
                .map_err(StartupError::Stdin)?;
            Some(reader.read_password().map_err(StartupError::Stdin)?)
        } else {
            None
        };

        if is_openable(filename) {
            requests.push(DatabaseRequest {
                path: PathBuf::from(filename),
                password,
                keyfile: options.keyfile.clone(),
            });
        } else {
            tracing::info!(file = %filename, "skipping database argument");
        }
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Cursor;

    fn next_line<R: BufRead>(reader: &mut LineReader<R>) -> String {
        reader.read_password().unwrap().expose_secret().clone()
    }

    fn password(request: &DatabaseRequest) -> Option<&str> {
        request.password.as_ref().map(|p| p.expose_secret().as_str())
    }

    fn options(files: &[&str], pw_stdin: bool) -> LaunchOptions {
        LaunchOptions {
            files: files.iter().map(|f| f.to_string()).collect(),
            pw_stdin,
            ..LaunchOptions::default()
        }
    }

    #[test]
    fn test_line_reader_strips_terminators_only() {
        let mut reader = LineReader::new(Cursor::new(" a b \r\nsecond\nlast"));
        assert_eq!(next_line(&mut reader), " a b ");
        assert_eq!(next_line(&mut reader), "second");
        assert_eq!(next_line(&mut reader), "last");
        assert_eq!(next_line(&mut reader), "");
    }

    #[test]
    fn test_no_stdin_reads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("a.kdbx");
        std::fs::write(&db, b"").unwrap();

        let mut reader = LineReader::new(Cursor::new("untouched\n"));
        let mut prompt = Vec::new();
        let requests = collect_database_requests(
            &options(&[db.to_str().unwrap()], false),
            &mut reader,
            &mut prompt,
        )
        .unwrap();

        assert_eq!(requests.len(), 1);
        assert!(requests[0].password.is_none());
        assert!(prompt.is_empty());
        assert_eq!(next_line(&mut reader), "untouched");
    }

    #[test]
    fn test_missing_file_still_consumes_a_line() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("real.kdbx");
        std::fs::write(&db, b"").unwrap();
        let missing = dir.path().join("missing.kdbx");

        let mut reader = LineReader::new(Cursor::new("first\nsecond\n"));
        let mut prompt = Vec::new();
        let requests = collect_database_requests(
            &options(&[missing.to_str().unwrap(), db.to_str().unwrap()], true),
            &mut reader,
            &mut prompt,
        )
        .unwrap();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, db);
        assert_eq!(password(&requests[0]), Some("second"));
        assert_eq!(
            String::from_utf8(prompt).unwrap(),
            format!("{}{}", PASSWORD_PROMPT, PASSWORD_PROMPT)
        );
    }

    #[test]
    fn test_json_and_empty_arguments_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("manifest.JSON");
        std::fs::write(&manifest, b"{}").unwrap();

        let mut reader = LineReader::new(Cursor::new("one\ntwo\nthree\n"));
        let mut prompt = Vec::new();
        let requests = collect_database_requests(
            &options(&[manifest.to_str().unwrap(), ""], true),
            &mut reader,
            &mut prompt,
        )
        .unwrap();

        assert!(requests.is_empty());
        assert_eq!(next_line(&mut reader), "three");
    }

    #[test]
    fn test_keyfile_is_attached() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("a.kdbx");
        std::fs::write(&db, b"").unwrap();

        let mut opts = options(&[db.to_str().unwrap()], false);
        opts.keyfile = Some(PathBuf::from("/keys/a.key"));
        let mut reader = LineReader::new(Cursor::new(""));
        let requests = collect_database_requests(&opts, &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(requests[0].keyfile, Some(PathBuf::from("/keys/a.key")));
    }

    #[test]
    fn test_request_debug_redacts_password() {
        let request = DatabaseRequest {
            path: PathBuf::from("a.kdbx"),
            password: Some(SecretString::new("hunter2".to_string())),
            keyfile: None,
        };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }

    #[test]
    fn test_read_line_is_secret() {
        let mut reader = LineReader::new(Cursor::new("hunter2\n"));
        let secret = reader.read_password().unwrap();
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert_eq!(secret.expose_secret(), "hunter2");
    }
}
