//! Type definitions for the launcher state.
//!
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which field of the new-password pair has focus
//! - [`UnlockPrompt`] - A database waiting for its password
//! - [`Outcome`] - What happened to each prompt, without secrets

use std::fmt;
use std::path::PathBuf;

use crate::field::FieldId;

/// Represents which screen is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// One password field per queued database
    #[default]
    Unlock,
    /// Base and verify fields for a new master password
    NewPassword,
    /// Nothing left to enter
    Done,
}

/// Represents which field of the pair has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Base,
    Verify,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Base => Focus::Verify,
            Focus::Verify => Focus::Base,
        }
    }
}

/// A queued database and the field collecting its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockPrompt {
    pub path: PathBuf,
    pub keyfile: Option<PathBuf>,
    pub field: FieldId,
}

/// The two fields of the new master password screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPasswordPair {
    pub base: FieldId,
    pub verify: FieldId,
}

/// Result of a prompt, reported on exit.
///
/// Only lengths are kept; the entered text is dropped with its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UnlockRequested {
        path: PathBuf,
        keyfile: Option<PathBuf>,
        password_len: usize,
    },
    MasterPasswordSet {
        password_len: usize,
    },
    Cancelled {
        path: Option<PathBuf>,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::UnlockRequested {
                path,
                keyfile,
                password_len,
            } => {
                write!(
                    f,
                    "{}: unlock requested ({} characters",
                    path.display(),
                    password_len
                )?;
                if let Some(keyfile) = keyfile {
                    write!(f, ", key file {}", keyfile.display())?;
                }
                write!(f, ")")
            }
            Outcome::MasterPasswordSet { password_len } => {
                write!(f, "new master password set ({} characters)", password_len)
            }
            Outcome::Cancelled { path: Some(path) } => write!(f, "{}: cancelled", path.display()),
            Outcome::Cancelled { path: None } => write!(f, "new master password: cancelled"),
        }
    }
}
