//! Credential source trait for dependency injection.
//!
//! The launcher fills the focused field from a credential source. In
//! production that is the system clipboard; tests use
//! [`MockCredentialSource`].

use std::sync::Mutex;

use secrecy::SecretString;
use zeroize::Zeroizing;

/// Trait for reading a password to fill into a field.
pub trait CredentialSource: Send + Sync {
    /// Returns None if nothing usable is available.
    fn read_password(&self) -> Option<SecretString>;
}

/// Reads the password from the system clipboard via `arboard`.
pub struct ClipboardSource;

impl CredentialSource for ClipboardSource {
    fn read_password(&self) -> Option<SecretString> {
        let mut clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                return None;
            }
        };
        let mut text = Zeroizing::new(clipboard.get_text().ok()?);
        let len = text.trim_end_matches(['\r', '\n']).len();
        text.truncate(len);
        if text.is_empty() {
            None
        } else {
            Some(SecretString::new(std::mem::take(&mut *text)))
        }
    }
}

/// Mock implementation for testing.
pub struct MockCredentialSource {
    password: Mutex<Option<String>>,
}

impl MockCredentialSource {
    pub fn new() -> Self {
        Self {
            password: Mutex::new(None),
        }
    }

    pub fn with_password(password: &str) -> Self {
        Self {
            password: Mutex::new(Some(password.to_string())),
        }
    }

    pub fn set_password(&self, password: Option<String>) {
        if let Ok(mut guard) = self.password.lock() {
            *guard = password;
        }
    }
}

impl Default for MockCredentialSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for MockCredentialSource {
    fn read_password(&self) -> Option<SecretString> {
        self.password
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .map(SecretString::new)
    }
}
