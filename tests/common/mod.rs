//! Common test utilities for integration tests.
//!
//! Reusable fixtures for the form and launcher tests: a form wired to a
//! [`MockCapsLock`], a paired base/verify form, and an app builder.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::{paired_form, TestAppBuilder};
//!
//! let (mut form, probe, base, verify) = paired_form();
//! let (app, probe) = TestAppBuilder::new().with_database("vault.kdbx", Some("pw")).build();
//! ```

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
use pwfield::app::{App, MockCredentialSource};
use pwfield::field::{FieldEvent, FieldId, MockCapsLock, PasswordForm};
use pwfield::startup::{DatabaseRequest, LaunchConfig};
use secrecy::SecretString;

/// Sampling interval used by test forms
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// A form backed by a controllable Caps Lock probe (initially off).
pub fn test_form() -> (PasswordForm, Arc<MockCapsLock>) {
    let probe = Arc::new(MockCapsLock::new());
    let form = PasswordForm::with_poll_interval(probe.clone(), TEST_POLL_INTERVAL);
    (form, probe)
}

/// A form with `verify` already paired to `base`.
pub fn paired_form() -> (PasswordForm, Arc<MockCapsLock>, FieldId, FieldId) {
    let (mut form, probe) = test_form();
    let base = form.add_field();
    let verify = form.add_field();
    form.enable_verify_mode(verify, base)
        .expect("fresh fields must pair");
    (form, probe, base, verify)
}

/// Only the Caps Lock notifications, in order.
pub fn capslock_events(form: &mut PasswordForm) -> Vec<(FieldId, bool)> {
    form.take_events()
        .into_iter()
        .filter_map(|event| match event {
            FieldEvent::CapslockToggled { field, on } => Some((field, on)),
            _ => None,
        })
        .collect()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn shift(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

/// A key press as a Kitty terminal reports it while Caps Lock is on.
pub fn with_caps_lock(mut key: KeyEvent) -> KeyEvent {
    key.state |= KeyEventState::CAPS_LOCK;
    key
}

/// Type a string one key press at a time.
pub fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)), now);
    }
}

/// Builder for launcher instances in tests.
pub struct TestAppBuilder {
    requests: Vec<DatabaseRequest>,
    config: LaunchConfig,
    clipboard: Option<String>,
    now: Instant,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            config: LaunchConfig::default(),
            clipboard: None,
            now: Instant::now(),
        }
    }

    pub fn with_database(mut self, path: &str, password: Option<&str>) -> Self {
        self.requests.push(DatabaseRequest {
            path: PathBuf::from(path),
            password: password.map(|p| SecretString::new(p.to_string())),
            keyfile: None,
        });
        self
    }

    pub fn with_config(mut self, config: LaunchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clipboard(mut self, password: &str) -> Self {
        self.clipboard = Some(password.to_string());
        self
    }

    pub fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }

    pub fn build(self) -> (App, Arc<MockCapsLock>) {
        let probe = Arc::new(MockCapsLock::new());
        let form = PasswordForm::with_poll_interval(probe.clone(), TEST_POLL_INTERVAL);
        let credentials = match self.clipboard {
            Some(password) => MockCredentialSource::with_password(&password),
            None => MockCredentialSource::new(),
        };
        let app = App::new(
            form,
            self.requests,
            &self.config,
            Box::new(credentials),
            self.now,
        );
        (app, probe)
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
