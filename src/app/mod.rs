//! Launcher state and logic.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which field of the new-password pair has focus
//! - [`CredentialSource`] - Where "fill" takes its password from
//!
//! The app owns a [`PasswordForm`] and drives it from the event loop:
//! key events edit the focused field, [`App::tick`] polls the Caps Lock
//! samplers and every queued [`FieldEvent`] is drained right after.

mod credentials;
mod handlers;
mod navigation;
mod types;

pub use credentials::{ClipboardSource, CredentialSource, MockCredentialSource};
pub use types::{Focus, NewPasswordPair, Outcome, Screen, UnlockPrompt};

use std::collections::VecDeque;
use std::time::Instant;

use secrecy::ExposeSecret;

use crate::field::{FieldEvent, FieldId, PasswordForm};
use crate::startup::{DatabaseRequest, LaunchConfig};

/// Main launcher state
pub struct App {
    pub form: PasswordForm,
    pub screen: Screen,
    pub focus: Focus,
    /// Databases still waiting for a password; the front one is on screen
    prompts: VecDeque<UnlockPrompt>,
    new_password: Option<NewPasswordPair>,
    credentials: Box<dyn CredentialSource>,
    /// Last Caps Lock state reported by a shown field
    capslock_on: bool,
    /// Transient message for the status line
    status: Option<String>,
    outcomes: Vec<Outcome>,
    mask_char: char,
    pub should_quit: bool,
    pub needs_redraw: bool,
}

impl App {
    /// Build the launcher for the given database requests.
    ///
    /// One unlock prompt is created per request, pre-filled with the
    /// password read from stdin if any. Without requests the launcher asks
    /// for a new master password instead.
    pub fn new(
        form: PasswordForm,
        requests: Vec<DatabaseRequest>,
        config: &LaunchConfig,
        credentials: Box<dyn CredentialSource>,
        now: Instant,
    ) -> Self {
        let mut app = Self {
            form,
            screen: Screen::Unlock,
            focus: Focus::Base,
            prompts: VecDeque::new(),
            new_password: None,
            credentials,
            capslock_on: false,
            status: None,
            outcomes: Vec::new(),
            mask_char: config.mask_char,
            should_quit: false,
            needs_redraw: true,
        };

        for request in requests {
            let field = app.form.add_field();
            if let Some(password) = &request.password {
                app.form.autocomplete_password(field, password.expose_secret());
            }
            app.form
                .set_show_password(field, config.show_password_by_default);
            app.prompts.push_back(UnlockPrompt {
                path: request.path,
                keyfile: request.keyfile,
                field,
            });
        }

        if app.prompts.is_empty() {
            let base = app.form.add_field();
            let verify = app.form.add_field();
            if let Err(e) = app.form.enable_verify_mode(verify, base) {
                tracing::warn!(error = %e, "could not pair new password fields");
            }
            app.form
                .set_show_password(base, config.show_password_by_default);
            app.new_password = Some(NewPasswordPair { base, verify });
            app.screen = Screen::NewPassword;
        }

        tracing::info!(
            prompts = app.prompts.len(),
            screen = ?app.screen,
            "launcher ready"
        );
        app.show_screen_fields(now);
        // Visibility changes made while building are not news to anyone
        app.form.take_events();
        app
    }

    /// Advance timers: polls the Caps Lock samplers of shown fields.
    pub fn tick(&mut self, now: Instant) {
        self.form.tick(now);
        self.process_events();
    }

    /// Drain the form's notifications and update launcher state.
    pub fn process_events(&mut self) {
        for event in self.form.take_events() {
            match event {
                FieldEvent::CapslockToggled { field, on } => {
                    if self.form.is_shown(field) {
                        tracing::info!(field = %field, on, "caps lock state changed");
                        self.capslock_on = on;
                    }
                }
                FieldEvent::ShowPasswordChanged { field, show } => {
                    tracing::debug!(field = %field, show, "reveal toggled");
                }
            }
            self.mark_dirty();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// The field currently receiving keystrokes.
    pub fn focused_field(&self) -> Option<FieldId> {
        match self.screen {
            Screen::Unlock => self.prompts.front().map(|prompt| prompt.field),
            Screen::NewPassword => self.new_password.map(|pair| match self.focus {
                Focus::Base => pair.base,
                Focus::Verify => pair.verify,
            }),
            Screen::Done => None,
        }
    }

    pub fn current_prompt(&self) -> Option<&UnlockPrompt> {
        self.prompts.front()
    }

    /// Number of databases still waiting, including the one on screen.
    pub fn pending_prompts(&self) -> usize {
        self.prompts.len()
    }

    pub fn new_password_pair(&self) -> Option<NewPasswordPair> {
        self.new_password
    }

    pub fn capslock_on(&self) -> bool {
        self.capslock_on
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }
}
