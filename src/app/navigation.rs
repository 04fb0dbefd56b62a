//! Navigation methods for the App: focus, screen switching and submission.

use std::time::Instant;

use super::{App, Focus, Outcome, Screen};
use crate::field::{FieldId, MatchState};

impl App {
    /// Fields that belong on the current screen.
    pub fn screen_fields(&self) -> Vec<FieldId> {
        match self.screen {
            Screen::Unlock => self.current_prompt().map(|p| p.field).into_iter().collect(),
            Screen::NewPassword => self
                .new_password_pair()
                .map(|pair| vec![pair.base, pair.verify])
                .unwrap_or_default(),
            Screen::Done => Vec::new(),
        }
    }

    /// Show the current screen's fields, starting their samplers.
    pub(super) fn show_screen_fields(&mut self, now: Instant) {
        for id in self.screen_fields() {
            self.form.show(id, now);
        }
    }

    /// Hide every field and bring up the current screen's fields.
    ///
    /// Samplers follow what is on screen, so a field waiting in the queue
    /// never polls the keyboard.
    fn refresh_screen(&mut self, now: Instant) {
        self.form.hide_all();
        self.capslock_on = false;
        self.show_screen_fields(now);
        self.mark_dirty();
    }

    /// Cycle focus between the fields of the pair
    pub fn cycle_focus(&mut self) {
        if self.screen == Screen::NewPassword {
            self.focus = self.focus.next();
        }
    }

    /// Submit the focused screen.
    ///
    /// An unlock prompt is always accepted and the next database comes up.
    /// The new-password pair is only accepted once both entries match.
    pub fn submit(&mut self, now: Instant) {
        match self.screen {
            Screen::Unlock => self.submit_unlock(now),
            Screen::NewPassword => self.submit_new_password(),
            Screen::Done => {}
        }
    }

    fn submit_unlock(&mut self, now: Instant) {
        let Some(prompt) = self.prompts.pop_front() else {
            return;
        };
        let password_len = self
            .form
            .field(prompt.field)
            .map(|field| field.buffer().char_len())
            .unwrap_or(0);
        self.form.remove_field(prompt.field);

        tracing::info!(path = %prompt.path.display(), "unlock requested");
        self.outcomes.push(Outcome::UnlockRequested {
            path: prompt.path,
            keyfile: prompt.keyfile,
            password_len,
        });
        self.status = None;

        if self.prompts.is_empty() {
            self.finish();
        } else {
            self.refresh_screen(now);
        }
    }

    fn submit_new_password(&mut self) {
        let Some(pair) = self.new_password else {
            return;
        };
        match self.form.match_state(pair.verify) {
            Some(MatchState::Match) => {
                let password_len = self
                    .form
                    .field(pair.base)
                    .map(|field| field.buffer().char_len())
                    .unwrap_or(0);
                self.form.remove_field(pair.verify);
                self.form.remove_field(pair.base);
                self.new_password = None;

                tracing::info!("new master password accepted");
                self.outcomes
                    .push(Outcome::MasterPasswordSet { password_len });
                self.finish();
            }
            Some(MatchState::Mismatch) => {
                self.set_status("Passwords do not match");
                self.focus = Focus::Verify;
            }
            Some(MatchState::Empty) | None => {
                self.set_status("Enter the password twice");
                self.focus = match self.form.text(pair.base) {
                    Some(text) if !text.is_empty() => Focus::Verify,
                    _ => Focus::Base,
                };
            }
        }
        self.mark_dirty();
    }

    /// Leave the launcher, cancelling whatever is still open.
    pub fn quit(&mut self) {
        for prompt in self.prompts.drain(..) {
            self.outcomes.push(Outcome::Cancelled {
                path: Some(prompt.path),
            });
        }
        if self.new_password.take().is_some() {
            self.outcomes.push(Outcome::Cancelled { path: None });
        }
        tracing::info!("launcher cancelled");
        self.finish();
    }

    fn finish(&mut self) {
        self.form.hide_all();
        for id in self.form.field_ids() {
            self.form.remove_field(id);
        }
        self.capslock_on = false;
        self.screen = Screen::Done;
        self.should_quit = true;
        self.mark_dirty();
    }
}
