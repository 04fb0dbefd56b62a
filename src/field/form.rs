//! The form: an arena of password fields plus their pairings.
//!
//! Fields refer to each other through [`FieldId`] handles, never through
//! owning pointers. An id carries a generation, so once a field is removed
//! its id never resolves again, even if the slot is reused. A verify field
//! whose base is gone simply compares as [`MatchState::Empty`].
//!
//! All operations run synchronously on the caller's thread. Notifications
//! are queued in the order they happen and handed out by
//! [`PasswordForm::take_events`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::buffer::SecretBuffer;
use super::capslock::{CapsLockProbe, DEFAULT_POLL_INTERVAL_MS};
use super::events::FieldEvent;
use super::feedback::{FeedbackActions, FieldStyle, MatchState};
use super::password_field::PasswordField;
use crate::error::FieldError;

/// Non-owning handle to a field in a [`PasswordForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    index: u32,
    generation: u32,
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    field: Option<PasswordField>,
}

/// Owns password fields, their verify pairings and their Caps Lock samplers.
pub struct PasswordForm {
    slots: Vec<Slot>,
    probe: Arc<dyn CapsLockProbe>,
    poll_interval: Duration,
    events: VecDeque<FieldEvent>,
}

impl fmt::Debug for PasswordForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordForm")
            .field("slots", &self.slots)
            .field("poll_interval", &self.poll_interval)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl PasswordForm {
    pub fn new(probe: Arc<dyn CapsLockProbe>) -> Self {
        Self::with_poll_interval(probe, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }

    pub fn with_poll_interval(probe: Arc<dyn CapsLockProbe>, poll_interval: Duration) -> Self {
        Self {
            slots: Vec::new(),
            probe,
            poll_interval,
            events: VecDeque::new(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    // ========================================================================
    // Field management
    // ========================================================================

    /// Create an empty, unpaired, masked, hidden field.
    pub fn add_field(&mut self) -> FieldId {
        let field = PasswordField::new(self.poll_interval);
        let id = match self.slots.iter().position(|slot| slot.field.is_none()) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.field = Some(field);
                FieldId {
                    index: index as u32,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    field: Some(field),
                });
                FieldId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        tracing::debug!(field = %id, "password field created");
        id
    }

    /// Destroy a field. Its sampler is stopped first and any queued
    /// notification for it is dropped.
    ///
    /// Returns false if the id did not resolve.
    pub fn remove_field(&mut self, id: FieldId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.hide(id);

        let verifiers = self.verifiers_of(id);
        let base = self.field(id).and_then(|field| field.base);

        let slot = &mut self.slots[id.index as usize];
        slot.field = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.events.retain(|event| event.field() != id);

        // Former partners fall back to the empty state
        for verifier in verifiers {
            self.refresh_pair(verifier);
        }
        if let Some(feedback) = base
            .and_then(|base| self.field_mut(base))
            .and_then(|field| field.feedback.as_mut())
        {
            feedback.apply(MatchState::Empty);
        }

        tracing::debug!(field = %id, "password field removed");
        true
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.field(id).is_some()
    }

    pub fn field(&self, id: FieldId) -> Option<&PasswordField> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.field.as_ref())
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut PasswordField> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.field.as_mut())
    }

    /// Ids of all live fields, in slot order.
    pub fn field_ids(&self) -> Vec<FieldId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.field.is_some())
            .map(|(index, slot)| FieldId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.field.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Verification pair
    // ========================================================================

    /// Make `verify` a verify field for `base`.
    ///
    /// Both fields receive hidden error/correct feedback actions. The pairing
    /// is permanent; a rejected call leaves every field untouched.
    pub fn enable_verify_mode(&mut self, verify: FieldId, base: FieldId) -> Result<(), FieldError> {
        if let Err(err) = self.check_pairing(verify, base) {
            tracing::warn!(verify = %verify, base = %base, error = %err, "verify mode rejected");
            return Err(err);
        }

        if let Some(field) = self.field_mut(verify) {
            field.base = Some(base);
            field.feedback = Some(FeedbackActions::new());
        }
        if let Some(field) = self.field_mut(base) {
            field.feedback = Some(FeedbackActions::new());
        }
        self.refresh_pair(verify);

        tracing::debug!(verify = %verify, base = %base, "verify mode enabled");
        Ok(())
    }

    fn check_pairing(&self, verify: FieldId, base: FieldId) -> Result<(), FieldError> {
        let verify_field = self.field(verify).ok_or(FieldError::UnknownField(verify))?;
        let base_field = self.field(base).ok_or(FieldError::UnknownField(base))?;

        if verify == base {
            return Err(FieldError::SelfPairing(verify));
        }
        if verify_field.is_verify_field() {
            return Err(FieldError::AlreadyVerifying(verify));
        }
        if self.verifier_of(verify).is_some() {
            return Err(FieldError::VerifyIsBase(verify));
        }
        if base_field.is_verify_field() {
            return Err(FieldError::BaseIsVerifyField(base));
        }
        if self.verifier_of(base).is_some() {
            return Err(FieldError::BaseAlreadyPaired(base));
        }
        Ok(())
    }

    /// Current match state of a verify field.
    ///
    /// None if `verify` is unknown or not a verify field.
    pub fn match_state(&self, verify: FieldId) -> Option<MatchState> {
        let field = self.field(verify)?;
        let base = field.base?;
        Some(MatchState::classify(
            field.text(),
            self.field(base).map(PasswordField::text),
        ))
    }

    /// The verify field paired with `base`, if any.
    pub fn verifier_of(&self, base: FieldId) -> Option<FieldId> {
        self.verifiers_of(base).into_iter().next()
    }

    fn verifiers_of(&self, base: FieldId) -> Vec<FieldId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                slot.field
                    .as_ref()
                    .is_some_and(|field| field.base == Some(base))
            })
            .map(|(index, slot)| FieldId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    /// The other end of a pair, if it is still alive.
    fn partner_of(&self, id: FieldId) -> Option<FieldId> {
        self.field(id)?
            .base
            .filter(|base| self.contains(*base))
            .or_else(|| self.verifier_of(id))
    }

    /// Recompute match state from scratch and push it into the feedback.
    fn refresh_pair(&mut self, verify: FieldId) {
        let Some(state) = self.match_state(verify) else {
            return;
        };
        let base = self.field(verify).and_then(|field| field.base);

        if let Some(field) = self.field_mut(verify) {
            field.style = FieldStyle::for_state(state);
            field
                .feedback
                .get_or_insert_with(FeedbackActions::new)
                .apply(state);
        }
        if let Some(feedback) = base
            .and_then(|base| self.field_mut(base))
            .and_then(|field| field.feedback.as_mut())
        {
            feedback.apply(state);
        }

        tracing::trace!(field = %verify, state = ?state, "match state recomputed");
    }

    fn text_changed(&mut self, id: FieldId) {
        if self.field(id).is_some_and(PasswordField::is_verify_field) {
            self.refresh_pair(id);
        }
        for verifier in self.verifiers_of(id) {
            self.refresh_pair(verifier);
        }
    }

    // ========================================================================
    // Text
    // ========================================================================

    pub fn text(&self, id: FieldId) -> Option<&str> {
        self.field(id).map(PasswordField::text)
    }

    pub fn insert_char(&mut self, id: FieldId, c: char) -> bool {
        self.edit(id, |buffer| buffer.insert_char(c))
    }

    pub fn insert_str(&mut self, id: FieldId, s: &str) -> bool {
        self.edit(id, |buffer| buffer.insert_str(s))
    }

    pub fn backspace(&mut self, id: FieldId) -> bool {
        self.edit(id, SecretBuffer::backspace)
    }

    pub fn delete_char(&mut self, id: FieldId) -> bool {
        self.edit(id, SecretBuffer::delete_char)
    }

    /// Replace the content of one field without touching its partner.
    pub fn set_text(&mut self, id: FieldId, text: &str) -> bool {
        self.edit(id, |buffer| buffer.replace(text))
    }

    pub fn clear(&mut self, id: FieldId) -> bool {
        self.edit(id, SecretBuffer::clear)
    }

    pub fn move_cursor_left(&mut self, id: FieldId) {
        self.move_cursor(id, SecretBuffer::move_cursor_left);
    }

    pub fn move_cursor_right(&mut self, id: FieldId) {
        self.move_cursor(id, SecretBuffer::move_cursor_right);
    }

    pub fn move_cursor_home(&mut self, id: FieldId) {
        self.move_cursor(id, SecretBuffer::move_cursor_home);
    }

    pub fn move_cursor_end(&mut self, id: FieldId) {
        self.move_cursor(id, SecretBuffer::move_cursor_end);
    }

    /// Inject a password from a credential-fill source.
    ///
    /// The field and every verify field paired to it receive the same
    /// content, then match state is recomputed as for typed input.
    pub fn autocomplete_password(&mut self, id: FieldId, password: &str) {
        let Some(field) = self.field_mut(id) else {
            tracing::debug!(field = %id, "autocomplete on unknown field ignored");
            return;
        };
        field.buffer.replace(password);

        for verifier in self.verifiers_of(id) {
            if let Some(field) = self.field_mut(verifier) {
                field.buffer.replace(password);
            }
        }
        self.text_changed(id);

        tracing::debug!(
            field = %id,
            len = password.chars().count(),
            "password autocompleted"
        );
    }

    fn edit(&mut self, id: FieldId, op: impl FnOnce(&mut SecretBuffer) -> bool) -> bool {
        let Some(field) = self.field_mut(id) else {
            tracing::debug!(field = %id, "edit on unknown field ignored");
            return false;
        };
        let changed = op(&mut field.buffer);
        if changed {
            self.text_changed(id);
        }
        changed
    }

    fn move_cursor(&mut self, id: FieldId, op: impl FnOnce(&mut SecretBuffer)) {
        if let Some(field) = self.field_mut(id) {
            op(&mut field.buffer);
        }
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Set the display mode of a field and mirror it to its partner.
    ///
    /// Each affected field emits its own `ShowPasswordChanged`, including
    /// when the value did not change.
    pub fn set_show_password(&mut self, id: FieldId, show: bool) {
        if !self.apply_show_password(id, show) {
            tracing::debug!(field = %id, "set_show_password on unknown field ignored");
            return;
        }
        if let Some(partner) = self.partner_of(id) {
            self.apply_show_password(partner, show);
        }
    }

    /// Flip the display mode. Returns the new visibility.
    pub fn toggle_show_password(&mut self, id: FieldId) -> Option<bool> {
        let show = !self.field(id)?.is_password_visible();
        self.set_show_password(id, show);
        Some(show)
    }

    pub fn is_password_visible(&self, id: FieldId) -> bool {
        self.field(id).is_some_and(PasswordField::is_password_visible)
    }

    fn apply_show_password(&mut self, id: FieldId, show: bool) -> bool {
        let Some(field) = self.field_mut(id) else {
            return false;
        };
        let show = field.visibility.set_show_password(show);
        self.events
            .push_back(FieldEvent::ShowPasswordChanged { field: id, show });
        true
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// The field became visible: start its sampler and refresh feedback.
    pub fn show(&mut self, id: FieldId, now: Instant) {
        let Some(field) = self.field_mut(id) else {
            return;
        };
        field.shown = true;
        field.sampler.start(now);
        self.text_changed(id);
        tracing::debug!(field = %id, "password field shown");
    }

    /// The field was hidden: stop its sampler and drop the Caps Lock warning.
    ///
    /// Safe to call on hidden or removed fields.
    pub fn hide(&mut self, id: FieldId) {
        let Some(field) = self.field_mut(id) else {
            return;
        };
        let was_shown = field.shown;
        field.shown = false;
        field.sampler.stop();
        field.capslock_warning = false;
        self.events.retain(|event| {
            !matches!(event, FieldEvent::CapslockToggled { field, .. } if *field == id)
        });
        if was_shown {
            tracing::debug!(field = %id, "password field hidden");
        }
    }

    /// Hide every field, e.g. while tearing down the screen.
    pub fn hide_all(&mut self) {
        for id in self.field_ids() {
            self.hide(id);
        }
    }

    pub fn is_shown(&self, id: FieldId) -> bool {
        self.field(id).is_some_and(PasswordField::is_shown)
    }

    /// Number of fields whose sampler is running.
    pub fn active_sampler_count(&self) -> usize {
        self.slots
            .iter()
            .filter_map(|slot| slot.field.as_ref())
            .filter(|field| field.sampler_running())
            .count()
    }

    /// Drive the Caps Lock samplers of all shown fields.
    pub fn tick(&mut self, now: Instant) {
        let probe = self.probe.as_ref();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let generation = slot.generation;
            let Some(field) = slot.field.as_mut() else {
                continue;
            };
            if !field.shown {
                continue;
            }
            if let Some(on) = field.sampler.poll(now, probe) {
                field.capslock_warning = on;
                let id = FieldId {
                    index: index as u32,
                    generation,
                };
                tracing::debug!(field = %id, on, "caps lock toggled");
                self.events
                    .push_back(FieldEvent::CapslockToggled { field: id, on });
            }
        }
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Drain queued notifications in emission order.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        self.events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}
