//! A single password field and the state it owns.

use std::time::Duration;

use super::buffer::SecretBuffer;
use super::capslock::CapsLockSampler;
use super::feedback::{FeedbackActions, FieldStyle};
use super::form::FieldId;
use super::visibility::{DisplayMode, RevealAction, VisibilityController};

/// Single-line maskable password input.
///
/// Fields are created and mutated through [`super::PasswordForm`], which
/// owns pairing and notification delivery. This type exposes read access for
/// rendering and assertions.
#[derive(Debug, Clone)]
pub struct PasswordField {
    pub(super) buffer: SecretBuffer,
    pub(super) visibility: VisibilityController,
    /// Error/correct icons, present once the field takes part in a pair
    pub(super) feedback: Option<FeedbackActions>,
    pub(super) style: FieldStyle,
    /// Non-owning link to the base field when this is a verify field
    pub(super) base: Option<FieldId>,
    pub(super) capslock_warning: bool,
    pub(super) sampler: CapsLockSampler,
    pub(super) shown: bool,
}

impl PasswordField {
    /// Empty, unpaired, masked, hidden.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            buffer: SecretBuffer::new(),
            visibility: VisibilityController::new(),
            feedback: None,
            style: FieldStyle::Neutral,
            base: None,
            capslock_warning: false,
            sampler: CapsLockSampler::new(poll_interval),
            shown: false,
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &SecretBuffer {
        &self.buffer
    }

    pub fn is_password_visible(&self) -> bool {
        self.visibility.is_password_visible()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.visibility.mode()
    }

    pub fn reveal_action(&self) -> RevealAction {
        self.visibility.reveal_action()
    }

    pub fn feedback_actions(&self) -> Option<&FeedbackActions> {
        self.feedback.as_ref()
    }

    pub fn style(&self) -> FieldStyle {
        self.style
    }

    /// The base field this field verifies against, if any.
    pub fn base(&self) -> Option<FieldId> {
        self.base
    }

    pub fn is_verify_field(&self) -> bool {
        self.base.is_some()
    }

    /// Whether the Caps Lock warning action is currently displayed.
    pub fn capslock_warning_visible(&self) -> bool {
        self.capslock_warning
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn sampler_running(&self) -> bool {
        self.sampler.is_running()
    }
}
