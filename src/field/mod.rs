//! Password fields with reveal toggle, verify pairing and Caps Lock warning.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────── PasswordForm ───────────────────────────┐
//! │                                                                     │
//! │  ┌──────────────┐   FieldId (non-owning)   ┌──────────────┐         │
//! │  │ verify field │ ───────────────────────▶ │  base field  │         │
//! │  └──────┬───────┘                          └──────┬───────┘         │
//! │         │ edits on either side                    │                 │
//! │         └──────────────┬──────────────────────────┘                 │
//! │                        ▼                                            │
//! │              MatchState::classify ──▶ FeedbackActions / FieldStyle  │
//! │                                                                     │
//! │  show ──▶ CapsLockSampler::start      tick ──▶ CapsLockProbe        │
//! │  hide ──▶ CapsLockSampler::stop                                     │
//! └──────────────────────────────┬──────────────────────────────────────┘
//!                                ▼
//!                   FieldEvent queue (take_events)
//! ```
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//! use pwfield::field::{MatchState, MockCapsLock, PasswordForm};
//!
//! let mut form = PasswordForm::new(Arc::new(MockCapsLock::new()));
//! let base = form.add_field();
//! let verify = form.add_field();
//! form.enable_verify_mode(verify, base).unwrap();
//!
//! form.show(base, Instant::now());
//! form.show(verify, Instant::now());
//! form.insert_str(base, "Sword1");
//! form.insert_str(verify, "Sword1");
//! assert_eq!(form.match_state(verify), Some(MatchState::Match));
//! ```

mod buffer;
mod capslock;
mod events;
mod feedback;
mod form;
mod password_field;
mod visibility;

pub use buffer::SecretBuffer;
pub use capslock::{
    CapsLockProbe, CapsLockSampler, MockCapsLock, TerminalLockState, UnsupportedProbe,
    DEFAULT_POLL_INTERVAL_MS,
};
pub use events::FieldEvent;
pub use feedback::{FeedbackAction, FeedbackActions, FieldStyle, MatchState};
pub use form::{FieldId, PasswordForm};
pub use password_field::PasswordField;
pub use visibility::{DisplayMode, RevealAction, VisibilityController};
