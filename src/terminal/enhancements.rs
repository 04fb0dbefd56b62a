//! Keyboard enhancement support (Kitty protocol).
//!
//! The Kitty protocol is the only way a terminal tells us about lock keys:
//! with "report all keys as escape codes" active, every key event carries
//! `KeyEventState::CAPS_LOCK` while Caps Lock is on. Terminals without the
//! protocol ignore the request, and the Caps Lock warning is simply never
//! shown.
//!
//! Alternate-key reporting makes the terminal send the shifted codepoint
//! along with the base key, so Shift+s arrives as 'S' rather than 's'.

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use std::io::Write;

/// Flags requested from the terminal.
pub fn requested_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
}

/// Whether the terminal will report lock-key state.
///
/// Must be called in raw mode; errors count as unsupported.
pub fn lock_state_reporting_supported() -> bool {
    supports_keyboard_enhancement().unwrap_or(false)
}

/// Push keyboard enhancement flags onto the stack.
///
/// Returns `true` if the push succeeded, `false` otherwise.
pub fn push_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(writer, PushKeyboardEnhancementFlags(requested_flags())).is_ok()
}

/// Pop keyboard enhancement flags from the stack.
pub fn pop_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(writer, PopKeyboardEnhancementFlags).is_ok()
}
