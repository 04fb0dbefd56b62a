//! Terminal setup and teardown functions.

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste, PopKeyboardEnhancementFlags},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter the alternate screen with bracketed paste, so a pasted password
/// arrives as one `Event::Paste` instead of a key storm.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableBracketedPaste)
}

/// Leave TUI mode and restore the terminal. Never fails; safe to call
/// more than once.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();

    let _ = execute!(writer, DisableBracketedPaste, LeaveAlternateScreen);

    // Some terminals only honour the Kitty reset after leaving the
    // alternate screen. CSI = 0 u clears all enhancement flags.
    let _ = write!(writer, "\x1b[=0u");
    let _ = writer.flush();

    let _ = execute!(writer, Show);
}

/// Best-effort restore used from the panic hook.
pub fn emergency_restore() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    leave_tui_mode(&mut stdout);
}
