//! Terminal management with RAII cleanup.
//!
//! `TerminalManager` puts the terminal into raw/alternate-screen mode,
//! requests Kitty keyboard enhancements (needed for Caps Lock detection) and
//! restores everything when dropped, whether the launcher exits normally or
//! unwinds.
//!
//! ```no_run
//! use pwfield::terminal::TerminalManager;
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut term_manager = TerminalManager::new()?;
//!     let lock_state_reported = term_manager.lock_state_reporting();
//!     let terminal = term_manager.terminal();
//!     // ... run the event loop ...
//!     Ok(())
//! }
//! ```

mod enhancements;
mod panic;
mod setup;

pub use enhancements::{
    lock_state_reporting_supported, pop_keyboard_enhancements, push_keyboard_enhancements,
};
pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Owns the ratatui terminal and restores the tty on drop.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    lock_state_reporting: bool,
    restored: bool,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen, request keyboard
    /// enhancements and clear the screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;

        let lock_state_reporting = lock_state_reporting_supported();
        if lock_state_reporting {
            push_keyboard_enhancements(&mut stdout);
        }
        tracing::info!(lock_state_reporting, "terminal initialised");

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            lock_state_reporting,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Whether key events will carry Caps Lock state.
    pub fn lock_state_reporting(&self) -> bool {
        self.lock_state_reporting
    }

    /// Restore the terminal now. Later calls (and drop) are no-ops.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if self.lock_state_reporting {
            pop_keyboard_enhancements(self.terminal.backend_mut());
        }
        leave_tui_mode(self.terminal.backend_mut());
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        self.restore();
    }
}
