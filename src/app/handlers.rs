//! Key and paste handling for the App.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
use secrecy::ExposeSecret;

use super::App;

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Esc => self.quit(),
            KeyCode::Char('r') if ctrl => self.toggle_reveal(),
            KeyCode::Char('y') if ctrl => self.fill_from_credentials(),
            KeyCode::Tab | KeyCode::BackTab => self.cycle_focus(),
            KeyCode::Enter => self.submit(now),
            _ => self.edit_focused(key, ctrl || alt),
        }

        self.process_events();
        self.mark_dirty();
    }

    /// Insert bracketed-paste text into the focused field.
    ///
    /// Line breaks at the end are dropped, so copying a whole line works.
    pub fn handle_paste(&mut self, text: &str) {
        let Some(id) = self.focused_field() else {
            return;
        };
        let text = text.trim_end_matches(['\r', '\n']);
        if self.form.insert_str(id, text) {
            self.status = None;
        }
        self.process_events();
        self.mark_dirty();
    }

    fn edit_focused(&mut self, key: KeyEvent, modified: bool) {
        let Some(id) = self.focused_field() else {
            return;
        };
        let changed = match key.code {
            KeyCode::Char(_) if modified => false,
            KeyCode::Char(_) => match typed_char(&key) {
                Some(c) => self.form.insert_char(id, c),
                None => false,
            },
            KeyCode::Backspace => self.form.backspace(id),
            KeyCode::Delete => self.form.delete_char(id),
            KeyCode::Left => {
                self.form.move_cursor_left(id);
                false
            }
            KeyCode::Right => {
                self.form.move_cursor_right(id);
                false
            }
            KeyCode::Home => {
                self.form.move_cursor_home(id);
                false
            }
            KeyCode::End => {
                self.form.move_cursor_end(id);
                false
            }
            _ => false,
        };
        if changed {
            self.status = None;
        }
    }

    fn toggle_reveal(&mut self) {
        if let Some(id) = self.focused_field() {
            self.form.toggle_show_password(id);
        }
    }

    fn fill_from_credentials(&mut self) {
        let Some(id) = self.focused_field() else {
            return;
        };
        match self.credentials.read_password() {
            Some(password) => {
                self.form.autocomplete_password(id, password.expose_secret());
                self.set_status("Password filled from clipboard");
            }
            None => self.set_status("Clipboard holds no password"),
        }
    }
}

/// The character a key press types.
///
/// With the Kitty protocol and alternate-key reporting, crossterm already
/// substitutes the shifted codepoint and clears SHIFT. When SHIFT is still
/// set the terminal sent only the base key, so the shift is applied here.
/// Caps Lock only affects letters and is cancelled by Shift.
fn typed_char(key: &KeyEvent) -> Option<char> {
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let caps = key.state.contains(KeyEventState::CAPS_LOCK);

    if c.is_alphabetic() {
        if !c.is_lowercase() {
            return Some(c);
        }
        return Some(if shift != caps { to_upper(c) } else { c });
    }
    if shift {
        return Some(shifted_symbol(c).unwrap_or(c));
    }
    Some(c)
}

fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        // Multi-char uppercase (e.g. 'ß') stays as typed
        _ => c,
    }
}

/// US layout shift map for keys reported without their shifted codepoint.
fn shifted_symbol(c: char) -> Option<char> {
    let shifted = match c {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '`' => '~',
        _ => return None,
    };
    Some(shifted)
}
