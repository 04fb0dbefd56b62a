//! Rendering of a [`PasswordField`] into a ratatui buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{
    COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_CORRECT_SO_FAR, COLOR_CORRECT_SO_FAR_BG,
    COLOR_CURSOR, COLOR_ERROR, COLOR_ERROR_BG, COLOR_ICON_CORRECT, COLOR_TEXT, COLOR_WARNING,
    DEFAULT_MASK_CHAR, ICON_CAPSLOCK, ICON_CORRECT, ICON_ERROR, ICON_REVEAL_OFF, ICON_REVEAL_ON,
};
use crate::field::{FieldStyle, PasswordField};

/// A renderable view of a password field.
///
/// Layout of the inner line:
///
/// ```text
/// │●●●●●●█               ⇪ ✗ ○│
/// └ text / mask + cursor ┘└icons┘
/// ```
pub struct PasswordFieldWidget<'a> {
    field: &'a PasswordField,
    title: &'a str,
    focused: bool,
    mask_char: char,
}

impl<'a> PasswordFieldWidget<'a> {
    pub fn new(field: &'a PasswordField, title: &'a str, focused: bool) -> Self {
        Self {
            field,
            title,
            focused,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }

    pub fn mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    fn border_color(&self) -> Color {
        match self.field.style() {
            FieldStyle::CorrectSoFar => COLOR_CORRECT_SO_FAR,
            FieldStyle::Error => COLOR_ERROR,
            FieldStyle::Neutral if self.focused => COLOR_BORDER_FOCUSED,
            FieldStyle::Neutral => COLOR_BORDER,
        }
    }

    fn background(&self) -> Option<Color> {
        match self.field.style() {
            FieldStyle::CorrectSoFar => Some(COLOR_CORRECT_SO_FAR_BG),
            FieldStyle::Error => Some(COLOR_ERROR_BG),
            FieldStyle::Neutral => None,
        }
    }

    /// Visible action icons, left to right.
    fn icons(&self) -> Vec<(&'static str, Color)> {
        let mut icons = Vec::new();
        if self.field.capslock_warning_visible() {
            icons.push((ICON_CAPSLOCK, COLOR_WARNING));
        }
        if let Some(actions) = self.field.feedback_actions() {
            if actions.error().is_visible() {
                icons.push((ICON_ERROR, COLOR_ERROR));
            }
            if actions.correct().is_visible() {
                icons.push((ICON_CORRECT, COLOR_ICON_CORRECT));
            }
        }
        let reveal = if self.field.reveal_action().is_checked() {
            ICON_REVEAL_ON
        } else {
            ICON_REVEAL_OFF
        };
        icons.push((reveal, COLOR_TEXT));
        icons
    }

    /// Draw icons right-aligned on the line; returns the columns used.
    fn render_icons(&self, line: Rect, buf: &mut Buffer) -> u16 {
        let icons = self.icons();
        let width: u16 = icons
            .iter()
            .map(|(icon, _)| icon.width() as u16 + 1)
            .sum();
        if width >= line.width {
            return 0;
        }

        let mut x = line.right() - width + 1;
        for (icon, color) in icons {
            buf.set_string(x, line.y, icon, Style::default().fg(color));
            x += icon.width() as u16 + 1;
        }
        width
    }

    /// Columns one mask glyph occupies.
    fn mask_width(&self) -> usize {
        self.mask_char.width().unwrap_or(1).max(1)
    }

    /// First visible character, chosen so the cursor cell fits in `width`
    /// columns.
    fn scroll(&self, width: usize) -> usize {
        let buffer = self.field.buffer();
        let cursor = buffer.cursor();
        if !self.field.is_password_visible() {
            return (cursor + 1).saturating_sub(width / self.mask_width());
        }

        let text = self.field.text();
        let mut used = text
            .chars()
            .nth(cursor)
            .and_then(|c| c.width())
            .unwrap_or(1)
            .max(1);
        let mut scroll = cursor;
        for c in text.chars().rev().skip(buffer.char_len() - cursor) {
            let width_of = c.width().unwrap_or(0);
            if used + width_of > width {
                break;
            }
            used += width_of;
            scroll -= 1;
        }
        scroll
    }

    fn render_masked(&self, line: Rect, buf: &mut Buffer, scroll: usize) {
        let capacity = line.width as usize / self.mask_width();
        let count = self
            .field
            .buffer()
            .char_len()
            .saturating_sub(scroll)
            .min(capacity);
        let mask: String = std::iter::repeat(self.mask_char).take(count).collect();
        buf.set_string(line.x, line.y, mask, Style::default().fg(COLOR_TEXT));
    }

    fn render_plaintext(&self, line: Rect, buf: &mut Buffer, scroll: usize) {
        let style = Style::default().fg(COLOR_TEXT);
        let mut x = line.x;
        for c in self.field.text().chars().skip(scroll) {
            let width = c.width().unwrap_or(0) as u16;
            if x + width > line.right() {
                break;
            }
            buf.set_string(x, line.y, c.to_string(), style);
            x += width;
        }
    }

    fn render_cursor(&self, line: Rect, buf: &mut Buffer, scroll: usize) {
        let cursor = self.field.buffer().cursor();
        let plaintext = self.field.is_password_visible();

        let (offset, under) = if plaintext {
            let offset: usize = self
                .field
                .text()
                .chars()
                .skip(scroll)
                .take(cursor - scroll)
                .map(|c| c.width().unwrap_or(0))
                .sum();
            let under = self.field.text().chars().nth(cursor).unwrap_or(' ');
            (offset, under)
        } else {
            let under = if cursor < self.field.buffer().char_len() {
                self.mask_char
            } else {
                ' '
            };
            ((cursor - scroll) * self.mask_width(), under)
        };

        if offset + under.width().unwrap_or(1).max(1) > line.width as usize {
            return;
        }
        buf.set_string(
            line.x + offset as u16,
            line.y,
            under.to_string(),
            Style::default().fg(Color::Black).bg(COLOR_CURSOR),
        );
    }
}

impl Widget for PasswordFieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()))
            .title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let line = Rect {
            height: 1,
            ..inner
        };
        if let Some(bg) = self.background() {
            buf.set_style(line, Style::default().bg(bg));
        }

        let icons_width = self.render_icons(line, buf);
        let text_width = line.width.saturating_sub(icons_width + 1);
        if text_width == 0 {
            return;
        }
        let text_line = Rect {
            width: text_width,
            ..line
        };

        let masked = !self.field.is_password_visible();
        if masked && (text_width as usize) < self.mask_width() {
            return;
        }

        // Keep the cursor inside the visible window
        let scroll = self.scroll(text_width as usize);

        if masked {
            self.render_masked(text_line, buf, scroll);
        } else {
            self.render_plaintext(text_line, buf, scroll);
        }

        if self.focused {
            self.render_cursor(text_line, buf, scroll);
        }
    }
}
