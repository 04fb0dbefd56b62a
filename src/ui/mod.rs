//! UI rendering for the pwfield launcher
//!
//! Two screens share one centered panel:
//! - Unlock: one password field for the database at the front of the queue
//! - NewPassword: a base field and its verify field
//!
//! Below the fields a status line shows the Caps Lock warning or the last
//! transient message, followed by the key hints.

mod password_field;
mod theme;

pub use password_field::PasswordFieldWidget;
pub use theme::{
    COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_CORRECT_SO_FAR, COLOR_ERROR, COLOR_WARNING,
    DEFAULT_MASK_CHAR, ICON_CAPSLOCK, ICON_CORRECT, ICON_ERROR, ICON_REVEAL_OFF, ICON_REVEAL_ON,
};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus, Screen};
use crate::field::FieldId;
use theme::{COLOR_DIM, COLOR_TEXT};

/// Widest the panel grows on large terminals
const PANEL_MAX_WIDTH: u16 = 64;

/// Status line text while Caps Lock is reported on
pub const CAPSLOCK_WARNING: &str = "Caps Lock is on";

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI based on current screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_panel(frame.area());
    match app.screen {
        Screen::Unlock => render_unlock(frame, app, area),
        Screen::NewPassword => render_new_password(frame, app, area),
        Screen::Done => {}
    }
}

fn centered_panel(area: Rect) -> Rect {
    let width = area.width.min(PANEL_MAX_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect { x, width, ..area }
}

fn render_unlock(frame: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = app.current_prompt() else {
        return;
    };
    let [header, field, status, hints] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Unlock database",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            prompt.path.display().to_string(),
            Style::default().fg(COLOR_DIM),
        )),
    ];
    if app.pending_prompts() > 1 {
        lines.push(Line::from(Span::styled(
            format!("{} more queued", app.pending_prompts() - 1),
            Style::default().fg(COLOR_DIM),
        )));
    }
    frame.render_widget(Paragraph::new(lines), header);

    render_field(frame, app, prompt.field, "Password", true, field);
    render_status(frame, app, status);
    render_hints(frame, false, hints);
}

fn render_new_password(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pair) = app.new_password_pair() else {
        return;
    };
    let [header, base, verify, status, hints] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "New master password",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ))),
        header,
    );
    render_field(frame, app, pair.base, "Password", app.focus == Focus::Base, base);
    render_field(
        frame,
        app,
        pair.verify,
        "Repeat password",
        app.focus == Focus::Verify,
        verify,
    );
    render_status(frame, app, status);
    render_hints(frame, true, hints);
}

fn render_field(frame: &mut Frame, app: &App, id: FieldId, title: &str, focused: bool, area: Rect) {
    if let Some(field) = app.form.field(id) {
        let widget = PasswordFieldWidget::new(field, title, focused).mask_char(app.mask_char());
        frame.render_widget(widget, area);
    }
}

/// Caps Lock warning wins over transient messages.
fn status_line(app: &App) -> Option<Line<'_>> {
    if app.capslock_on() {
        return Some(Line::from(vec![
            Span::styled(ICON_CAPSLOCK, Style::default().fg(COLOR_WARNING)),
            Span::raw(" "),
            Span::styled(CAPSLOCK_WARNING, Style::default().fg(COLOR_WARNING)),
        ]));
    }
    app.status()
        .map(|status| Line::from(Span::styled(status, Style::default().fg(COLOR_TEXT))))
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(line) = status_line(app) {
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_hints(frame: &mut Frame, pair: bool, area: Rect) {
    let hints = if pair {
        "Enter accept · Tab switch · ^R reveal · ^Y fill · Esc quit"
    } else {
        "Enter unlock · ^R reveal · ^Y fill · Esc quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(COLOR_DIM))),
        area,
    );
}
