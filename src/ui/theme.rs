//! Color theme and glyphs for password fields.

use ratatui::style::Color;

// ============================================================================
// Borders and text
// ============================================================================

/// Border of an unfocused neutral field
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused neutral field
pub const COLOR_BORDER_FOCUSED: Color = Color::White;

/// Field text and mask glyphs
pub const COLOR_TEXT: Color = Color::White;

/// Dim text for hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Cursor block
pub const COLOR_CURSOR: Color = Color::Gray;

// ============================================================================
// Verification feedback
// ============================================================================

/// Verify field matches its base (amber)
pub const COLOR_CORRECT_SO_FAR: Color = Color::Rgb(255, 205, 15);

/// Verify field differs from its base (soft red)
pub const COLOR_ERROR: Color = Color::Rgb(255, 125, 125);

/// Background tint behind the text of a matching verify field
pub const COLOR_CORRECT_SO_FAR_BG: Color = Color::Rgb(60, 50, 10);

/// Background tint behind the text of a mismatching verify field
pub const COLOR_ERROR_BG: Color = Color::Rgb(60, 25, 25);

/// Correct icon
pub const COLOR_ICON_CORRECT: Color = Color::Rgb(4, 181, 117);

/// Caps Lock warning icon and label
pub const COLOR_WARNING: Color = Color::Yellow;

// ============================================================================
// Glyphs
// ============================================================================

pub const ICON_CAPSLOCK: &str = "⇪";
pub const ICON_ERROR: &str = "✗";
pub const ICON_CORRECT: &str = "✓";
pub const ICON_REVEAL_ON: &str = "◉";
pub const ICON_REVEAL_OFF: &str = "○";

/// Default glyph drawn for masked characters
pub const DEFAULT_MASK_CHAR: char = '●';
