//! Masked/plaintext display mode of a single field.

/// How the field renders its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Each character is drawn as a mask glyph
    #[default]
    Masked,
    /// Characters are drawn literally
    Plaintext,
}

impl DisplayMode {
    pub fn from_show(show: bool) -> Self {
        if show {
            DisplayMode::Plaintext
        } else {
            DisplayMode::Masked
        }
    }

    pub fn is_plaintext(self) -> bool {
        self == DisplayMode::Plaintext
    }
}

/// The user-facing "reveal password" toggle attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealAction {
    checked: bool,
}

impl RevealAction {
    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

/// Owns the display mode of one field and keeps the reveal action in sync.
///
/// Changing the mode never touches the field's text; masking is purely a
/// rendering property.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    mode: DisplayMode,
    reveal: RevealAction,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display mode and return the value to announce.
    ///
    /// Calling with the current state is allowed; the caller still emits a
    /// notification for it.
    pub fn set_show_password(&mut self, show: bool) -> bool {
        self.mode = DisplayMode::from_show(show);
        self.reveal.checked = show;
        show
    }

    pub fn is_password_visible(&self) -> bool {
        self.mode.is_plaintext()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn reveal_action(&self) -> RevealAction {
        self.reveal
    }
}
