//! Match state classification and the feedback it drives.
//!
//! Match state is derived on demand from the two fields' current text and
//! never stored, so feedback can not go stale across edits.

/// Result of comparing a verify field against its base field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// The verify field has no content yet, or the base is gone
    Empty,
    /// Non-empty and byte-for-byte equal to the base
    Match,
    /// Non-empty and different from the base
    Mismatch,
}

impl MatchState {
    /// Classify a verify/base pair.
    ///
    /// Comparison is exact and case-sensitive. No trimming and no Unicode
    /// normalization: strings that only look alike are a mismatch.
    pub fn classify(verify: &str, base: Option<&str>) -> Self {
        let Some(base) = base else {
            return MatchState::Empty;
        };
        if verify.is_empty() {
            MatchState::Empty
        } else if verify.as_bytes() == base.as_bytes() {
            MatchState::Match
        } else {
            MatchState::Mismatch
        }
    }
}

/// Border/background styling of a verify field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStyle {
    #[default]
    Neutral,
    CorrectSoFar,
    Error,
}

impl FieldStyle {
    pub fn for_state(state: MatchState) -> Self {
        match state {
            MatchState::Empty => FieldStyle::Neutral,
            MatchState::Match => FieldStyle::CorrectSoFar,
            MatchState::Mismatch => FieldStyle::Error,
        }
    }
}

/// A single feedback icon attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackAction {
    visible: bool,
}

impl FeedbackAction {
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The "error" and "correct" icons a paired field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackActions {
    error: FeedbackAction,
    correct: FeedbackAction,
}

impl FeedbackActions {
    /// Both icons start hidden.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, state: MatchState) {
        let (error, correct) = match state {
            MatchState::Empty => (false, false),
            MatchState::Match => (false, true),
            MatchState::Mismatch => (true, false),
        };
        self.error.visible = error;
        self.correct.visible = correct;
    }

    pub fn error(&self) -> FeedbackAction {
        self.error
    }

    pub fn correct(&self) -> FeedbackAction {
        self.correct
    }
}
