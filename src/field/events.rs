//! Notifications a form delivers to its owner.

use super::form::FieldId;

/// The only events a consumer (parent screen, Caps Lock warning label)
/// observes from password fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// Display mode was set; fires even when the value did not change
    ShowPasswordChanged { field: FieldId, show: bool },
    /// Caps Lock changed state while the field was shown
    CapslockToggled { field: FieldId, on: bool },
}

impl FieldEvent {
    /// The field the event belongs to.
    pub fn field(&self) -> FieldId {
        match self {
            FieldEvent::ShowPasswordChanged { field, .. }
            | FieldEvent::CapslockToggled { field, .. } => *field,
        }
    }
}
