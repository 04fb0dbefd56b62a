//! Errors from misusing the password field API.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::field::FieldId;

/// Rejected verify-mode pairings.
///
/// These are programming errors. The form refuses the call and leaves every
/// field as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The id does not resolve to a live field
    #[error("field {0} does not exist")]
    UnknownField(FieldId),

    /// A field was asked to verify itself
    #[error("field {0} can not verify itself")]
    SelfPairing(FieldId),

    /// Verify mode was already enabled on this field
    #[error("field {0} is already in verify mode")]
    AlreadyVerifying(FieldId),

    /// The would-be verify field is itself the base of a pair
    #[error("field {0} is the base of another field and can not enter verify mode")]
    VerifyIsBase(FieldId),

    /// The would-be base is a verify field
    #[error("field {0} is a verify field and can not serve as a base")]
    BaseIsVerifyField(FieldId),

    /// The base already has a verify field
    #[error("field {0} already has a verify field")]
    BaseAlreadyPaired(FieldId),
}

impl FieldError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Client
    }
}
