//! Error taxonomy for step operations.
//!
//! Precondition failures are ordinary user-facing refusals; the session is
//! untouched. Everything else means the session and the buffer have
//! desynchronized, the session is abandoned, and the caller should treat it
//! as a bug rather than show the message to the user.

use thiserror::Error;

/// Why a step operation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// More than one selection/cursor is active; stepping needs exactly one.
    #[error("cannot step with multiple selections")]
    MultipleSelections,

    /// No selection and no previously detected span to step through.
    #[error("nothing to step through: select text or insert a span first")]
    NothingToStep,

    /// The buffer rejected an edit the session issued. The session assumed
    /// exclusive control of the span, so its state is unrecoverable.
    #[error("the buffer rejected an edit; the stepping session was abandoned")]
    EditRejected,

    /// Session state no longer matches the buffer (e.g. the hidden
    /// remainder diverged from the token sequence).
    #[error("stepping session out of sync with the buffer; session abandoned")]
    Desynchronized,
}

impl StepError {
    /// Precondition errors are surfaced to the user as a message; the rest
    /// indicate a corrupted session and belong in a log or crash report.
    pub fn is_precondition(&self) -> bool {
        matches!(self, StepError::MultipleSelections | StepError::NothingToStep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        assert!(StepError::MultipleSelections.is_precondition());
        assert!(StepError::NothingToStep.is_precondition());
        assert!(!StepError::EditRejected.is_precondition());
        assert!(!StepError::Desynchronized.is_precondition());
    }
}
