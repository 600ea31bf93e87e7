//! Auth outcome sum type
//!
//! The tagged result of a sign-in or sign-out attempt, produced by the
//! auth session use case and consumed by the presentation state holders.
//! Never persisted.

/// Result of a sign-in or sign-out attempt
///
/// Every failure inside the use case is caught at its boundary and
/// converted into [`AuthOutcome::Error`] with a human-readable message;
/// nothing is allowed to propagate into the presentation layer as a panic
/// or an unhandled error. `Loading` is emitted by state holders while an
/// attempt is in flight; the use case itself only ever returns `Success`
/// or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The operation completed and the session record was updated
    Success,
    /// The operation failed; the message is suitable for display
    Error(String),
    /// An operation is in flight (state-holder only)
    Loading,
}

impl AuthOutcome {
    /// Returns true for the `Success` variant
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    /// Returns the error message, if this is an `Error`
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthOutcome::Success => write!(f, "success"),
            AuthOutcome::Error(msg) => write!(f, "error: {}", msg),
            AuthOutcome::Loading => write!(f, "loading"),
        }
    }
}
