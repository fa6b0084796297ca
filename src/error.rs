//! Transition errors.

use thiserror::Error;

/// Error type returned by event handlers.
///
/// Boxed so handlers can `?` anything, including a nested
/// [`TransitionError`] from a re-entrant `transition` call.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A transition request that breaks a tree invariant.
///
/// Checked before anything is mutated, so a rejected request leaves the
/// tree exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidTransition {
    #[error("can't transition '{parent}' to the same state '{state}'")]
    SameState { parent: String, state: String },

    #[error("can't transition to '{state}': it already has parent '{parent}'")]
    AlreadyParented { state: String, parent: String },

    #[error("can't attach '{state}' beneath '{parent}': it is that node or one of its ancestors")]
    WouldCycle { state: String, parent: String },
}

/// Errors that can occur during a transition or an event dispatch.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid transition: {0}")]
    Invalid(#[from] InvalidTransition),

    /// A handler failed. Dispatch stopped at that handler; any structural
    /// swap that already happened stays in place.
    #[error("'{event}' handler on '{state}' failed: {source}")]
    Handler {
        event: String,
        state: String,
        #[source]
        source: HandlerError,
    },
}

impl TransitionError {
    /// The invariant violation, if this error is one.
    pub fn invalid(&self) -> Option<&InvalidTransition> {
        match self {
            Self::Invalid(invalid) => Some(invalid),
            Self::Handler { .. } => None,
        }
    }

    pub fn is_same_state(&self) -> bool {
        matches!(self, Self::Invalid(InvalidTransition::SameState { .. }))
    }

    pub fn is_already_parented(&self) -> bool {
        matches!(self, Self::Invalid(InvalidTransition::AlreadyParented { .. }))
    }
}
