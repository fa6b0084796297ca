//! Event names and payloads carried by `fire`.

use crate::core::State;
use crate::error::HandlerError;
use crate::node::StateNode;

/// Fired on the outgoing child of a transition.
pub const EXIT: &str = "exit";

/// Fired on the incoming child, unless an exit handler superseded it.
pub const ENTER: &str = "enter";

/// The `{previous, next}` pair handed to exit and enter handlers.
///
/// Both sides are node handles, so handlers can inspect topology or issue
/// further transitions from them.
pub struct TransitionEvent<S: State> {
    pub previous: Option<StateNode<S>>,
    pub next: Option<StateNode<S>>,
}

impl<S: State> TransitionEvent<S> {
    pub fn previous_name(&self) -> Option<&str> {
        self.previous.as_ref().map(StateNode::name)
    }

    pub fn next_name(&self) -> Option<&str> {
        self.next.as_ref().map(StateNode::name)
    }
}

impl<S: State> Clone for TransitionEvent<S> {
    fn clone(&self) -> Self {
        Self {
            previous: self.previous.clone(),
            next: self.next.clone(),
        }
    }
}

impl<S: State> std::fmt::Debug for TransitionEvent<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionEvent")
            .field("previous", &self.previous_name())
            .field("next", &self.next_name())
            .finish()
    }
}

/// Payload passed to every handler registered on a node.
///
/// Transitions always fire `Transition`. Custom events pick whichever
/// variant fits; structured data goes through `Custom`.
#[derive(Clone, Debug)]
pub enum Payload<S: State> {
    Transition(TransitionEvent<S>),
    Custom(serde_json::Value),
    Empty,
}

impl<S: State> Payload<S> {
    /// The transition pair, if this payload carries one.
    pub fn as_transition(&self) -> Option<&TransitionEvent<S>> {
        match self {
            Self::Transition(event) => Some(event),
            _ => None,
        }
    }
}

impl<S: State> From<TransitionEvent<S>> for Payload<S> {
    fn from(event: TransitionEvent<S>) -> Self {
        Self::Transition(event)
    }
}

impl<S: State> From<serde_json::Value> for Payload<S> {
    fn from(value: serde_json::Value) -> Self {
        Self::Custom(value)
    }
}

/// Adapt a `TransitionEvent` handler to the generic payload signature.
///
/// Payloads of any other kind are ignored, so a lifecycle handler never
/// fails on a custom `fire` that reuses the "enter"/"exit" names.
pub(crate) fn lifecycle_handler<S, F>(
    handler: F,
) -> impl Fn(&Payload<S>) -> Result<(), HandlerError> + 'static
where
    S: State,
    F: Fn(&TransitionEvent<S>) -> Result<(), HandlerError> + 'static,
{
    move |payload: &Payload<S>| match payload.as_transition() {
        Some(event) => handler(event),
        None => Ok(()),
    }
}
