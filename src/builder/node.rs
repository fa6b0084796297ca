//! Builder for constructing state nodes.

use crate::builder::error::BuildError;
use crate::core::{State, DEFAULT_JOURNAL_CAPACITY};
use crate::error::HandlerError;
use crate::events::{lifecycle_handler, Handler, Payload, TransitionEvent, ENTER, EXIT};
use crate::node::StateNode;
use std::rc::Rc;

/// Builder for constructing detached nodes with a fluent API.
///
/// Handlers are registered on the node in the order they were added.
pub struct NodeBuilder<S: State> {
    label: Option<S>,
    handlers: Vec<(String, Handler<Payload<S>>)>,
    journal_capacity: usize,
}

impl<S: State> NodeBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            label: None,
            handlers: Vec::new(),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }

    /// Set the label (required).
    pub fn label(mut self, label: S) -> Self {
        self.label = Some(label);
        self
    }

    /// Number of transitions the node's journal keeps. 0 disables it.
    pub fn journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self
    }

    /// Add a handler for any event name.
    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Payload<S>) -> Result<(), HandlerError> + 'static,
    {
        let handler: Handler<Payload<S>> = Rc::new(handler);
        self.handlers.push((event.into(), handler));
        self
    }

    /// Add an "enter" handler.
    pub fn on_enter<F>(self, handler: F) -> Self
    where
        F: Fn(&TransitionEvent<S>) -> Result<(), HandlerError> + 'static,
    {
        self.on(ENTER, lifecycle_handler(handler))
    }

    /// Add an "exit" handler.
    pub fn on_exit<F>(self, handler: F) -> Self
    where
        F: Fn(&TransitionEvent<S>) -> Result<(), HandlerError> + 'static,
    {
        self.on(EXIT, lifecycle_handler(handler))
    }

    /// Build the node.
    /// Returns an error if no label was given.
    pub fn build(self) -> Result<StateNode<S>, BuildError> {
        let label = self.label.ok_or(BuildError::MissingLabel)?;
        Ok(StateNode::with_handlers(
            label,
            self.handlers,
            self.journal_capacity,
        ))
    }
}

impl<S: State> Default for NodeBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
