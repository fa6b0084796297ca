//! Child replacement and event dispatch.

use super::StateNode;
use crate::core::{State, TransitionOutcome, TransitionRecord};
use crate::error::{InvalidTransition, TransitionError};
use crate::events::{Payload, TransitionEvent, ENTER, EXIT};
use chrono::Utc;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

const NO_STATE: &str = "<none>";

fn same<S: State>(a: Option<&StateNode<S>>, b: Option<&StateNode<S>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        (None, None) => true,
        _ => false,
    }
}

fn name_of<S: State>(node: Option<&StateNode<S>>) -> &str {
    node.map_or(NO_STATE, StateNode::name)
}

impl<S: State> StateNode<S> {
    /// Replace this node's active child with `next`.
    ///
    /// `None` detaches the current child without a replacement. Links are
    /// rewired first, then "exit" fires on the outgoing child and "enter"
    /// on the incoming one. If an exit handler moves this node to yet
    /// another child, the enter for `next` is skipped.
    ///
    /// # Errors
    ///
    /// - [`InvalidTransition::SameState`] if `next` is already the child.
    /// - [`InvalidTransition::AlreadyParented`] if `next` has a parent.
    /// - [`InvalidTransition::WouldCycle`] if `next` is this node or one of
    ///   its ancestors.
    /// - [`TransitionError::Handler`] if an exit or enter handler fails. The
    ///   new links stay in place.
    ///
    /// # Example
    ///
    /// ```rust
    /// use habitat::StateNode;
    ///
    /// let machine = StateNode::new(String::from("Machine"));
    /// let idle = StateNode::new(String::from("Idle"));
    /// let running = StateNode::new(String::from("Running"));
    ///
    /// machine.transition(Some(&idle)).unwrap();
    /// machine.transition(Some(&running)).unwrap();
    /// assert!(idle.parent().is_none());
    ///
    /// machine.transition(None).unwrap();
    /// assert!(machine.child().is_none());
    /// ```
    pub fn transition(&self, next: Option<&StateNode<S>>) -> Result<(), TransitionError> {
        let previous = self.child();
        self.validate(previous.as_ref(), next)?;

        debug!(
            parent = self.name(),
            from = name_of(previous.as_ref()),
            to = name_of(next),
            "transition"
        );

        if let Some(next) = next {
            *next.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        }
        *self.inner.child.borrow_mut() = next.cloned();
        if let Some(previous) = &previous {
            *previous.inner.parent.borrow_mut() = Weak::new();
        }

        let payload = Payload::Transition(TransitionEvent {
            previous: previous.clone(),
            next: next.cloned(),
        });
        let result = self.run_lifecycle(previous.as_ref(), next, &payload);

        let outcome = match &result {
            Ok(true) => TransitionOutcome::Completed,
            Ok(false) => TransitionOutcome::Superseded,
            Err(_) => TransitionOutcome::Aborted,
        };
        let record = TransitionRecord {
            from: previous.as_ref().map(|node| node.label().clone()),
            to: next.map(|node| node.label().clone()),
            outcome,
            timestamp: Utc::now(),
        };
        self.inner.history.borrow_mut().push(record);

        debug!(parent = self.name(), ?outcome, "transition finished");
        result.map(|_| ())
    }

    /// Invoke every handler registered for `event`, in registration order.
    ///
    /// The handler list is read once up front; handlers added during the
    /// dispatch run on the next `fire`. The first failing handler stops the
    /// dispatch and its error is returned.
    pub fn fire(&self, event: &str, payload: &Payload<S>) -> Result<(), TransitionError> {
        let handlers = self.inner.listeners.borrow().handlers(event);
        trace!(node = self.name(), event, handlers = handlers.len(), "fire");

        for handler in handlers {
            if let Err(source) = handler(payload) {
                warn!(node = self.name(), event, error = %source, "event handler failed");
                return Err(TransitionError::Handler {
                    event: event.to_string(),
                    state: self.name().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }

    fn validate(
        &self,
        previous: Option<&StateNode<S>>,
        next: Option<&StateNode<S>>,
    ) -> Result<(), InvalidTransition> {
        if same(previous, next) {
            return Err(InvalidTransition::SameState {
                parent: self.name().to_string(),
                state: name_of(next).to_string(),
            });
        }

        let Some(next) = next else {
            return Ok(());
        };

        if let Some(parent) = next.parent() {
            return Err(InvalidTransition::AlreadyParented {
                state: next.name().to_string(),
                parent: parent.name().to_string(),
            });
        }

        if next.ptr_eq(self) || next.is_ancestor_of(self) {
            return Err(InvalidTransition::WouldCycle {
                state: next.name().to_string(),
                parent: self.name().to_string(),
            });
        }

        Ok(())
    }

    /// Fire exit then enter. Returns `false` when an exit handler replaced
    /// the child and enter was skipped.
    fn run_lifecycle(
        &self,
        previous: Option<&StateNode<S>>,
        next: Option<&StateNode<S>>,
        payload: &Payload<S>,
    ) -> Result<bool, TransitionError> {
        if let Some(previous) = previous {
            previous.fire(EXIT, payload)?;
        }

        if !same(self.child().as_ref(), next) {
            debug!(
                parent = self.name(),
                skipped = name_of(next),
                "transition superseded during exit"
            );
            return Ok(false);
        }

        if let Some(next) = next {
            next.fire(ENTER, payload)?;
        }
        Ok(true)
    }
}
