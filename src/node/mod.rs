//! Hierarchical state nodes.
//!
//! A [`StateNode`] is a cheap, clonable handle to one state in a tree. Each
//! node owns at most one active child and holds a weak back-reference to
//! the node that owns it. Handles compare by identity: two handles are
//! equal only when they point at the same node.
//!
//! Nodes are single-threaded (`Rc` + `RefCell`). No borrow is held while a
//! handler runs, so handlers may re-enter any node operation.

mod transition;

use crate::checkpoint::Snapshot;
use crate::core::{State, TransitionHistory, DEFAULT_JOURNAL_CAPACITY};
use crate::error::HandlerError;
use crate::events::{
    lifecycle_handler, EventRegistry, Handler, ListenerId, Payload, TransitionEvent, ENTER, EXIT,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Diagnostic identifier assigned to every node at construction.
///
/// Used in logs and snapshots only; it plays no part in node identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub(crate) struct NodeInner<S: State> {
    id: NodeId,
    label: S,
    parent: RefCell<Weak<NodeInner<S>>>,
    child: RefCell<Option<StateNode<S>>>,
    listeners: RefCell<EventRegistry<Payload<S>>>,
    history: RefCell<TransitionHistory<S>>,
}

/// Handle to a node in a state tree.
///
/// # Example
///
/// ```rust
/// use habitat::StateNode;
///
/// let machine = StateNode::new(String::from("Machine"));
/// let idle = StateNode::new(String::from("Idle"));
///
/// machine.transition(Some(&idle)).unwrap();
///
/// assert_eq!(machine.child(), Some(idle.clone()));
/// assert_eq!(idle.parent(), Some(machine.clone()));
/// assert!(machine.transition(Some(&idle)).is_err());
/// ```
pub struct StateNode<S: State> {
    inner: Rc<NodeInner<S>>,
}

/// Non-owning handle to a node.
///
/// Handlers that need to reach their own parent should capture one of
/// these rather than a `StateNode`, otherwise the parent and the child's
/// handler keep each other alive.
pub struct WeakStateNode<S: State> {
    inner: Weak<NodeInner<S>>,
}

impl<S: State> WeakStateNode<S> {
    /// The node, if it is still alive.
    pub fn upgrade(&self) -> Option<StateNode<S>> {
        self.inner.upgrade().map(|inner| StateNode { inner })
    }
}

impl<S: State> Clone for WeakStateNode<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S: State> fmt::Debug for WeakStateNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("WeakStateNode");
        match self.inner.upgrade() {
            Some(inner) => tuple.field(&inner.label),
            None => tuple.field(&format_args!("<dropped>")),
        };
        tuple.finish()
    }
}

impl<S: State> StateNode<S> {
    /// Create a detached node with no child and no handlers.
    ///
    /// Its journal keeps the last [`DEFAULT_JOURNAL_CAPACITY`] transitions;
    /// use [`NodeBuilder`](crate::NodeBuilder) to pick another capacity.
    pub fn new(label: S) -> Self {
        Self::with_handlers(label, Vec::new(), DEFAULT_JOURNAL_CAPACITY)
    }

    pub(crate) fn with_handlers(
        label: S,
        handlers: Vec<(String, Handler<Payload<S>>)>,
        journal_capacity: usize,
    ) -> Self {
        let mut listeners = EventRegistry::new();
        for (event, handler) in handlers {
            listeners.insert(event, handler);
        }

        let node = Self {
            inner: Rc::new(NodeInner {
                id: NodeId::new(),
                label,
                parent: RefCell::new(Weak::new()),
                child: RefCell::new(None),
                listeners: RefCell::new(listeners),
                history: RefCell::new(TransitionHistory::bounded(journal_capacity)),
            }),
        };
        tracing::trace!(node = node.name(), id = %node.id(), "created state node");
        node
    }

    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    pub fn label(&self) -> &S {
        &self.inner.label
    }

    pub fn name(&self) -> &str {
        self.inner.label.name()
    }

    /// The active child, if any.
    pub fn child(&self) -> Option<StateNode<S>> {
        self.inner.child.borrow().clone()
    }

    /// The node this one is the active child of, if any.
    pub fn parent(&self) -> Option<StateNode<S>> {
        self.inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| StateNode { inner })
    }

    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &StateNode<S>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakStateNode<S> {
        WeakStateNode {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Parent, grandparent, and so on up to the root.
    pub fn ancestors(&self) -> Vec<StateNode<S>> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            ancestors.push(node);
        }
        ancestors
    }

    /// The topmost ancestor, or this node when it is detached.
    pub fn root(&self) -> StateNode<S> {
        self.ancestors().pop().unwrap_or_else(|| self.clone())
    }

    /// Number of ancestors. A root has depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    /// Whether `other` sits somewhere below this node.
    pub fn is_ancestor_of(&self, other: &StateNode<S>) -> bool {
        other.ancestors().iter().any(|node| node.ptr_eq(self))
    }

    /// The deepest node reached by following active children.
    pub fn active_leaf(&self) -> StateNode<S> {
        let mut leaf = self.clone();
        while let Some(child) = leaf.child() {
            leaf = child;
        }
        leaf
    }

    /// Labels from this node down through each active child.
    pub fn active_path(&self) -> Vec<S> {
        let mut path = vec![self.inner.label.clone()];
        let mut current = self.child();
        while let Some(node) = current {
            path.push(node.inner.label.clone());
            current = node.child();
        }
        path
    }

    /// Copy of the journal of transitions this node mediated as a parent.
    pub fn history(&self) -> TransitionHistory<S> {
        self.inner.history.borrow().clone()
    }

    /// Capture the active path and journal for inspection or persistence.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot::capture(self)
    }

    /// Register a handler for any event name, including custom ones.
    pub fn on<F>(&self, event: impl Into<String>, handler: F) -> ListenerId
    where
        F: Fn(&Payload<S>) -> Result<(), HandlerError> + 'static,
    {
        self.inner.listeners.borrow_mut().on(event, handler)
    }

    /// Register a handler run when this node becomes the active child.
    pub fn on_enter<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&TransitionEvent<S>) -> Result<(), HandlerError> + 'static,
    {
        self.on(ENTER, lifecycle_handler(handler))
    }

    /// Register a handler run when this node stops being the active child.
    pub fn on_exit<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&TransitionEvent<S>) -> Result<(), HandlerError> + 'static,
    {
        self.on(EXIT, lifecycle_handler(handler))
    }

    /// Remove a handler. Returns `false` if it was not registered for `event`.
    pub fn off(&self, event: &str, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().off(event, id)
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.listeners.borrow().count(event)
    }
}

impl<S: State> Clone for StateNode<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: State> PartialEq for StateNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<S: State> Eq for StateNode<S> {}

impl<S: State> fmt::Debug for StateNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parent = self.parent();
        let child = self.child();
        f.debug_struct("StateNode")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("parent", &parent.as_ref().map(StateNode::name))
            .field("child", &child.as_ref().map(StateNode::name))
            .finish()
    }
}
