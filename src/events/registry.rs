//! Per-node listener registry keyed by event name.

use crate::error::HandlerError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A registered event handler.
///
/// Handlers are reference counted so a dispatch can take a snapshot of the
/// list and release the registry before calling any of them.
pub type Handler<P> = Rc<dyn Fn(&P) -> Result<(), HandlerError>>;

/// Handle returned by registration, used to remove the handler again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Ordered handlers per event name.
///
/// The registry knows nothing about transitions; "enter" and "exit" are
/// ordinary names here.
///
/// # Example
///
/// ```rust
/// use habitat::events::EventRegistry;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(Cell::new(0));
/// let mut registry: EventRegistry<u32> = EventRegistry::new();
///
/// let counter = Rc::clone(&seen);
/// registry.on("tick", move |n: &u32| {
///     counter.set(counter.get() + n);
///     Ok(())
/// });
///
/// for handler in registry.handlers("tick") {
///     handler(&5).unwrap();
/// }
/// assert_eq!(seen.get(), 5);
/// ```
pub struct EventRegistry<P> {
    listeners: HashMap<String, Vec<(ListenerId, Handler<P>)>>,
    next_id: u64,
}

impl<P> Default for EventRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EventRegistry<P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a handler closure for `event`, after any existing ones.
    pub fn on<F>(&mut self, event: impl Into<String>, handler: F) -> ListenerId
    where
        F: Fn(&P) -> Result<(), HandlerError> + 'static,
    {
        self.insert(event, Rc::new(handler))
    }

    /// Register an already shared handler for `event`.
    pub fn insert(&mut self, event: impl Into<String>, handler: Handler<P>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event.into())
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered for `event`.
    pub fn off(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(handlers) = self.listeners.get_mut(event) else {
            return false;
        };

        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        let removed = handlers.len() != before;

        if handlers.is_empty() {
            self.listeners.remove(event);
        }
        removed
    }

    /// Snapshot of the handlers for `event`, in registration order.
    pub fn handlers(&self, event: &str) -> Vec<Handler<P>> {
        self.listeners
            .get(event)
            .map(|handlers| handlers.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }

    /// Number of handlers registered for `event`.
    pub fn count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Event names with at least one handler, sorted.
    pub fn events(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.listeners.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<P> fmt::Debug for EventRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(&str, usize)> = self
            .events()
            .into_iter()
            .map(|name| (name, self.count(name)))
            .collect();
        f.debug_struct("EventRegistry")
            .field("listeners", &counts)
            .finish()
    }
}
