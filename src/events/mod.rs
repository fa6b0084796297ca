//! Event dispatch surface for state nodes.
//!
//! A small observer registry keyed by event name, plus the payload types
//! the two lifecycle events carry. Transition logic lives in the node
//! module and only uses the names [`ENTER`] and [`EXIT`].

mod payload;
mod registry;

pub(crate) use payload::lifecycle_handler;
pub use payload::{Payload, TransitionEvent, ENTER, EXIT};
pub use registry::{EventRegistry, Handler, ListenerId};
