//! Habitat: hierarchical state nodes
//!
//! A state tree where every node holds at most one active child. Changing
//! the child is a *transition*: links are rewired first, then "exit" fires
//! on the outgoing child and "enter" on the incoming one. An exit handler
//! may issue a further transition, in which case the pending enter is
//! skipped.
//!
//! # Core Concepts
//!
//! - **StateNode**: Identity-compared handle to one state in the tree
//! - **Events**: Per-node handler registry driven by `fire`
//! - **Journal**: Record of the transitions each node mediated
//! - **Snapshot**: Serializable capture of the active path
//!
//! # Example
//!
//! ```rust
//! use habitat::{state_enum, StateNode};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! state_enum! {
//!     enum Player {
//!         Machine,
//!         Idle,
//!         Running,
//!     }
//! }
//!
//! let machine = StateNode::new(Player::Machine);
//! let idle = StateNode::new(Player::Idle);
//! let running = StateNode::new(Player::Running);
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let entered = Rc::clone(&log);
//! running.on_enter(move |event| {
//!     entered.borrow_mut().push(format!("enter from {:?}", event.previous_name()));
//!     Ok(())
//! });
//!
//! machine.transition(Some(&idle)).unwrap();
//! machine.transition(Some(&running)).unwrap();
//!
//! assert_eq!(*log.borrow(), vec!["enter from Some(\"Idle\")"]);
//! assert!(machine.transition(Some(&running)).is_err());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod error;
pub mod events;
pub mod node;

// Re-export commonly used types
pub use builder::{BuildError, NodeBuilder};
pub use checkpoint::{CheckpointError, Snapshot};
pub use self::core::{
    State, TransitionHistory, TransitionOutcome, TransitionRecord, DEFAULT_JOURNAL_CAPACITY,
};
pub use error::{HandlerError, InvalidTransition, TransitionError};
pub use events::{ListenerId, Payload, TransitionEvent, ENTER, EXIT};
pub use node::{NodeId, StateNode, WeakStateNode};
