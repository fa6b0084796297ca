//! Core value types.
//!
//! This module contains the pure, node-independent pieces:
//! - Label definitions via the `State` trait
//! - The transition journal (`TransitionRecord`, `TransitionHistory`)
//!
//! Nothing here touches the tree; the node module builds on these types.

mod history;
mod state;

pub use history::{
    TransitionHistory, TransitionOutcome, TransitionRecord, DEFAULT_JOURNAL_CAPACITY,
};
pub use state::State;
