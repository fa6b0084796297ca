//! Builder API for ergonomic node construction.
//!
//! This module provides a fluent builder and a label macro for creating
//! state nodes with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod node;

pub use error::BuildError;
pub use node::NodeBuilder;
