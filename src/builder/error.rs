//! Build errors for the node builder.

use thiserror::Error;

/// Errors that can occur when building a state node.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Label not specified. Call .label(state) before .build()")]
    MissingLabel,
}
