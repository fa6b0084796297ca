//! State trait for node labels.
//!
//! Every [`StateNode`](crate::node::StateNode) carries a label implementing
//! this trait. Labels name a node for logs, errors, the transition journal
//! and snapshots. They never decide identity: two nodes with equal labels
//! are still two different states.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state node labels.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone`: labels are copied into journal records and snapshots
/// - `PartialEq`: labels are comparable in tests and journal queries
/// - `Debug`: labels are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: labels are persisted in snapshots
/// - `'static`: labels are captured by boxed event handlers
///
/// # Example
///
/// ```rust
/// use habitat::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Player {
///     Idle,
///     Running,
///     Paused,
/// }
///
/// impl State for Player {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Running => "Running",
///             Self::Paused => "Paused",
///         }
///     }
/// }
///
/// assert_eq!(Player::Running.name(), "Running");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Get the label's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self
    }
}
