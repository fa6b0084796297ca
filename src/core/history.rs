//! Transition journal.
//!
//! Each node keeps a bounded record of the transitions it mediated as a
//! parent. Nodes append in place with `push`, evicting the oldest record
//! once the capacity is reached. `record` is the value-level counterpart:
//! it returns a new history and leaves the original untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Journal capacity of nodes built without an explicit one.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 64;

/// How a transition ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionOutcome {
    /// Every event ran. The next child, if any, was entered.
    Completed,
    /// An exit handler issued a further transition, so enter was skipped.
    Superseded,
    /// A handler failed. The structural swap stays in place.
    Aborted,
}

/// Record of a single child replacement on a parent node.
///
/// `from` and `to` are the labels of the outgoing and incoming children;
/// `None` means "no child".
///
/// # Example
///
/// ```rust
/// use habitat::core::{TransitionOutcome, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: None,
///     to: Some(String::from("Idle")),
///     outcome: TransitionOutcome::Completed,
///     timestamp: Utc::now(),
/// };
/// assert!(record.is_attach());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// Label of the child being replaced
    pub from: Option<S>,
    /// Label of the child being attached
    pub to: Option<S>,
    /// How the transition ended
    pub outcome: TransitionOutcome,
    /// When the transition finished
    pub timestamp: DateTime<Utc>,
}

impl<S: State> TransitionRecord<S> {
    /// A child was attached where there was none.
    pub fn is_attach(&self) -> bool {
        self.from.is_none() && self.to.is_some()
    }

    /// The child was removed with no replacement.
    pub fn is_detach(&self) -> bool {
        self.from.is_some() && self.to.is_none()
    }
}

/// Ordered journal of transitions.
///
/// # Example
///
/// ```rust
/// use habitat::core::{TransitionHistory, TransitionOutcome, TransitionRecord};
/// use chrono::Utc;
///
/// let history = TransitionHistory::new()
///     .record(TransitionRecord {
///         from: None,
///         to: Some(String::from("Idle")),
///         outcome: TransitionOutcome::Completed,
///         timestamp: Utc::now(),
///     })
///     .record(TransitionRecord {
///         from: Some(String::from("Idle")),
///         to: Some(String::from("Running")),
///         outcome: TransitionOutcome::Completed,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![None, Some(&String::from("Idle")), Some(&String::from("Running"))]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    /// Maximum number of records kept; `None` keeps everything
    #[serde(default)]
    capacity: Option<usize>,
}

impl<S: State> Default for TransitionHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionHistory<S> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            capacity: None,
        }
    }

    /// Create an empty history that keeps at most `capacity` records.
    ///
    /// A capacity of 0 disables recording.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Maximum number of retained records, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append a record in place, dropping the oldest one when full.
    pub fn push(&mut self, record: TransitionRecord<S>) {
        if self.capacity == Some(0) {
            return;
        }
        if let Some(capacity) = self.capacity {
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the record added.
    pub fn record(&self, record: TransitionRecord<S>) -> Self {
        let mut history = self.clone();
        history.push(record);
        history
    }

    /// Get the sequence of active children.
    ///
    /// Starts with the `from` of the first record, followed by the `to` of
    /// each record. Superseded records are included: their `to` was briefly
    /// active before the nested transition replaced it.
    pub fn get_path(&self) -> Vec<Option<&S>> {
        let mut path = Vec::new();
        if let Some(first) = self.records.front() {
            path.push(first.from.as_ref());
        }
        for record in &self.records {
            path.push(record.to.as_ref());
        }
        path
    }

    /// Count records that ended with the given outcome.
    pub fn count(&self, outcome: TransitionOutcome) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome == outcome)
            .count()
    }

    /// Calculate total duration from first to last record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all retained records, oldest first.
    pub fn records(&self) -> &VecDeque<TransitionRecord<S>> {
        &self.records
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
