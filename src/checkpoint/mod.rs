//! Snapshots of a node's active configuration.
//!
//! A snapshot records which states are active below a node and the journal
//! of transitions that node mediated. It is an inspection artifact: it has
//! no handlers and cannot rebuild nodes on its own.

use crate::core::{State, TransitionHistory};
use crate::node::{NodeId, StateNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a node and its active descendants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// Node the snapshot was taken from
    pub node_id: NodeId,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Labels from the node down through each active child
    pub active_path: Vec<S>,

    /// The node's transition journal
    pub history: TransitionHistory<S>,
}

impl<S: State> Snapshot<S> {
    /// Capture `node` as it is right now.
    pub fn capture(node: &StateNode<S>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            node_id: node.id(),
            timestamp: Utc::now(),
            active_path: node.active_path(),
            history: node.history(),
        }
    }

    /// Label of the deepest active state.
    pub fn active_leaf(&self) -> Option<&S> {
        self.active_path.last()
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionOutcome;

    fn machine() -> (StateNode<String>, StateNode<String>, StateNode<String>) {
        let machine = StateNode::new("Machine".to_string());
        let running = StateNode::new("Running".to_string());
        let fast = StateNode::new("Fast".to_string());
        machine.transition(Some(&running)).unwrap();
        running.transition(Some(&fast)).unwrap();
        (machine, running, fast)
    }

    #[test]
    fn capture_records_active_path() {
        let (machine, _running, _fast) = machine();
        let snapshot = machine.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.node_id, machine.id());
        assert_eq!(snapshot.active_path, vec!["Machine", "Running", "Fast"]);
        assert_eq!(snapshot.active_leaf(), Some(&"Fast".to_string()));
        assert_eq!(snapshot.history.count(TransitionOutcome::Completed), 1);
    }

    #[test]
    fn json_encoding_preserves_contents() {
        let (machine, _running, _fast) = machine();
        let snapshot = machine.snapshot();

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::<String>::from_json(&json).unwrap();

        assert_eq!(restored.id, snapshot.id);
        assert_eq!(restored.active_path, snapshot.active_path);
        assert_eq!(restored.history.len(), 1);
    }

    #[test]
    fn binary_encoding_preserves_contents() {
        let (_machine, running, _fast) = machine();
        let snapshot = running.snapshot();

        let bytes = snapshot.to_binary().unwrap();
        let restored = Snapshot::<String>::from_binary(&bytes).unwrap();

        assert_eq!(restored.node_id, running.id());
        assert_eq!(restored.active_path, vec!["Running", "Fast"]);
        assert_eq!(restored.timestamp, snapshot.timestamp);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let (machine, _running, _fast) = machine();
        let mut snapshot = machine.snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        let json = snapshot.to_json().unwrap();
        let err = Snapshot::<String>::from_json(&json).unwrap_err();

        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion { found, supported }
                if found == SNAPSHOT_VERSION + 1 && supported == SNAPSHOT_VERSION
        ));
    }

    #[test]
    fn malformed_input_is_a_deserialization_error() {
        let err = Snapshot::<String>::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CheckpointError::DeserializationFailed(_)));

        let err = Snapshot::<String>::from_binary(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, CheckpointError::DeserializationFailed(_)));
    }
}
