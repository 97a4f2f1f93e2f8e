//! Topology error types.

use thiserror::Error;

/// Errors raised by structural changes to the topology.
///
/// Every error is returned before the graph is touched, so the caller can
/// recover without any cleanup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The edge would close a cycle (including a self-loop).
    #[error("Connecting {source_id} -> {target_id} would create a cycle")]
    Cycle { source_id: String, target_id: String },

    #[error("Edge {source_id} -> {target_id} not found")]
    EdgeNotFound { source_id: String, target_id: String },

    #[error("Node {0} not found")]
    NodeNotFound(String),
}

impl GraphError {
    /// True for the cycle rejection, the one error a UI usually reports to the user.
    pub fn is_cycle(&self) -> bool {
        matches!(self, GraphError::Cycle { .. })
    }
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
