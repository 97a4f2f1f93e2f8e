//! Serializable view of a pipeline for display and export.

use crate::pipeline::gadget::{DisplayState, Position};
use crate::pipeline::id::{GadgetId, PortId};
use crate::pipeline::kind::Family;
use serde::Serialize;

/// Snapshot of a single gadget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub id: GadgetId,
    pub class_id: String,
    pub family: Family,
    pub title: String,
    pub position: Position,
    pub display: DisplayState,
    /// Upstream gadget in the topology, `None` for roots.
    pub parent: Option<GadgetId>,
}

/// Snapshot of a single port-to-port connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeSnapshot {
    pub from: PortId,
    pub to: PortId,
}

/// Complete snapshot of the pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologySnapshot {
    /// Gadgets in id order.
    pub nodes: Vec<NodeSnapshot>,
    /// Connections sorted by source port, then destination port.
    pub edges: Vec<EdgeSnapshot>,
    /// Rendered forest, as `TopologyGraph::render`.
    pub forest: String,
}

impl TopologySnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn node(&self, id: GadgetId) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
