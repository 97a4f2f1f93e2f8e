//! Topology of the gadget graph.
//!
//! The topology is the structural source of truth for which gadgets may be
//! wired together. Edges form a forest: every node has at most one parent,
//! and an edge that would close a cycle is rejected before anything changes.
//!
//! ```text
//! (implicit root)
//!  ├── a
//!  │   ├── b
//!  │   │   └── c
//!  │   └── d
//!  └── e
//! ```
//!
//! # Design
//!
//! - **Arena storage**: nodes live in a flat `Vec` and refer to each other by
//!   index; each node stores a single optional parent, so the one-parent rule
//!   holds structurally.
//! - **Root list**: nodes without a parent are children of the implicit root.
//! - **Search, not index**: lookups walk the forest depth-first. Pipelines
//!   hold tens of nodes, so this stays cheap.

pub mod error;
pub mod graph;

pub use error::{GraphError, GraphResult};
pub use graph::{NodeRef, TopologyGraph};
