//! Identity types for the pipeline system.
//!
//! `GadgetId` is a process-wide sequence number, independent of the gadget's
//! class. `PortId` addresses a single port on a gadget; whether it names an
//! input or an output depends on where it is used.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GADGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique, monotonically increasing gadget identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GadgetId(pub u64);

impl GadgetId {
    /// Allocate the next id in the process-wide sequence.
    pub fn next() -> Self {
        Self(NEXT_GADGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Node id of this gadget in the topology graph.
    pub fn node_key(self) -> String {
        format!("gadget-{}", self.0)
    }
}

impl fmt::Debug for GadgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GadgetId({})", self.0)
    }
}

impl fmt::Display for GadgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gadget-{}", self.0)
    }
}

/// A port on a gadget: owning gadget plus the port's index on that side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId {
    pub gadget: GadgetId,
    pub index: u16,
}

impl PortId {
    pub fn new(gadget: GadgetId, index: u16) -> Self {
        Self { gadget, index }
    }

    #[inline]
    pub fn port_index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PortId(gadget={}, port={})", self.gadget.0, self.index)
    }
}
