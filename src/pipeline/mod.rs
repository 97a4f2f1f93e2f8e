//! Reactive gadget pipeline.
//!
//! Gadgets own typed ports holding byte-sequence values. An output port feeds
//! any number of input ports; an input port has at most one upstream. A
//! change anywhere recomputes the changed gadget and cascades, synchronously
//! and depth first, to everything downstream.
//!
//! # Architecture
//!
//! ```text
//! [Text Input] ──► [Hex Encode] ──► [Hex Decode]
//!              └─► [SHA-1]
//! ```
//!
//! # Design
//!
//! - **Topology first**: every edge is validated by `TopologyGraph` before
//!   ports are rewired, so the connection set is always a forest.
//! - **Closed set of kinds**: `GadgetKind` enum dispatch selects the
//!   transform; transforms are pure `bytes -> bytes` functions.
//! - **Observable cells**: port values, display state and editable values
//!   are `Observable`s; outside code subscribes, only the pipeline writes.
//! - **Contained errors**: a failing transform shows an error display and
//!   publishes empty, it never aborts the cascade.

pub mod error;
pub mod executor;
pub mod gadget;
pub mod gadgets;
pub mod id;
pub mod kind;
pub mod observable;
pub mod port;
pub mod registry;
pub mod snapshot;

pub use error::{PipelineError, PipelineResult, TransformError};
pub use executor::{CascadeReport, Pipeline, PipelineBuilder};
pub use gadget::{Computed, DisplayState, Gadget, Position};
pub use id::{GadgetId, PortId};
pub use kind::{Family, GadgetKind};
pub use observable::{Observable, Subscription};
pub use port::{InputPort, OutputPort, PortDescriptor, PortDirection};
pub use registry::{GadgetRegistration, GadgetRegistry};
pub use snapshot::{EdgeSnapshot, NodeSnapshot, TopologySnapshot};
