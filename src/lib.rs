//! # gadgets-rs: reactive byte-transform pipelines
//!
//! Wire small transform units ("gadgets": hex/base64 codecs, MD5/SHA
//! digests, URL/HTML codecs, text input) into a pipeline and watch results
//! update live as inputs change.
//!
//! ## Architecture
//!
//! - **Topology**: a forest of named nodes; edge insertion rejects cycles and
//!   detaches the target from its previous parent
//! - **Pipeline**: gadgets with observable ports; every change cascades
//!   synchronously, depth first, through the downstream forest
//! - **Registry**: builds gadgets from `family.title` class ids
//! - **Chain**: a text input feeding registry-built gadgets, as run by the CLI
//!
//! ## Configuration
//!
//! Settings (log filter, log directory, cascade depth bound) are read from
//! `config.toml` in the platform config directory under `gadgets-rs`.
//!
//! ## Example
//!
//! ```
//! use gadgets_rs::pipeline::{GadgetKind, Pipeline, PortId};
//!
//! let mut pipeline = Pipeline::new();
//! let text = pipeline.place(GadgetKind::TextInput, 0, 0);
//! let hex = pipeline.place(GadgetKind::HexEncode, 20, 0);
//! pipeline
//!     .connect(PortId::new(text, 0), PortId::new(hex, 0))
//!     .unwrap();
//!
//! pipeline.edit(text, "ABCD").unwrap();
//! let display = pipeline.gadget(hex).unwrap().display().get();
//! assert_eq!(display.text(), Some("41424344"));
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod topology;

// Re-export commonly used types
pub use chain::ChainRun;
pub use config::{AppConfig, LoggingConfig, PipelineConfig};
pub use error::{GadgetsError, Result, ResultExt};
pub use pipeline::{
    CascadeReport, DisplayState, Gadget, GadgetId, GadgetKind, GadgetRegistry, Pipeline,
    PipelineError, PortId,
};
pub use topology::{GraphError, TopologyGraph};
