//! Pipeline-specific error types.

use crate::pipeline::id::{GadgetId, PortId};
use crate::topology::GraphError;
use thiserror::Error;

/// Errors returned by pipeline operations.
///
/// All of these are raised before the pipeline is modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Gadget {0} not found")]
    GadgetNotFound(GadgetId),

    #[error("Port {0:?} out of range")]
    PortOutOfRange(PortId),

    #[error("Input port {0:?} is not connected")]
    NotConnected(PortId),

    #[error("Gadget {0} has no editable value")]
    NotEditable(GadgetId),

    #[error("No gadget class registered as \"{0}\"")]
    UnknownClass(String),

    #[error("Gadget class \"{0}\" registered twice")]
    DuplicateClass(String),

    #[error("Cascade from {origin} exceeded the depth limit of {limit}")]
    CascadeDepthExceeded { origin: GadgetId, limit: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl PipelineError {
    /// True when a connection was rejected because it would close a cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(self, PipelineError::Graph(err) if err.is_cycle())
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// A transform could not produce a result for its input.
///
/// Contained per gadget: the pipeline renders it as the gadget's error
/// display state and publishes empty outputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Malformed percent escape at byte {offset}")]
    MalformedPercentEscape { offset: usize },

    #[error("Input is not valid UTF-8")]
    InvalidUtf8,
}
