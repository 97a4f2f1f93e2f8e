//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod recorders;

use gadgets_rs::pipeline::{GadgetId, Pipeline};

/// Display text of a gadget, `None` when it shows nothing.
pub fn display_text(pipeline: &Pipeline, id: GadgetId) -> Option<String> {
    pipeline
        .gadget(id)
        .and_then(|g| g.display().get().text().map(str::to_string))
}

/// Current value of a gadget's first output port.
pub fn output_bytes(pipeline: &Pipeline, id: GadgetId) -> Vec<u8> {
    pipeline
        .gadget(id)
        .map(|g| g.outputs()[0].value().to_vec())
        .unwrap_or_default()
}
