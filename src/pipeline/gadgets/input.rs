//! Input gadgets: sources with an editable value and no input ports.

use crate::pipeline::gadget::{Computed, DisplayState};
use bytes::Bytes;

/// Publish the editable text as-is.
pub fn text_input(editable: &Bytes) -> Computed {
    if editable.is_empty() {
        return Computed::empty(1);
    }
    Computed {
        outputs: vec![editable.clone()],
        display: DisplayState::render_text(editable),
    }
}
