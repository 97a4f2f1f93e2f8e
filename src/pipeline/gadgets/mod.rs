//! Built-in gadget transforms.
//!
//! Each family module holds pure `bytes -> bytes` functions. [`compute`]
//! applies the empty-input policy, dispatches on the gadget kind and turns
//! the result into output values plus a display state.

pub mod change_base;
pub mod hash;
pub mod input;
pub mod web;

use crate::pipeline::error::TransformError;
use crate::pipeline::gadget::{Computed, DisplayState};
use crate::pipeline::kind::{Family, GadgetKind};
use crate::pipeline::port::PortDescriptor;
use bytes::Bytes;

pub(crate) static SOURCE_PORTS: &[PortDescriptor] = &[PortDescriptor::output("out")];

pub(crate) static TRANSFORM_PORTS: &[PortDescriptor] =
    &[PortDescriptor::input("in"), PortDescriptor::output("out")];

/// Run the transform for `kind` over the current input values.
///
/// `editable` is the source value for gadgets without input ports.
pub fn compute(kind: GadgetKind, inputs: &[Bytes], editable: Option<&Bytes>) -> Computed {
    let outputs = kind.output_count();

    if kind.is_source() {
        return match kind {
            GadgetKind::TextInput => input::text_input(editable.unwrap_or(&Bytes::new())),
            _ => Computed::empty(outputs),
        };
    }

    if inputs.len() < kind.input_count() || inputs.iter().any(|v| v.is_empty()) {
        return Computed::empty(outputs);
    }

    let input = &inputs[0];
    let result: Result<Vec<u8>, TransformError> = match kind {
        GadgetKind::HexEncode => Ok(change_base::hex_encode(input)),
        GadgetKind::HexDecode => change_base::hex_decode(input),
        GadgetKind::Base64Encode => Ok(change_base::base64_encode(input)),
        GadgetKind::Base64Decode => change_base::base64_decode(input),
        GadgetKind::Md5 => Ok(hash::md5(input)),
        GadgetKind::Sha1 => Ok(hash::sha1(input)),
        GadgetKind::Sha2 => Ok(hash::sha256(input)),
        GadgetKind::UrlEncode => Ok(web::url_encode(input)),
        GadgetKind::UrlDecode => web::url_decode(input),
        GadgetKind::HtmlEncode => web::html_encode(input),
        GadgetKind::HtmlDecode => web::html_decode(input),
        GadgetKind::TextInput => return Computed::empty(outputs),
    };

    match result {
        Ok(bytes) => {
            let display = match kind.family() {
                Family::Hash => DisplayState::render_hex(&bytes),
                _ => DisplayState::render_text(&bytes),
            };
            Computed {
                outputs: vec![Bytes::from(bytes)],
                display,
            }
        }
        Err(err) => {
            tracing::warn!("{} transform failed: {}", kind.class_id(), err);
            Computed::error(err, outputs)
        }
    }
}
