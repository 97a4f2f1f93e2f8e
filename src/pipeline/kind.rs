//! Gadget class enumeration.
//!
//! Every gadget class the pipeline can build is a variant of [`GadgetKind`].
//! The class fixes the family, title, port arity and default size, and
//! selects the transform the gadget runs.

use crate::pipeline::gadgets;
use crate::pipeline::port::{PortDescriptor, PortDirection};
use serde::{Deserialize, Serialize};

/// Gadget families, used for grouping in the palette and for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Input,
    ChangeBase,
    Hash,
    Web,
}

impl Family {
    pub fn display_name(&self) -> &'static str {
        match self {
            Family::Input => "Input",
            Family::ChangeBase => "Change Base",
            Family::Hash => "Hash",
            Family::Web => "Web",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Family::Input => "input",
            Family::ChangeBase => "change-base",
            Family::Hash => "hash",
            Family::Web => "web",
        }
    }
}

/// Types of gadgets that can be placed in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GadgetKind {
    // Sources
    /// Free-form text typed by the user.
    TextInput,

    // Change base
    HexEncode,
    HexDecode,
    Base64Encode,
    Base64Decode,

    // Hashes
    Md5,
    Sha1,
    /// SHA-2 with a 256-bit digest.
    Sha2,

    // Web
    UrlEncode,
    UrlDecode,
    HtmlEncode,
    HtmlDecode,
}

impl GadgetKind {
    /// Get all available gadget kinds.
    pub fn all() -> &'static [GadgetKind] {
        &[
            GadgetKind::TextInput,
            GadgetKind::HexEncode,
            GadgetKind::HexDecode,
            GadgetKind::Base64Encode,
            GadgetKind::Base64Decode,
            GadgetKind::Md5,
            GadgetKind::Sha1,
            GadgetKind::Sha2,
            GadgetKind::UrlEncode,
            GadgetKind::UrlDecode,
            GadgetKind::HtmlEncode,
            GadgetKind::HtmlDecode,
        ]
    }

    pub fn family(&self) -> Family {
        match self {
            GadgetKind::TextInput => Family::Input,
            GadgetKind::HexEncode
            | GadgetKind::HexDecode
            | GadgetKind::Base64Encode
            | GadgetKind::Base64Decode => Family::ChangeBase,
            GadgetKind::Md5 | GadgetKind::Sha1 | GadgetKind::Sha2 => Family::Hash,
            GadgetKind::UrlEncode
            | GadgetKind::UrlDecode
            | GadgetKind::HtmlEncode
            | GadgetKind::HtmlDecode => Family::Web,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GadgetKind::TextInput => "Text Input",
            GadgetKind::HexEncode => "Hex Encode",
            GadgetKind::HexDecode => "Hex Decode",
            GadgetKind::Base64Encode => "Base64 Encode",
            GadgetKind::Base64Decode => "Base64 Decode",
            GadgetKind::Md5 => "MD5",
            GadgetKind::Sha1 => "SHA-1",
            GadgetKind::Sha2 => "SHA-2",
            GadgetKind::UrlEncode => "URL Encode",
            GadgetKind::UrlDecode => "URL Decode",
            GadgetKind::HtmlEncode => "HTML Encode",
            GadgetKind::HtmlDecode => "HTML Decode",
        }
    }

    /// Normalized `family.title` identifier, e.g. `change_base.hex_encode`.
    pub fn class_id(&self) -> String {
        format!("{}.{}", slug(self.family().display_name()), slug(self.title()))
    }

    pub fn css_class(&self) -> &'static str {
        self.family().css_class()
    }

    /// Default footprint in grid cells as `(width, height)`.
    pub fn default_size(&self) -> (u16, u16) {
        match self.family() {
            Family::Input => (16, 6),
            _ => (16, 4),
        }
    }

    pub fn ports(&self) -> &'static [PortDescriptor] {
        match self {
            GadgetKind::TextInput => gadgets::SOURCE_PORTS,
            _ => gadgets::TRANSFORM_PORTS,
        }
    }

    pub fn input_count(&self) -> usize {
        self.count_ports(PortDirection::Input)
    }

    pub fn output_count(&self) -> usize {
        self.count_ports(PortDirection::Output)
    }

    /// Sources have no input ports and carry an editable value instead.
    pub fn is_source(&self) -> bool {
        self.input_count() == 0
    }

    /// Get a short description of what this gadget does.
    pub fn description(&self) -> &'static str {
        match self {
            GadgetKind::TextInput => "Type text to feed it into the pipeline.",
            GadgetKind::HexEncode => "Encodes bytes as hexadecimal text.",
            GadgetKind::HexDecode => "Decodes hexadecimal text; whitespace is ignored.",
            GadgetKind::Base64Encode => "Encodes bytes as base64 text.",
            GadgetKind::Base64Decode => "Decodes base64 text; whitespace is ignored.",
            GadgetKind::Md5 => "MD5 digest of the input.",
            GadgetKind::Sha1 => "SHA-1 digest of the input.",
            GadgetKind::Sha2 => "SHA-256 digest of the input.",
            GadgetKind::UrlEncode => "Percent-encodes text for use in a URL component.",
            GadgetKind::UrlDecode => "Decodes percent-encoded text.",
            GadgetKind::HtmlEncode => "Escapes HTML special characters.",
            GadgetKind::HtmlDecode => "Decodes HTML character references.",
        }
    }

    fn count_ports(&self, direction: PortDirection) -> usize {
        self.ports()
            .iter()
            .filter(|p| p.direction == direction)
            .count()
    }
}

impl std::fmt::Display for GadgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

fn slug(text: &str) -> String {
    text.to_lowercase().replace(' ', "_")
}
