//! Change-of-base gadgets: hex and base64 codecs.
//!
//! Decoders ignore ASCII whitespace so grouped input such as
//! `"34313432 34333434"` decodes the same as the ungrouped form.

use crate::pipeline::error::TransformError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub fn hex_encode(input: &[u8]) -> Vec<u8> {
    hex::encode(input).into_bytes()
}

pub fn hex_decode(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    Ok(hex::decode(strip_whitespace(input))?)
}

pub fn base64_encode(input: &[u8]) -> Vec<u8> {
    STANDARD.encode(input).into_bytes()
}

pub fn base64_decode(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    Ok(STANDARD.decode(strip_whitespace(input))?)
}

fn strip_whitespace(input: &[u8]) -> Vec<u8> {
    input
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex_encode(b"ABCD"), b"41424344".to_vec());
    }

    #[test]
    fn test_hex_decode() {
        assert_eq!(hex_decode(b"41424344").unwrap(), b"ABCD".to_vec());
        assert_eq!(hex_decode(b"4142 4344\n").unwrap(), b"ABCD".to_vec());
        assert_eq!(hex_decode(b"4a4B").unwrap(), vec![0x4a, 0x4b]);
    }

    #[test]
    fn test_hex_decode_rejects_malformed() {
        assert!(matches!(hex_decode(b"414"), Err(TransformError::InvalidHex(_))));
        assert!(matches!(hex_decode(b"zz"), Err(TransformError::InvalidHex(_))));
    }

    #[test]
    fn test_base64() {
        assert_eq!(base64_encode(b"ABCD"), b"QUJDRA==".to_vec());
        assert_eq!(base64_decode(b"QUJDRA==").unwrap(), b"ABCD".to_vec());
        assert!(matches!(
            base64_decode(b"QUJ!"),
            Err(TransformError::InvalidBase64(_))
        ));
    }
}
