//! Web gadgets: URL (percent) and HTML entity codecs.

use crate::pipeline::error::TransformError;
use percent_encoding::{percent_decode, percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn url_encode(input: &[u8]) -> Vec<u8> {
    percent_encode(input, COMPONENT).to_string().into_bytes()
}

/// Percent-decode, rejecting any `%` not followed by two hex digits.
pub fn url_decode(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            let well_formed = input
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return Err(TransformError::MalformedPercentEscape { offset: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(percent_decode(input).collect())
}

pub fn html_encode(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    let text = std::str::from_utf8(input).map_err(|_| TransformError::InvalidUtf8)?;
    Ok(html_escape::encode_quoted_attribute(text).into_owned().into_bytes())
}

pub fn html_decode(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    let text = std::str::from_utf8(input).map_err(|_| TransformError::InvalidUtf8)?;
    Ok(html_escape::decode_html_entities(text).into_owned().into_bytes())
}
