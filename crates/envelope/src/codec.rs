//! Hex framing for envelope fields.
//!
//! Encoding is always lowercase. Decoding is strict: only even-length
//! `[0-9a-f]` is accepted, so every byte sequence has exactly one textual form
//! and a changed character can never decode to the same bytes.

use crate::error::{Field, FormatError};

pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode one envelope field.
///
/// # Errors
///
/// Returns [`FormatError::InvalidHex`] naming `field` on odd length or any
/// character outside `[0-9a-f]`.
pub fn decode(field: Field, text: &str) -> Result<Vec<u8>, FormatError> {
    if !text.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(FormatError::InvalidHex { field });
    }
    hex::decode(text).map_err(|_| FormatError::InvalidHex { field })
}

/// Decode a field that must be exactly `N` bytes.
pub fn decode_fixed<const N: usize>(field: Field, text: &str) -> Result<[u8; N], FormatError> {
    let bytes = decode(field, text)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| FormatError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
