//! The envelope wire format.
//!
//! ```text
//! <saltHex>:<ivHex>:<ciphertextHex>:<authTagHex>
//! ```
//!
//! Parsing is purely structural; it never touches key material.

use std::fmt;
use std::str::FromStr;

use crate::cipher::{NONCE_LEN, TAG_LEN};
use crate::codec;
use crate::error::{Field, FormatError};

/// Field separator.
pub const SEPARATOR: char = ':';

/// A parsed envelope.
///
/// `iv` and `tag` are arrays, so a value of this type always satisfies the
/// fixed-length invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Vec<u8>,
    pub iv: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            codec::encode(&self.salt),
            codec::encode(&self.iv),
            codec::encode(&self.ciphertext),
            codec::encode(&self.tag),
        )
    }
}

impl FromStr for Envelope {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [salt, iv, ciphertext, tag] = parts.as_slice() else {
            return Err(FormatError::FieldCount(parts.len()));
        };

        Ok(Self {
            salt: codec::decode(Field::Salt, salt)?,
            iv: codec::decode_fixed(Field::Iv, iv)?,
            ciphertext: codec::decode(Field::Ciphertext, ciphertext)?,
            tag: codec::decode_fixed(Field::AuthTag, tag)?,
        })
    }
}
