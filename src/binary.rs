//! The `<base64>` payload holder.

use crate::error::Result;

use std::ops::Deref;

/// Binary data, sent as a base64 encoded `<base64>` value.
///
/// Wrapping the bytes keeps them apart from text: a `Vec<u8>` would be ambiguous between a blob
/// and an array of small integers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Binary {
    bytes: Vec<u8>,
}

impl Binary {
    /// Wraps raw bytes.
    pub fn new<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Binary {
            bytes: bytes.into(),
        }
    }

    /// Decodes base64 text as found inside a `<base64>` element.
    ///
    /// Whitespace is ignored, since many servers wrap long payloads across lines.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEncoding` if the text is not valid base64.
    pub fn decode(text: &str) -> Result<Self> {
        let compact: String = text.split_whitespace().collect();
        Ok(Binary::new(base64::decode(&compact)?))
    }

    /// Encodes the bytes as base64 text.
    pub fn encode(&self) -> String {
        base64::encode(&self.bytes)
    }

    /// Returns the wrapped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Deref for Binary {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary::new(bytes)
    }
}

impl<'a> From<&'a [u8]> for Binary {
    fn from(bytes: &'a [u8]) -> Self {
        Binary::new(bytes)
    }
}
