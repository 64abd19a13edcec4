//! Defines error types used by this library.

use thiserror::Error;
use xml::reader::Error as XmlError;

use std::error::Error as StdError;

/// Error type returned by transports.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while encoding, sending or decoding an XML-RPC call.
///
/// A `<fault>` response is *not* an error: it decodes successfully and is reported through
/// [`Response::is_fault`].
///
/// [`Response::is_fault`]: struct.Response.html#method.is_fault
#[derive(Error, Debug)]
pub enum Error {
    /// The response text is not well-formed XML.
    #[error("malformed XML: {0}")]
    MalformedXml(#[from] XmlError),

    /// The XML is well-formed but does not have the structure of an XML-RPC document.
    #[error("unexpected XML (expected {expected}{})",
        .found.as_ref().map(|f| format!(", found {}", f)).unwrap_or_default()
    )]
    UnexpectedXml {
        /// A short description of what was expected.
        expected: String,
        /// What was found instead, if there was anything.
        found: Option<String>,
    },

    /// Could not decode the text of a scalar element as a value of its type.
    ///
    /// For example, `<value><int>AAA</int></value>` describes an invalid value.
    #[error("invalid value for type '{for_type}': {found}")]
    InvalidValue {
        /// The type for which an invalid value was supplied (eg. `int` or `dateTime.iso8601`).
        for_type: &'static str,
        /// The text we encountered.
        found: String,
    },

    /// A `<base64>` payload could not be decoded.
    #[error("invalid base64 data: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The value has no XML-RPC representation.
    #[error("value cannot be represented in XML-RPC: {0}")]
    UnsupportedValueShape(String),

    /// Values or elements are nested deeper than the codec allows.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded {
        /// The limit that was hit.
        limit: usize,
    },

    /// The transport failed to deliver the request or to fetch the response.
    #[error("transport error: {0}")]
    Transport(BoxError),
}

impl Error {
    pub(crate) fn unexpected<E: ToString>(expected: E, found: Option<String>) -> Self {
        Error::UnexpectedXml {
            expected: expected.to_string(),
            found,
        }
    }

    pub(crate) fn invalid_value<S: Into<String>>(for_type: &'static str, found: S) -> Self {
        Error::InvalidValue {
            for_type,
            found: found.into(),
        }
    }
}
