//! # Error Types
//!
//! Parse errors for the shared primitives.

use thiserror::Error;

/// Errors produced while parsing hex strings, addresses and names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded value had the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A DNS label was longer than 255 bytes.
    #[error("Label too long: {len} bytes")]
    LabelTooLong { len: usize },

    /// An empty label appeared inside a dotted name (e.g. `a..eth`).
    #[error("Empty label in name: {0:?}")]
    EmptyLabel(String),

    /// DNS wire-format name was truncated or not zero terminated.
    #[error("Malformed DNS name")]
    MalformedDnsName,

    /// DNS wire-format label was not valid UTF-8.
    #[error("DNS label is not UTF-8")]
    NonUtf8Label,
}
