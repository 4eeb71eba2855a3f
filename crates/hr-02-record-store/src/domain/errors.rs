//! # Record Store Errors

use thiserror::Error;

/// Errors raised by record store reads/writes and record parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordStoreError {
    /// A field key string could not be parsed.
    #[error("Malformed field key: {0:?}")]
    MalformedFieldKey(String),

    /// The value kind does not fit the field (e.g. text into `contenthash`).
    #[error("Value kind does not match field {field}")]
    ValueMismatch { field: String },

    /// A `ccip.context` record could not be parsed.
    #[error("Malformed gateway context: {0}")]
    MalformedContext(String),

    /// No store is bound to the given resolver address.
    #[error("Unknown resolver instance: {0}")]
    UnknownResolver(String),
}
