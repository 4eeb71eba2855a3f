//! # Name Tree Errors

use thiserror::Error;

/// Errors that can occur while building or mutating the name tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameTreeError {
    /// Labels must be non-empty.
    #[error("Empty label")]
    EmptyLabel,

    /// Labels may not contain the separator.
    #[error("Invalid label {0:?}: contains '.'")]
    InvalidLabel(String),

    /// Labels are limited to 255 bytes (DNS wire format).
    #[error("Label too long: {len} bytes")]
    LabelTooLong { len: usize },

    /// The referenced node id is not in the arena.
    #[error("Unknown node: {0}")]
    UnknownNode(String),
}

impl NameTreeError {
    pub(crate) fn unknown(id: &shared_types::Hash) -> Self {
        Self::UnknownNode(shared_types::to_hex(id))
    }
}
