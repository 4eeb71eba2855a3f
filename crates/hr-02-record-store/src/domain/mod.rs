//! # Domain Layer
//!
//! Record encodings with no storage or I/O concerns.

pub mod context;
pub mod errors;
pub mod fallback;
pub mod fields;
pub mod records;
