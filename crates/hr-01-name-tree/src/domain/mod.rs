//! # Domain Layer
//!
//! Pure in-memory tree logic with no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod tree;
