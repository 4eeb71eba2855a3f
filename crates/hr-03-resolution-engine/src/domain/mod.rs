//! # Domain Layer
//!
//! Pure resolution vocabulary with no I/O dependencies.

pub mod config;
pub mod errors;
pub mod mode;
pub mod policy;
pub mod trail;
