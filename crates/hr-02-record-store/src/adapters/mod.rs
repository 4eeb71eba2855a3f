//! # Adapters Module
//!
//! In-memory implementations of the storage port.

pub mod directory;
pub mod memory;
