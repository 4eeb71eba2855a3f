//! # Ports Layer
//!
//! Storage abstraction implemented by the adapters.

pub mod store;
