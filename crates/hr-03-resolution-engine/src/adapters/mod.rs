//! # Adapters Layer

pub mod registry;
