//! # Adapters Layer

pub mod static_provider;
