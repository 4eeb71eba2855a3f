//! # Domain Layer

pub mod abi;
pub mod calls;
pub mod config;
pub mod discovery;
pub mod envelope;
pub mod errors;
pub mod signing;
