//! # Shared Types Crate
//!
//! Primitive identifiers used across the hybrid resolver workspace.
//!
//! ## Contents
//!
//! - **Entities**: `Hash`, `Address`, `U256` and hex helpers
//! - **Naming**: keccak-based `namehash` / `labelhash` and DNS wire names
//! - **Errors**: parse failures for the above
//!
//! Nothing in here performs I/O; every function is deterministic.

pub mod entities;
pub mod errors;
pub mod naming;

pub use entities::*;
pub use errors::*;
pub use naming::*;
