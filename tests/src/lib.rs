//! # Hybrid Resolver Test Suite
//!
//! Unified test crate wiring every subsystem together over real HTTP.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/        # Cross-subsystem scenarios
//!     ├── harness.rs      # live gateway + engine fixture
//!     ├── precedence.rs   # explicit value / flag / mode ordering
//!     ├── delegation.rs   # fallback pointers, "_" child, lenses
//!     ├── authentication.rs
//!     └── protocol.rs     # HTTP surface, multicall, custom functions
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hr-tests
//! cargo test -p hr-tests integration::delegation::
//!
//! # Benchmarks
//! cargo bench -p hr-tests
//! ```

#![allow(dead_code)]

pub mod integration;
