//! # Ports Layer
//!
//! - `inbound`: the `Resolver` capability every resolver variant provides
//! - `outbound`: name registry reads and the off-chain gateway

pub mod inbound;
pub mod outbound;
