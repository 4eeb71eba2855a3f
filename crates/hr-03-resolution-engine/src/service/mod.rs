//! # Service Layer
//!
//! Resolver variants and the name-level dispatcher.

pub mod direct;
pub mod directory;
pub mod hybrid;
pub mod lens;
pub mod universal;

#[cfg(test)]
pub(crate) mod test_support;
