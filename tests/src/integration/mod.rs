//! # Integration Scenarios
//!
//! Every scenario runs the real stack: name tree, record stores, the
//! hybrid engine, the verifying client and an axum gateway on
//! `127.0.0.1:0`.

pub mod harness;

mod authentication;
mod protocol;
