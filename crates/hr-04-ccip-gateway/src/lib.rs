//! # CCIP Gateway Subsystem (HR-04)
//!
//! Both ends of the signed off-chain lookup protocol (EIP-3668 "CCIP-Read").
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): ABI codec, record call schemas, request
//!   signing, JSON envelopes, configuration and DNS discovery records
//! - **Ports Layer** (`ports/`): the record provider the server answers
//!   from, custom function handlers and the time source
//! - **Adapters Layer** (`adapters/`): file-backed record provider
//! - **Server** (`server.rs`): `CcipHandler` and the axum router
//! - **Client** (`client.rs`): `CcipClient`, the engine's `OffchainGateway`
//!
//! ## Wire Format
//!
//! ```text
//! request  = resolve(bytes dnsName, bytes call)         selector 0x9061b923
//! digest   = keccak256(0x1900 ‖ resolver ‖ uint64 expires ‖
//!                      keccak256(request) ‖ keccak256(result))
//! response = abi.encode(bytes result, uint64 expires, bytes signature)
//! ```
//!
//! HTTP: `POST /` with `{"sender","data"}` returns `{"data"}` on success and
//! `{"message"}` with a 4xx/5xx status otherwise.

pub mod adapters;
pub mod client;
pub mod domain;
pub mod ports;
pub mod server;

pub use adapters::static_provider::{PatternRecord, StaticRecordProvider};
pub use client::CcipClient;
pub use domain::calls::{RecordCall, ResolveRequest};
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::discovery::{txt_rrset, Ens1Record};
pub use domain::envelope::{CcipErrorBody, CcipRequest, CcipResponse, SignedResponse};
pub use domain::errors::GatewayError;
pub use domain::signing::{recover_signer, signing_hash, GatewaySigner};
pub use ports::{FunctionHandler, RecordProvider, RecordView, SystemTimeSource, TimeSource};
pub use server::{router, CcipHandler, CcipHandlerBuilder, GatewayServer};
