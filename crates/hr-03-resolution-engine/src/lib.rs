//! # Resolution Engine Subsystem (HR-03)
//!
//! Computes a node's record value by precedence: explicit on-chain value,
//! then fallback delegation, then the off-chain gateway.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): query modes, errors, the visited-node
//!   trail and field policies; no I/O
//! - **Ports Layer** (`ports/`): the `Resolver` capability (inbound) and the
//!   registry / off-chain gateway dependencies (outbound)
//! - **Adapters Layer** (`adapters/`): `NameRegistry` over the in-memory
//!   name tree
//! - **Service Layer** (`service/`): resolver variants and the ENSIP-10
//!   dispatcher
//!
//! ## Precedence (per field)
//!
//! ```text
//! ForceOff ───────────────────────────────────────────────┐
//!                                                         ▼
//! explicit value ─► fallback pointer ─► "_" child ─► onchain? / no ccip? ─► gateway
//!   (non-empty       (node alias:          (only when        (empty)        (nearest
//!    wins)            recurse;              pointer                          ccip.context)
//!                     resolver alias:       unset)
//!                     single hop)
//! ```
//!
//! Malformed or cyclic fallback pointers degrade to "no fallback" and are
//! logged; they never surface as errors.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::config::{EngineConfig, EngineConfigError};
pub use domain::errors::{FallbackAnomaly, ResolveError};
pub use domain::mode::{OnchainOverride, QueryMode};
pub use domain::policy::{FieldMatcher, FieldPolicy};
pub use domain::trail::Trail;
pub use ports::inbound::{Resolver, Scope};
pub use ports::outbound::{GatewayRequest, NameRegistry, OffchainGateway};
pub use service::directory::ResolverDirectory;
pub use service::direct::DirectResolver;
pub use service::hybrid::HybridResolver;
pub use service::lens::LensResolver;
pub use service::universal::{Resolution, UniversalResolver};
