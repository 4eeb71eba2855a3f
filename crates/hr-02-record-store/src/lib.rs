//! # Record Store Subsystem (HR-02)
//!
//! Authoritative per-node field values held by each resolver instance.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): field keys, values, the fallback pointer
//!   and gateway context encodings
//! - **Ports Layer** (`ports/`): the `RecordStore` trait
//! - **Adapters Layer** (`adapters/`): in-memory store and the directory
//!   mapping resolver addresses to their stores
//!
//! ## Reserved Records
//!
//! | Record | Meaning |
//! |---|---|
//! | `addr:<FALLBACK_COIN_TYPE>` | fallback pointer (32 bytes node, 20 bytes resolver) |
//! | `text:ccip.context` | `"<signer> <endpoint>"` gateway binding |
//!
//! An empty value always means "unset"; there is no separate existence bit.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::directory::StoreDirectory;
pub use adapters::memory::InMemoryRecordStore;
pub use domain::context::{GatewayContext, CONTEXT_KEY};
pub use domain::errors::RecordStoreError;
pub use domain::fallback::{
    fallback_field, FallbackPointer, DISABLED_SENTINEL, FALLBACK_COIN_TYPE, FALLBACK_COIN_TYPE_HEX,
};
pub use domain::fields::{FieldKey, RecordValue, COIN_TYPE_ETH};
pub use domain::records::NodeRecords;
pub use ports::store::RecordStore;
