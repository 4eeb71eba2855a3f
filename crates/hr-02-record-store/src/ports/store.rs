//! # Record Store Port
//!
//! Read/write access to one resolver instance's records.
//!
//! Implementations must be thread-safe (`Send + Sync`); reads take `&self`
//! and never block on I/O.

use crate::domain::context::{GatewayContext, CONTEXT_KEY};
use crate::domain::errors::RecordStoreError;
use crate::domain::fallback::{fallback_field, FallbackPointer};
use crate::domain::fields::{FieldKey, RecordValue};
use shared_types::{Hash, U256};
use tracing::warn;

/// Record storage bound to a single resolver instance.
pub trait RecordStore: Send + Sync {
    /// Explicit value of `field` at `node`; empty when unset.
    fn get(&self, node: &Hash, field: &FieldKey) -> RecordValue;

    /// Write (or, with an empty value, clear) a field.
    fn set(&self, node: &Hash, field: &FieldKey, value: RecordValue)
        -> Result<(), RecordStoreError>;

    fn onchain(&self, node: &Hash) -> bool;

    fn set_onchain(&self, node: &Hash, onchain: bool);

    // =========================================================================
    // Provided helpers
    // =========================================================================

    /// Flip the onchain flag, returning the new state.
    fn toggle_onchain(&self, node: &Hash) -> bool {
        let next = !self.onchain(node);
        self.set_onchain(node, next);
        next
    }

    fn text(&self, node: &Hash, key: &str) -> String {
        match self.get(node, &FieldKey::text(key)) {
            RecordValue::Text(text) => text,
            _ => String::new(),
        }
    }

    fn set_text(&self, node: &Hash, key: &str, value: &str) -> Result<(), RecordStoreError> {
        self.set(node, &FieldKey::text(key), value.into())
    }

    fn set_addr(
        &self,
        node: &Hash,
        coin_type: U256,
        value: Vec<u8>,
    ) -> Result<(), RecordStoreError> {
        self.set(node, &FieldKey::Addr(coin_type), value.into())
    }

    fn fallback(&self, node: &Hash) -> FallbackPointer {
        match self.get(node, &fallback_field()) {
            RecordValue::Bytes(bytes) => FallbackPointer::decode(&bytes),
            _ => FallbackPointer::Unset,
        }
    }

    fn set_fallback(&self, node: &Hash, pointer: FallbackPointer) -> Result<(), RecordStoreError> {
        self.set(node, &fallback_field(), pointer.encode().into())
    }

    /// Gateway context published at `node`. Unparseable records are
    /// logged and treated as absent.
    fn context(&self, node: &Hash) -> Option<GatewayContext> {
        let text = self.text(node, CONTEXT_KEY);
        match GatewayContext::from_record(&text) {
            Ok(context) => context,
            Err(e) => {
                warn!(node = %shared_types::to_hex(node), error = %e, "Ignoring malformed gateway context");
                None
            }
        }
    }

    fn set_context(
        &self,
        node: &Hash,
        context: Option<&GatewayContext>,
    ) -> Result<(), RecordStoreError> {
        let text = context.map(ToString::to_string).unwrap_or_default();
        self.set_text(node, CONTEXT_KEY, &text)
    }
}
