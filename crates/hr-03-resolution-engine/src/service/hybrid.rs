//! # Hybrid Resolver
//!
//! Per-field precedence for one resolver instance:
//!
//! 1. `ForceOff` skips straight to step 5.
//! 2. A non-empty explicit value wins.
//! 3. The fallback pointer: a node alias recurses (full algorithm, same
//!    mode) and a resolver alias reads that resolver's explicit value.
//!    When unset, a registered `_` child's explicit value is used.
//! 4. Off-chain is suppressed by `ForceOn`, by the onchain flag and when
//!    the caller disallows gateway round trips.
//! 5. The gateway named by the nearest `ccip.context` answers.

use crate::domain::config::{EngineConfig, EngineConfigError};
use crate::domain::errors::{FallbackAnomaly, ResolveError};
use crate::domain::mode::{OnchainOverride, QueryMode};
use crate::ports::inbound::{Resolver, Scope};
use crate::ports::outbound::{GatewayRequest, NameRegistry, OffchainGateway};
use async_trait::async_trait;
use hr_02_record_store::{
    fallback_field, FallbackPointer, FieldKey, GatewayContext, RecordStore, RecordValue,
    StoreDirectory,
};
use shared_types::{lineage, to_hex, Address, Hash};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Label of the implicit fallback child.
pub const IMPLICIT_FALLBACK_LABEL: &str = "_";

pub struct HybridResolver {
    address: Address,
    store: Arc<dyn RecordStore>,
    stores: Arc<StoreDirectory>,
    registry: Arc<dyn NameRegistry>,
    gateway: Arc<dyn OffchainGateway>,
    config: EngineConfig,
}

impl HybridResolver {
    pub fn new(
        address: Address,
        store: Arc<dyn RecordStore>,
        stores: Arc<StoreDirectory>,
        registry: Arc<dyn NameRegistry>,
        gateway: Arc<dyn OffchainGateway>,
        config: EngineConfig,
    ) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self {
            address,
            store,
            stores,
            registry,
            gateway,
            config,
        })
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    // =========================================================================
    // Fallback
    // =========================================================================

    /// Decoded pointer at `node`; malformed lengths are reported and read
    /// as disabled.
    fn fallback_pointer(&self, node: &Hash) -> FallbackPointer {
        match self.store.get(node, &fallback_field()) {
            RecordValue::Bytes(bytes) => {
                if FallbackPointer::is_malformed(&bytes) {
                    let anomaly = FallbackAnomaly::Malformed {
                        node: to_hex(node),
                        len: bytes.len(),
                    };
                    warn!(%anomaly, "Fallback disabled");
                }
                FallbackPointer::decode(&bytes)
            }
            _ => FallbackPointer::Unset,
        }
    }

    fn store_for(&self, resolver: &Address) -> Option<Arc<dyn RecordStore>> {
        if *resolver == self.address {
            return Some(self.store.clone());
        }
        self.stores.get(resolver)
    }

    /// Steps 3 and 4. `None` means "keep going".
    async fn resolve_fallback(
        &self,
        scope: &mut Scope<'_>,
        node: &Hash,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<Option<RecordValue>, ResolveError> {
        match self.fallback_pointer(node) {
            FallbackPointer::Disabled => Ok(None),
            FallbackPointer::Node(target) => {
                if let Err(anomaly) = scope.trail.admit(node, &target) {
                    warn!(%anomaly, "Fallback ignored");
                    return Ok(None);
                }
                let Some((_, address)) = self.registry.nearest_resolver(&target) else {
                    debug!(target = %to_hex(&target), "Fallback target has no resolver");
                    return Ok(None);
                };
                let Some(resolver) = scope.resolvers.get(&address) else {
                    warn!(resolver = %to_hex(&address), "Fallback target resolver not deployed");
                    return Ok(None);
                };
                trace!(from = %to_hex(node), to = %to_hex(&target), "Following node alias");
                let value = resolver.resolve(scope, &target, field, mode).await?;
                Ok((!value.is_empty()).then_some(value))
            }
            FallbackPointer::Resolver(address) => {
                let Some(store) = self.store_for(&address) else {
                    warn!(resolver = %to_hex(&address), "Fallback resolver has no record store");
                    return Ok(None);
                };
                let value = store.get(node, field);
                Ok((!value.is_empty()).then_some(value))
            }
            FallbackPointer::Unset => Ok(self.implicit_fallback(node, field)),
        }
    }

    fn implicit_fallback(&self, node: &Hash, field: &FieldKey) -> Option<RecordValue> {
        let child = self.registry.child(node, IMPLICIT_FALLBACK_LABEL)?;
        if !self.registry.is_registered(&child) {
            return None;
        }
        let address = self.registry.resolver(&child)?;
        let value = self.store_for(&address)?.get(&child, field);
        (!value.is_empty()).then_some(value)
    }

    // =========================================================================
    // Off-chain
    // =========================================================================

    /// Dotted name of `node`: the caller's name for the queried node,
    /// otherwise the tree's.
    fn name_of(&self, scope: &Scope<'_>, node: &Hash) -> Option<String> {
        scope
            .queried_name(node)
            .map(str::to_string)
            .or_else(|| self.registry.name(node))
    }

    /// `node` and its ancestors, nearest first.
    fn lineage(&self, name: Option<&str>, node: &Hash) -> Vec<Hash> {
        if let Some(name) = name {
            return lineage(name);
        }
        let mut ids = vec![*node];
        let mut cursor = *node;
        while let Some(parent) = self.registry.parent(&cursor) {
            ids.push(parent);
            cursor = parent;
        }
        ids
    }

    /// The node's own onchain flag, or, for a node resolved by wildcard,
    /// the flag of the ancestor this resolver is bound to.
    fn is_onchain(&self, lineage: &[Hash]) -> bool {
        let Some((node, ancestors)) = lineage.split_first() else {
            return false;
        };
        if self.store.onchain(node) {
            return true;
        }
        if self.registry.resolver(node).is_some() {
            return false;
        }
        let base = ancestors
            .iter()
            .find_map(|id| self.registry.resolver(id).map(|address| (id, address)));
        match base {
            Some((base, address)) if address == self.address => self.store.onchain(base),
            _ => false,
        }
    }

    /// Nearest non-empty `ccip.context` along the lineage.
    fn find_context(&self, lineage: &[Hash]) -> Option<GatewayContext> {
        lineage.iter().find_map(|id| self.store.context(id))
    }

    async fn resolve_offchain(
        &self,
        scope: &Scope<'_>,
        node: &Hash,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<RecordValue, ResolveError> {
        let empty = field.empty_value();
        if mode.onchain_override == OnchainOverride::ForceOn {
            return Ok(empty);
        }
        let name = self.name_of(scope, node);
        let lineage = self.lineage(name.as_deref(), node);
        if self.is_onchain(&lineage) {
            trace!(node = %to_hex(node), "Onchain flag set; gateway suppressed");
            return Ok(empty);
        }
        if !mode.allow_gateway_roundtrip {
            return Ok(empty);
        }
        let Some(context) = self.find_context(&lineage) else {
            return Ok(empty);
        };
        let Some(name) = name else {
            warn!(node = %to_hex(node), "Cannot redirect unnamed node off-chain");
            return Ok(empty);
        };

        let request = GatewayRequest {
            name,
            resolver: self.address,
            field: field.clone(),
            context,
        };
        debug!(name = %request.name, %field, endpoint = %request.context.endpoint, "Redirecting to gateway");

        let timeout = self.config.gateway_timeout();
        let value = tokio::time::timeout(timeout, self.gateway.fetch(&request))
            .await
            .map_err(|_| {
                ResolveError::GatewayUnreachable(format!(
                    "no response within {}ms",
                    timeout.as_millis()
                ))
            })??;

        if !field.accepts(&value) {
            return Err(ResolveError::MalformedResponse(format!(
                "gateway returned wrong value kind for {field}"
            )));
        }
        Ok(value)
    }
}

#[async_trait]
impl Resolver for HybridResolver {
    fn address(&self) -> Address {
        self.address
    }

    async fn resolve(
        &self,
        scope: &mut Scope<'_>,
        node: &Hash,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<RecordValue, ResolveError> {
        scope.trail.enter(node);

        if !mode.skips_local() {
            let value = self.store.get(node, field);
            if !value.is_empty() {
                return Ok(value);
            }
            if let Some(value) = self.resolve_fallback(scope, node, field, mode).await? {
                return Ok(value);
            }
        }

        self.resolve_offchain(scope, node, field, mode).await
    }
}
