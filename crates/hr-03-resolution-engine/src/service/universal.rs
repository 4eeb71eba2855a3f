//! # Universal Resolver
//!
//! Name-level entry point (ENSIP-10): finds the closest resolver-bearing
//! ancestor of a name and asks that resolver for the full name's record.

use crate::domain::config::{EngineConfig, EngineConfigError};
use crate::domain::errors::ResolveError;
use crate::domain::mode::QueryMode;
use crate::ports::inbound::{Resolver, Scope};
use crate::ports::outbound::NameRegistry;
use crate::service::directory::ResolverDirectory;
use hr_02_record_store::{FieldKey, RecordValue};
use shared_types::{dns_encode, lineage, to_hex, Address, Hash};
use std::sync::Arc;
use tracing::debug;

/// Outcome of a name-level lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Node that was queried.
    pub node: Hash,
    /// Node whose resolver answered; differs from `node` for wildcards.
    pub base: Hash,
    pub resolver: Address,
    pub value: RecordValue,
}

impl Resolution {
    pub fn is_wildcard(&self) -> bool {
        self.node != self.base
    }
}

pub struct UniversalResolver {
    registry: Arc<dyn NameRegistry>,
    resolvers: Arc<ResolverDirectory>,
    config: EngineConfig,
}

impl UniversalResolver {
    pub fn new(
        registry: Arc<dyn NameRegistry>,
        resolvers: Arc<ResolverDirectory>,
        config: EngineConfig,
    ) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self {
            registry,
            resolvers,
            config,
        })
    }

    pub fn resolvers(&self) -> &Arc<ResolverDirectory> {
        &self.resolvers
    }

    /// Node id of `name` and the closest resolver-bearing node above it.
    /// Reads only; names missing from the tree are never added.
    fn locate(&self, name: &str) -> Result<(Hash, Hash, Address), ResolveError> {
        dns_encode(name).map_err(|e| ResolveError::InvalidName(e.to_string()))?;
        let lineage = lineage(name);
        let node = lineage[0];
        let (base, address) = lineage
            .iter()
            .find(|id| self.registry.contains(id))
            .and_then(|anchor| self.registry.nearest_resolver(anchor))
            .ok_or_else(|| ResolveError::NoResolver(name.to_string()))?;
        Ok((node, base, address))
    }

    /// Resolve `field` of a dotted name.
    pub async fn resolve(
        &self,
        name: &str,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<Resolution, ResolveError> {
        let (node, base, address) = self.locate(name)?;
        self.dispatch(&node, Some(name), base, address, field, mode)
            .await
    }

    /// Resolve `field` of a node already present in the tree.
    pub async fn resolve_node(
        &self,
        node: &Hash,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<Resolution, ResolveError> {
        let (base, address) = self
            .registry
            .nearest_resolver(node)
            .ok_or_else(|| ResolveError::NoResolver(to_hex(node)))?;
        self.dispatch(node, None, base, address, field, mode).await
    }

    async fn dispatch(
        &self,
        node: &Hash,
        name: Option<&str>,
        base: Hash,
        address: Address,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<Resolution, ResolveError> {
        debug!(node = %to_hex(node), base = %to_hex(&base), %field, "Dispatching lookup");
        let instance = self
            .resolvers
            .get(&address)
            .ok_or_else(|| ResolveError::NoResolver(to_hex(&address)))?;
        let mut scope = Scope::new(&self.resolvers, self.config.max_fallback_depth);
        if let Some(name) = name {
            scope = scope.with_name(*node, name);
        }
        let value = instance.resolve(&mut scope, node, field, mode).await?;
        Ok(Resolution {
            node: *node,
            base,
            resolver: address,
            value,
        })
    }

    /// Ask a specific resolver, bypassing discovery.
    pub async fn resolve_with(
        &self,
        resolver: &Address,
        node: &Hash,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<RecordValue, ResolveError> {
        let instance = self
            .resolvers
            .get(resolver)
            .ok_or_else(|| ResolveError::NoResolver(to_hex(resolver)))?;
        let mut scope = Scope::new(&self.resolvers, self.config.max_fallback_depth);
        instance.resolve(&mut scope, node, field, mode).await
    }

    /// Resolve several fields of one name, in order. Stops at the first error.
    pub async fn resolve_all(
        &self,
        name: &str,
        fields: &[FieldKey],
        mode: QueryMode,
    ) -> Result<Vec<RecordValue>, ResolveError> {
        let (node, base, address) = self.locate(name)?;
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            let resolution = self
                .dispatch(&node, Some(name), base, address, field, mode)
                .await?;
            values.push(resolution.value);
        }
        Ok(values)
    }
}
