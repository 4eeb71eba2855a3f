//! # Outbound Ports
//!
//! Dependencies the engine needs from the rest of the system.

use crate::domain::errors::ResolveError;
use async_trait::async_trait;
use hr_02_record_store::{FieldKey, GatewayContext, RecordValue};
use shared_types::{Address, Hash};

/// Read access to the name tree.
///
/// Every method returns owned data so no lock is held across an await.
pub trait NameRegistry: Send + Sync {
    /// Dotted name of `node`, when it exists in the tree.
    fn name(&self, node: &Hash) -> Option<String>;

    fn parent(&self, node: &Hash) -> Option<Hash>;

    fn child(&self, node: &Hash, label: &str) -> Option<Hash>;

    /// The node's own resolver binding, not inherited.
    fn resolver(&self, node: &Hash) -> Option<Address>;

    fn is_registered(&self, node: &Hash) -> bool;

    /// Closest node (inclusive) with a resolver binding.
    fn nearest_resolver(&self, node: &Hash) -> Option<(Hash, Address)>;

    /// Whether `node` exists in the tree, registered or not.
    fn contains(&self, node: &Hash) -> bool;
}

/// One off-chain lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    /// Dotted name being resolved (DNS-encoded on the wire).
    pub name: String,
    /// Resolver the signature must be bound to.
    pub resolver: Address,
    pub field: FieldKey,
    pub context: GatewayContext,
}

/// Signed off-chain record retrieval (CCIP-Read).
#[async_trait]
pub trait OffchainGateway: Send + Sync {
    /// Fetch and authenticate the value for `request`.
    async fn fetch(&self, request: &GatewayRequest) -> Result<RecordValue, ResolveError>;
}
