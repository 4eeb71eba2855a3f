//! Resolver instances by address.

use crate::ports::inbound::Resolver;
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct ResolverDirectory {
    resolvers: RwLock<HashMap<Address, Arc<dyn Resolver>>>,
}

impl ResolverDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver under its own address.
    pub fn insert(&self, resolver: Arc<dyn Resolver>) {
        self.resolvers.write().insert(resolver.address(), resolver);
    }

    pub fn get(&self, address: &Address) -> Option<Arc<dyn Resolver>> {
        self.resolvers.read().get(address).cloned()
    }

    pub fn len(&self) -> usize {
        self.resolvers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
