//! Direct (on-chain only) resolver: explicit values, nothing else.

use crate::domain::errors::ResolveError;
use crate::domain::mode::QueryMode;
use crate::ports::inbound::{Resolver, Scope};
use async_trait::async_trait;
use hr_02_record_store::{FieldKey, RecordStore, RecordValue};
use shared_types::{Address, Hash};
use std::sync::Arc;

pub struct DirectResolver {
    address: Address,
    store: Arc<dyn RecordStore>,
}

impl DirectResolver {
    pub fn new(address: Address, store: Arc<dyn RecordStore>) -> Self {
        Self { address, store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }
}

#[async_trait]
impl Resolver for DirectResolver {
    fn address(&self) -> Address {
        self.address
    }

    async fn resolve(
        &self,
        scope: &mut Scope<'_>,
        node: &Hash,
        field: &FieldKey,
        _mode: QueryMode,
    ) -> Result<RecordValue, ResolveError> {
        scope.trail.enter(node);
        Ok(self.store.get(node, field))
    }
}
