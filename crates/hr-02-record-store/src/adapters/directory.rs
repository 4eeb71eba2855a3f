//! Resolver address -> record store mapping.
//!
//! Resolver aliases in fallback pointers name another resolver instance by
//! address; the directory is how the engine reaches that instance's store.

use crate::domain::errors::RecordStoreError;
use crate::ports::store::RecordStore;
use parking_lot::RwLock;
use shared_types::{to_hex, Address};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct StoreDirectory {
    stores: RwLock<HashMap<Address, Arc<dyn RecordStore>>>,
}

impl StoreDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `store` to `resolver`, replacing any previous binding.
    pub fn insert(&self, resolver: Address, store: Arc<dyn RecordStore>) {
        self.stores.write().insert(resolver, store);
    }

    pub fn get(&self, resolver: &Address) -> Option<Arc<dyn RecordStore>> {
        self.stores.read().get(resolver).cloned()
    }

    pub fn require(&self, resolver: &Address) -> Result<Arc<dyn RecordStore>, RecordStoreError> {
        self.get(resolver)
            .ok_or_else(|| RecordStoreError::UnknownResolver(to_hex(resolver)))
    }
}
