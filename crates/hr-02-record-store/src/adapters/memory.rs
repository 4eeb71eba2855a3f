use crate::domain::errors::RecordStoreError;
use crate::domain::fields::{FieldKey, RecordValue};
use crate::domain::records::NodeRecords;
use crate::ports::store::RecordStore;
use parking_lot::RwLock;
use shared_types::Hash;
use std::collections::HashMap;

/// In-memory implementation of `RecordStore`.
///
/// Records live for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<Hash, NodeRecords>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one node's records.
    pub fn snapshot(&self, node: &Hash) -> Option<NodeRecords> {
        self.records.read().get(node).cloned()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, node: &Hash, field: &FieldKey) -> RecordValue {
        self.records
            .read()
            .get(node)
            .map(|r| r.get(field))
            .unwrap_or_else(|| field.empty_value())
    }

    fn set(
        &self,
        node: &Hash,
        field: &FieldKey,
        value: RecordValue,
    ) -> Result<(), RecordStoreError> {
        self.records
            .write()
            .entry(*node)
            .or_default()
            .set(field, value)
    }

    fn onchain(&self, node: &Hash) -> bool {
        self.records.read().get(node).is_some_and(|r| r.onchain)
    }

    fn set_onchain(&self, node: &Hash, onchain: bool) {
        self.records.write().entry(*node).or_default().onchain = onchain;
    }
}
