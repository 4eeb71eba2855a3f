//! Record provider port.

use crate::domain::errors::GatewayError;
use async_trait::async_trait;
use hr_02_record_store::{FieldKey, NodeRecords, RecordValue};
use std::sync::Arc;

/// Records of one name, as known off-chain.
pub trait RecordView: Send + Sync {
    /// Value of `field`, `None` when unknown.
    fn get(&self, field: &FieldKey) -> Option<RecordValue>;
}

impl RecordView for NodeRecords {
    fn get(&self, field: &FieldKey) -> Option<RecordValue> {
        let value = NodeRecords::get(self, field);
        (!value.is_empty()).then_some(value)
    }
}

/// Off-chain record source, consulted once per request (ENSIP-10 style:
/// the full queried name, wildcards included).
#[async_trait]
pub trait RecordProvider: Send + Sync {
    async fn record(&self, name: &str) -> Result<Option<Arc<dyn RecordView>>, GatewayError>;
}
