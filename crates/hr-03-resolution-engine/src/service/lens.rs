//! Filtering resolver ("lens").
//!
//! Wraps another resolver, passes through only the fields its policy
//! allows and can pin every query to one mode. Bound to the same node as
//! the inner resolver, it exposes e.g. only the on-chain `text:name`.

use crate::domain::errors::ResolveError;
use crate::domain::mode::QueryMode;
use crate::domain::policy::FieldPolicy;
use crate::ports::inbound::{Resolver, Scope};
use async_trait::async_trait;
use hr_02_record_store::{FieldKey, RecordValue};
use shared_types::{Address, Hash};
use std::sync::Arc;
use tracing::trace;

pub struct LensResolver {
    address: Address,
    inner: Arc<dyn Resolver>,
    policy: FieldPolicy,
    pinned_mode: Option<QueryMode>,
}

impl LensResolver {
    pub fn new(address: Address, inner: Arc<dyn Resolver>, policy: FieldPolicy) -> Self {
        Self {
            address,
            inner,
            policy,
            pinned_mode: None,
        }
    }

    /// Resolve every passed-through field with `mode`, ignoring the caller's.
    pub fn pinned(mut self, mode: QueryMode) -> Self {
        self.pinned_mode = Some(mode);
        self
    }
}

#[async_trait]
impl Resolver for LensResolver {
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
        if !self.policy.allows(field) {
            trace!(%field, "Field filtered by lens");
            return Ok(field.empty_value());
        }
        let mode = self.pinned_mode.unwrap_or(mode);
        self.inner.resolve(scope, node, field, mode).await
    }
}
