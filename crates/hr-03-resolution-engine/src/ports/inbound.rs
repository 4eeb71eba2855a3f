//! # Resolver Capability
//!
//! Every resolver variant answers `resolve(node, field, mode)`. Variants
//! compose by holding other resolvers behind this trait; recursion through
//! fallback pointers shares one [`Scope`] so the visited trail spans the
//! whole call.

use crate::domain::errors::ResolveError;
use crate::domain::mode::QueryMode;
use crate::domain::trail::Trail;
use crate::service::directory::ResolverDirectory;
use async_trait::async_trait;
use hr_02_record_store::{FieldKey, RecordValue};
use shared_types::{Address, Hash};

/// State shared by every hop of one resolution call.
pub struct Scope<'a> {
    /// Resolver instances reachable by address.
    pub resolvers: &'a ResolverDirectory,
    pub trail: Trail,
    /// Node and dotted name the caller asked for. Wildcard names have no
    /// node in the tree, so this is the only place their name lives.
    queried: Option<(Hash, String)>,
}

impl<'a> Scope<'a> {
    pub fn new(resolvers: &'a ResolverDirectory, max_depth: usize) -> Self {
        Self {
            resolvers,
            trail: Trail::new(max_depth),
            queried: None,
        }
    }

    pub fn with_name(mut self, node: Hash, name: impl Into<String>) -> Self {
        self.queried = Some((node, name.into()));
        self
    }

    /// Dotted name of `node` when it is the queried node.
    pub fn queried_name(&self, node: &Hash) -> Option<&str> {
        match &self.queried {
            Some((id, name)) if id == node => Some(name),
            _ => None,
        }
    }
}

#[async_trait]
pub trait Resolver: Send + Sync {
    /// Address this instance is bound under in the name tree.
    fn address(&self) -> Address;

    /// Value of `field` at `node`. An empty value means "no record".
    async fn resolve(
        &self,
        scope: &mut Scope<'_>,
        node: &Hash,
        field: &FieldKey,
        mode: QueryMode,
    ) -> Result<RecordValue, ResolveError>;
}
