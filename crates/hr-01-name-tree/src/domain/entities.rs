//! # Domain Entities

use shared_types::{Address, Hash};
use std::collections::BTreeMap;

/// A single point in the name tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// `namehash` of the full path.
    pub id: Hash,
    /// Label relative to the parent (empty for the root).
    pub label: String,
    /// Parent id; `None` only for the root.
    pub parent: Option<Hash>,
    /// Children by label.
    pub children: BTreeMap<String, Hash>,
    /// Registry owner, if the node was registered.
    pub owner: Option<Address>,
    /// Resolver instance bound to this node.
    pub resolver: Option<Address>,
}

impl Node {
    pub(crate) fn new(id: Hash, label: String, parent: Option<Hash>) -> Self {
        Self {
            id,
            label,
            parent,
            children: BTreeMap::new(),
            owner: None,
            resolver: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Owner and resolver are both bound.
    pub fn is_registered(&self) -> bool {
        self.owner.is_some() && self.resolver.is_some()
    }

    /// Never written to the registry.
    pub fn is_virtual(&self) -> bool {
        self.owner.is_none() && self.resolver.is_none()
    }
}
