//! # Name Tree
//!
//! Arena of [`Node`]s keyed by namehash.
//!
//! ## Invariants
//!
//! - Every id equals `child_node(parent.id, label)`; the root id is zero
//! - A parent's `children` map and the child's `parent` field always agree
//! - Nodes are never removed, so ids handed out stay valid

use super::entities::Node;
use super::errors::NameTreeError;
use shared_types::{child_node, Address, Hash, ZERO_ADDRESS, ZERO_HASH};
use std::collections::HashMap;
use tracing::debug;

/// The registry as a tree of nodes.
#[derive(Debug, Clone)]
pub struct NameTree {
    nodes: HashMap<Hash, Node>,
    unique_counter: u64,
}

impl Default for NameTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ZERO_HASH, Node::new(ZERO_HASH, String::new(), None));
        Self {
            nodes,
            unique_counter: 0,
        }
    }

    pub fn root(&self) -> Hash {
        ZERO_HASH
    }

    pub fn get(&self, id: &Hash) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &Hash) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root always exists
        false
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create (or return the existing) child `label` under `parent`.
    ///
    /// The child starts out virtual.
    pub fn create(&mut self, parent: &Hash, label: &str) -> Result<Hash, NameTreeError> {
        validate_label(label)?;
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| NameTreeError::unknown(parent))?;

        if let Some(existing) = parent_node.children.get(label) {
            return Ok(*existing);
        }

        let id = child_node(parent, label);
        parent_node.children.insert(label.to_string(), id);
        self.nodes
            .insert(id, Node::new(id, label.to_string(), Some(*parent)));
        Ok(id)
    }

    /// Create every node along a dotted name, returning the deepest id.
    pub fn create_name(&mut self, name: &str) -> Result<Hash, NameTreeError> {
        let mut node = ZERO_HASH;
        if name.is_empty() {
            return Ok(node);
        }
        for label in name.rsplit('.') {
            node = self.create(&node, label)?;
        }
        Ok(node)
    }

    /// Create a child under `parent` with a label not yet in use.
    pub fn unique(&mut self, parent: &Hash) -> Result<Hash, NameTreeError> {
        let children = &self
            .nodes
            .get(parent)
            .ok_or_else(|| NameTreeError::unknown(parent))?
            .children;
        let label = loop {
            self.unique_counter += 1;
            let candidate = format!("u{}", self.unique_counter);
            if !children.contains_key(&candidate) {
                break candidate;
            }
        };
        self.create(parent, &label)
    }

    // =========================================================================
    // Registry writes
    // =========================================================================

    /// Bind an owner and (optionally) a resolver to a node.
    ///
    /// A zero resolver address is treated as "no resolver".
    pub fn register(
        &mut self,
        id: &Hash,
        owner: Address,
        resolver: Option<Address>,
    ) -> Result<(), NameTreeError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| NameTreeError::unknown(id))?;
        node.owner = Some(owner);
        node.resolver = resolver.filter(|r| *r != ZERO_ADDRESS);
        debug!(
            node = %shared_types::to_hex(id),
            registered = node.is_registered(),
            "Registered node"
        );
        Ok(())
    }

    /// Replace a node's resolver binding.
    pub fn set_resolver(
        &mut self,
        id: &Hash,
        resolver: Option<Address>,
    ) -> Result<(), NameTreeError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| NameTreeError::unknown(id))?;
        node.resolver = resolver.filter(|r| *r != ZERO_ADDRESS);
        Ok(())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Look up an existing node by dotted name.
    pub fn find(&self, name: &str) -> Option<Hash> {
        if name.is_empty() {
            return Some(ZERO_HASH);
        }
        let mut node = self.nodes.get(&ZERO_HASH)?;
        for label in name.rsplit('.') {
            let child = node.children.get(label)?;
            node = self.nodes.get(child)?;
        }
        Some(node.id)
    }

    /// Full dotted name of a node (empty for the root).
    pub fn name(&self, id: &Hash) -> Option<String> {
        let mut labels = Vec::new();
        for node in self.ancestors(id) {
            if !node.is_root() {
                labels.push(node.label.as_str());
            }
        }
        if labels.is_empty() && !self.contains(id) {
            return None;
        }
        Some(labels.join("."))
    }

    pub fn parent(&self, id: &Hash) -> Option<Hash> {
        self.nodes.get(id)?.parent
    }

    pub fn child(&self, id: &Hash, label: &str) -> Option<Hash> {
        self.nodes.get(id)?.children.get(label).copied()
    }

    pub fn resolver(&self, id: &Hash) -> Option<Address> {
        self.nodes.get(id)?.resolver
    }

    pub fn is_registered(&self, id: &Hash) -> bool {
        self.nodes.get(id).is_some_and(Node::is_registered)
    }

    /// Walk from `id` (inclusive) to the root.
    pub fn ancestors(&self, id: &Hash) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes.get(id),
        }
    }

    /// ENSIP-10 resolver discovery: the closest node (inclusive) with a
    /// resolver, and that resolver.
    ///
    /// When the returned id differs from `id`, the query is a wildcard
    /// lookup answered by an ancestor's resolver.
    pub fn nearest_resolver(&self, id: &Hash) -> Option<(Hash, Address)> {
        self.ancestors(id)
            .find_map(|node| node.resolver.map(|resolver| (node.id, resolver)))
    }
}

/// Iterator returned by [`NameTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a NameTree,
    next: Option<&'a Node>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.and_then(|p| self.tree.nodes.get(&p));
        Some(current)
    }
}

fn validate_label(label: &str) -> Result<(), NameTreeError> {
    if label.is_empty() {
        return Err(NameTreeError::EmptyLabel);
    }
    if label.contains('.') {
        return Err(NameTreeError::InvalidLabel(label.to_string()));
    }
    if label.len() > 255 {
        return Err(NameTreeError::LabelTooLong { len: label.len() });
    }
    Ok(())
}
