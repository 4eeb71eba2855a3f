//! `NameRegistry` over the in-memory name tree.

use crate::ports::outbound::NameRegistry;
use hr_01_name_tree::NameTree;
use parking_lot::RwLock;
use shared_types::{Address, Hash};

impl NameRegistry for RwLock<NameTree> {
    fn name(&self, node: &Hash) -> Option<String> {
        self.read().name(node)
    }

    fn parent(&self, node: &Hash) -> Option<Hash> {
        self.read().parent(node)
    }

    fn child(&self, node: &Hash, label: &str) -> Option<Hash> {
        self.read().child(node, label)
    }

    fn resolver(&self, node: &Hash) -> Option<Address> {
        self.read().resolver(node)
    }

    fn is_registered(&self, node: &Hash) -> bool {
        self.read().is_registered(node)
    }

    fn nearest_resolver(&self, node: &Hash) -> Option<(Hash, Address)> {
        self.read().nearest_resolver(node)
    }

    fn contains(&self, node: &Hash) -> bool {
        self.read().contains(node)
    }
}
