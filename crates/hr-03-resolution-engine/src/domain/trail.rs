//! # Visited-Node Trail
//!
//! Per-call record of every node a resolution has entered. Fallback
//! pointers consult it before recursing so cycles and runaway chains
//! terminate.

use crate::domain::errors::FallbackAnomaly;
use shared_types::{to_hex, Hash};

#[derive(Debug, Clone)]
pub struct Trail {
    visited: Vec<Hash>,
    max_depth: usize,
}

impl Trail {
    pub fn new(max_depth: usize) -> Self {
        Self {
            visited: Vec::new(),
            max_depth,
        }
    }

    /// Mark `node` as entered. Re-entering is allowed; the caller only
    /// asks for admission of new fallback targets through `admit`.
    pub fn enter(&mut self, node: &Hash) {
        if !self.contains(node) {
            self.visited.push(*node);
        }
    }

    pub fn contains(&self, node: &Hash) -> bool {
        self.visited.contains(node)
    }

    /// Check whether following a pointer from `from` to `target` is allowed.
    pub fn admit(&self, from: &Hash, target: &Hash) -> Result<(), FallbackAnomaly> {
        if target == from || self.contains(target) {
            return Err(FallbackAnomaly::Cyclic {
                node: to_hex(from),
                target: to_hex(target),
            });
        }
        if self.visited.len() >= self.max_depth {
            return Err(FallbackAnomaly::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    pub fn visited(&self) -> &[Hash] {
        &self.visited
    }
}
