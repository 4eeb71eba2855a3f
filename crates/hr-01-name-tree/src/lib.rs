//! # Name Tree Subsystem (HR-01)
//!
//! Hierarchical namespace of nodes, each identified by the ENS namehash of
//! its path.
//!
//! ## Architecture
//!
//! Nodes live in an arena keyed by id. A node stores its parent as an id and
//! its children as `label -> id`, so the tree never owns itself and cannot
//! form a cycle: parent links only ever point toward the root.
//!
//! ## Registration States
//!
//! - **Virtual**: created on demand for traversal, no owner, no resolver
//! - **Owned**: has an owner but no resolver binding
//! - **Registered**: has both an owner and a resolver binding
//!
//! Resolver lookup for unregistered names walks toward the root (ENSIP-10),
//! see [`NameTree::nearest_resolver`].

pub mod domain;

pub use domain::entities::Node;
pub use domain::errors::NameTreeError;
pub use domain::tree::{Ancestors, NameTree};
