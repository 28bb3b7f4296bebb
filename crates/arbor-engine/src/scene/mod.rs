//! The scene tree.
//!
//! Named nodes, each carrying one [`Element`](crate::element::Element).
//! Nodes live in an arena and
//! refer to each other by [`NodeId`]; a node's path is its name chain from
//! the root. Beside ordinary children a node owns *templates*: subtrees
//! that never render but can be instantiated into siblings at the position
//! the template was declared, so declaration order survives late
//! instantiation.

mod tree;

pub use tree::{NodeId, SceneTree};
