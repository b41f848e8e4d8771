//! Element tree: slotmap-backed nodes that capabilities decorate.

pub mod node;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
