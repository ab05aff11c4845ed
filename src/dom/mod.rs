//! Element arena: the slotmap-backed internal tree each widget renders into.

pub mod markup;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
