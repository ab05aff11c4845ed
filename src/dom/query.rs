//! DOM queries: by part, class, predicate.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// First node, in tree order, whose part name is `part`.
    pub fn query_part(&self, part: &str) -> Option<NodeId> {
        self.walk_all()
            .into_iter()
            .find(|&id| self.get(id).and_then(|d| d.part.as_deref()) == Some(part))
    }

    /// All nodes, in tree order, carrying `class`.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// All nodes, in tree order, matching `predicate`.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_all()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// Part name of `id`, if it has one.
    pub fn part_of(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|d| d.part.as_deref())
    }

    /// Concatenated text content of the subtree rooted at `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk(id)
            .into_iter()
            .filter_map(|n| self.get(n).and_then(|d| d.text.as_deref()))
            .collect()
    }
}
