//! Tree operations: insert, remove, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

const EMPTY_CHILDREN: &[NodeId] = &[];

/// A widget's internal element tree, backed by a slotmap arena.
///
/// Parent/child links live in secondary maps so removal is O(subtree size)
/// and lookups are O(1).
#[derive(Debug, Clone)]
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a parentless node. The first one inserted becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Append a node under `parent`.
    ///
    /// Returns `None` (and inserts nothing) if `parent` is not in the tree.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        Some(id)
    }

    /// Remove a node and its whole subtree. Returns the removed node's data.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut queue = VecDeque::from([id]);
        let mut removed = None;
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Drop every node. Previously issued ids become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
        self.parent.clear();
        self.root = None;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of `id`, or an empty slice if it has none or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal from `start`.
    pub fn walk(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Pre-order traversal of the whole tree, empty if there is no root.
    pub fn walk_all(&self) -> Vec<NodeId> {
        self.root.map(|r| self.walk(r)).unwrap_or_default()
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    ///        root
    ///       /    \
    ///    field  dropdown
    ///            /   \
    ///          opt0  opt1
    /// ```
    fn build_tree() -> (Dom, [NodeId; 5]) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new("div").with_part("select"));
        let field = dom.append(root, NodeData::new("div").with_part("field")).unwrap();
        let dropdown = dom.append(root, NodeData::new("div").with_part("dropdown")).unwrap();
        let opt0 = dom.append(dropdown, NodeData::new("div").with_part("option-0")).unwrap();
        let opt1 = dom.append(dropdown, NodeData::new("div").with_part("option-1")).unwrap();
        (dom, [root, field, dropdown, opt0, opt1])
    }

    #[test]
    fn first_insert_is_root() {
        let mut dom = Dom::new();
        let a = dom.insert(NodeData::new("div"));
        let _b = dom.insert(NodeData::new("div"));
        assert_eq!(dom.root(), Some(a));
    }

    #[test]
    fn parent_and_children() {
        let (dom, [root, field, dropdown, opt0, opt1]) = build_tree();
        assert_eq!(dom.children(root), &[field, dropdown]);
        assert_eq!(dom.children(dropdown), &[opt0, opt1]);
        assert_eq!(dom.parent(opt1), Some(dropdown));
        assert_eq!(dom.parent(root), None);
    }

    #[test]
    fn append_to_missing_parent_fails() {
        let (mut dom, [_, field, ..]) = build_tree();
        dom.remove(field);
        assert!(dom.append(field, NodeData::new("span")).is_none());
    }

    #[test]
    fn ancestors_nearest_first() {
        let (dom, [root, _, dropdown, opt0, _]) = build_tree();
        assert_eq!(dom.ancestors(opt0), vec![dropdown, root]);
        assert!(dom.is_inclusive_descendant(opt0, root));
        assert!(dom.is_inclusive_descendant(root, root));
        assert!(!dom.is_inclusive_descendant(root, opt0));
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, [root, field, dropdown, opt0, opt1]) = build_tree();
        let removed = dom.remove(dropdown);
        assert_eq!(removed.unwrap().part.as_deref(), Some("dropdown"));
        assert!(!dom.contains(opt0));
        assert!(!dom.contains(opt1));
        assert_eq!(dom.children(root), &[field]);
        assert_eq!(dom.len(), 2);
    }

    #[test]
    fn remove_stale_id_is_none() {
        let (mut dom, [_, field, ..]) = build_tree();
        dom.remove(field);
        assert!(dom.remove(field).is_none());
    }

    #[test]
    fn clear_invalidates_ids() {
        let (mut dom, [root, ..]) = build_tree();
        dom.clear();
        assert!(dom.is_empty());
        assert!(!dom.contains(root));
        assert_eq!(dom.root(), None);
        assert!(dom.walk_all().is_empty());
    }

    #[test]
    fn walk_is_pre_order() {
        let (dom, [root, field, dropdown, opt0, opt1]) = build_tree();
        assert_eq!(dom.walk(root), vec![root, field, dropdown, opt0, opt1]);
        assert_eq!(dom.walk(dropdown), vec![dropdown, opt0, opt1]);
    }
}
