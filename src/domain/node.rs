//! Relationship queries over a built tree.

use std::fmt;

use generational_arena::Index;

use crate::domain::arena::{TreeArena, TreeIterator, TreeNode};
use crate::domain::key::NodeKey;

/// Borrowed handle to one node of a [`TreeArena`].
///
/// A `NodeRef` pairs the tree with an arena index, so it can walk both down
/// (children) and up (parent) without the nodes referencing each other
/// directly. Handles are `Copy` and live as long as the tree borrow.
pub struct NodeRef<'a, D> {
    tree: &'a TreeArena<D>,
    idx: Index,
    node: &'a TreeNode<D>,
}

impl<'a, D> NodeRef<'a, D> {
    pub(crate) fn new(tree: &'a TreeArena<D>, idx: Index, node: &'a TreeNode<D>) -> Self {
        Self { tree, idx, node }
    }

    /// Arena index of this node.
    pub fn index(&self) -> Index {
        self.idx
    }

    pub fn id(&self) -> &'a NodeKey {
        &self.node.key
    }

    /// The record this node was built from, None for the synthetic root.
    pub fn data(&self) -> Option<&'a D> {
        self.node.data.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Edge count to the root: 0 for the root, 1 for its direct children.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node.parent;
        while let Some(idx) = current {
            depth += 1;
            current = self.tree.get_node(idx).and_then(|node| node.parent);
        }
        depth
    }

    pub fn parent(&self) -> Option<NodeRef<'a, D>> {
        self.node.parent.and_then(|idx| self.tree.node(idx))
    }

    /// Direct children in attach order.
    pub fn children(&self) -> Vec<NodeRef<'a, D>> {
        self.node
            .children
            .iter()
            .filter_map(|&idx| self.tree.node(idx))
            .collect()
    }

    pub fn has_children(&self) -> bool {
        !self.node.children.is_empty()
    }

    pub fn count_children(&self) -> usize {
        self.node.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// Position of this node within its parent's children.
    fn position(&self) -> Option<(NodeRef<'a, D>, usize)> {
        let parent = self.parent()?;
        let pos = parent.node.children.iter().position(|&c| c == self.idx)?;
        Some((parent, pos))
    }

    /// Sibling `offset` places away in the parent's children.
    ///
    /// Negative offsets look backwards, `0` is the node itself. Out of range
    /// offsets and the root yield None.
    pub fn sibling(&self, offset: isize) -> Option<NodeRef<'a, D>> {
        let (parent, pos) = self.position()?;
        let target = pos.checked_add_signed(offset)?;
        parent
            .node
            .children
            .get(target)
            .and_then(|&idx| self.tree.node(idx))
    }

    pub fn previous_sibling(&self) -> Option<NodeRef<'a, D>> {
        self.sibling(-1)
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a, D>> {
        self.sibling(1)
    }

    /// Other children of the parent, in order. Empty for the root.
    pub fn siblings(&self) -> Vec<NodeRef<'a, D>> {
        self.siblings_and_self()
            .into_iter()
            .filter(|node| node.idx != self.idx)
            .collect()
    }

    /// All children of the parent including this node. Empty for the root.
    pub fn siblings_and_self(&self) -> Vec<NodeRef<'a, D>> {
        self.parent()
            .map(|parent| parent.children())
            .unwrap_or_default()
    }

    /// Nearest first, ending with the root.
    pub fn ancestors(&self) -> Vec<NodeRef<'a, D>> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            ancestors.push(node);
        }
        ancestors
    }

    pub fn ancestors_and_self(&self) -> Vec<NodeRef<'a, D>> {
        let mut nodes = vec![*self];
        nodes.extend(self.ancestors());
        nodes
    }

    /// Everything below this node in pre-order.
    pub fn descendants(&self) -> Vec<NodeRef<'a, D>> {
        self.iter().skip(1).collect()
    }

    pub fn descendants_and_self(&self) -> Vec<NodeRef<'a, D>> {
        self.iter().collect()
    }

    /// Pre-order traversal of the subtree rooted here.
    pub fn iter(&self) -> TreeIterator<'a, D> {
        TreeIterator::new(self.tree, self.idx)
    }
}

impl<D> Clone for NodeRef<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for NodeRef<'_, D> {}

/// Two handles are equal when they point at the same node of the same tree.
impl<D> PartialEq for NodeRef<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}

impl<D> Eq for NodeRef<'_, D> {}

impl<D> fmt::Debug for NodeRef<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.node.key)
            .field("children", &self.node.children.len())
            .finish_non_exhaustive()
    }
}

impl<D> fmt::Display for NodeRef<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.key)
    }
}
