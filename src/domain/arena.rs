//! Arena-backed tree storage and traversal.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::builder::TreeBuilder;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::key::NodeKey;
use crate::domain::node::NodeRef;
use crate::domain::record::Record;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode<D> {
    /// Identifier taken from the input record (or the configured root id)
    pub key: NodeKey,
    /// The input record, None for the synthetic root
    pub data: Option<D>,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in attach order
    pub children: Vec<Index>,
}

/// Arena-based tree built once from flat records.
///
/// Every tree has exactly one synthetic root that is not part of the input.
/// Parent links are arena indices, so nodes never own each other; all node
/// lifetimes are bound to the arena. There is no public mutation API: once
/// [`TreeBuilder::build`] returns, the tree is read-only and may be shared
/// across threads whenever `D` allows it.
#[derive(Debug)]
pub struct TreeArena<D> {
    /// Arena storage for all tree nodes, root included
    arena: Arena<TreeNode<D>>,
    /// Identifier to arena index
    index: HashMap<NodeKey, Index>,
    /// Index of the synthetic root
    root: Index,
}

impl<D> TreeArena<D> {
    /// Empty tree holding only the synthetic root.
    pub(crate) fn with_root(root_id: NodeKey) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            key: root_id.clone(),
            data: None,
            parent: None,
            children: Vec::new(),
        });
        let mut index = HashMap::new();
        index.insert(root_id, root);
        Self { arena, index, root }
    }

    /// Registers a detached node. Edges are wired later by [`Self::attach`].
    pub(crate) fn insert_node(&mut self, key: NodeKey, data: D) -> TreeResult<Index> {
        if self.index.contains_key(&key) {
            return Err(TreeError::DuplicateId(key));
        }
        let node_idx = self.arena.insert(TreeNode {
            key: key.clone(),
            data: Some(data),
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(key, node_idx);
        Ok(node_idx)
    }

    pub(crate) fn attach(&mut self, parent_idx: Index, child_idx: Index) {
        if let Some(child) = self.arena.get_mut(child_idx) {
            child.parent = Some(parent_idx);
        }
        if let Some(parent) = self.arena.get_mut(parent_idx) {
            parent.children.push(child_idx);
        }
    }

    pub(crate) fn index_of(&self, key: &NodeKey) -> Option<Index> {
        self.index.get(key).copied()
    }

    pub fn root(&self) -> NodeRef<'_, D> {
        NodeRef::new(self, self.root, &self.arena[self.root])
    }

    pub fn root_id(&self) -> &NodeKey {
        &self.arena[self.root].key
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<D>> {
        self.arena.get(idx)
    }

    /// Navigation handle for an arena index.
    pub fn node(&self, idx: Index) -> Option<NodeRef<'_, D>> {
        self.arena.get(idx).map(|node| NodeRef::new(self, idx, node))
    }

    /// Looks up a node by identifier. The root is found under its configured id.
    #[instrument(level = "trace", skip(self))]
    pub fn get_node_by_id(&self, key: &NodeKey) -> TreeResult<NodeRef<'_, D>> {
        self.index_of(key)
            .and_then(|idx| self.node(idx))
            .ok_or_else(|| TreeError::NotFound(key.clone()))
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Direct children of the synthetic root, in input order.
    #[instrument(level = "trace", skip(self))]
    pub fn root_nodes(&self) -> Vec<NodeRef<'_, D>> {
        self.root().children()
    }

    /// Every node except the root, in pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn all_nodes(&self) -> Vec<NodeRef<'_, D>> {
        self.iter().skip(1).collect()
    }

    /// Number of nodes built from input records (root excluded).
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the deepest node, 0 for a tree without records.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter_with_depth()
            .map(|(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }

    /// Collects all leaf nodes (nodes with no children) in pre-order.
    ///
    /// A tree without records has no leaves; the root is never reported.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeRef<'_, D>> {
        self.iter()
            .skip(1)
            .filter(|node| !node.has_children())
            .collect()
    }

    /// One branch per leaf, running from the leaf up to its top-level node.
    ///
    /// The synthetic root is not part of any branch.
    #[instrument(level = "debug", skip(self))]
    pub fn branches(&self) -> Vec<Vec<NodeRef<'_, D>>> {
        self.leaf_nodes()
            .into_iter()
            .map(|leaf| {
                leaf.ancestors_and_self()
                    .into_iter()
                    .filter(|node| !node.is_root())
                    .collect()
            })
            .collect()
    }

    /// Pre-order traversal starting at (and including) the root.
    pub fn iter(&self) -> TreeIterator<'_, D> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal paired with each node's depth (root = 0).
    pub fn iter_with_depth(&self) -> DepthIterator<'_, D> {
        DepthIterator {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    /// Post-order traversal ending with the root.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, D> {
        PostOrderIterator::new(self, self.root)
    }
}

impl<D: Record> TreeArena<D> {
    /// Builds a tree under the default root id `0`.
    ///
    /// Shorthand for `TreeBuilder::new().build(records)`.
    pub fn build<I>(records: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = D>,
    {
        TreeBuilder::new().build(records)
    }
}

/// Depth-first pre-order iterator over a subtree.
pub struct TreeIterator<'a, D> {
    tree: &'a TreeArena<D>,
    stack: Vec<Index>,
}

impl<'a, D> TreeIterator<'a, D> {
    pub(crate) fn new(tree: &'a TreeArena<D>, start: Index) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a, D> Iterator for TreeIterator<'a, D> {
    type Item = NodeRef<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some(NodeRef::new(self.tree, current_idx, node));
            }
        }
        None
    }
}

/// Pre-order iterator that tracks depth on its own stack.
pub struct DepthIterator<'a, D> {
    tree: &'a TreeArena<D>,
    stack: Vec<(Index, usize)>,
}

impl<'a, D> Iterator for DepthIterator<'a, D> {
    type Item = (NodeRef<'a, D>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((NodeRef::new(self.tree, current_idx, node), depth));
            }
        }
        None
    }
}

/// Depth-first post-order iterator over a subtree.
pub struct PostOrderIterator<'a, D> {
    tree: &'a TreeArena<D>,
    stack: Vec<(Index, bool)>,
}

impl<'a, D> PostOrderIterator<'a, D> {
    pub(crate) fn new(tree: &'a TreeArena<D>, start: Index) -> Self {
        Self {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<'a, D> Iterator for PostOrderIterator<'a, D> {
    type Item = NodeRef<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some(NodeRef::new(self.tree, current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Entry;

    fn keys<D>(nodes: &[NodeRef<'_, D>]) -> Vec<String> {
        nodes.iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn given_fresh_arena_then_only_root_exists() {
        let tree: TreeArena<Entry> = TreeArena::with_root(NodeKey::from("top"));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.root_id(), &NodeKey::from("top"));
        assert!(tree.all_nodes().is_empty());
        assert!(tree.leaf_nodes().is_empty());
        assert_eq!(tree.iter().count(), 1);
    }

    #[test]
    fn given_duplicate_key_when_inserting_then_errors() {
        let mut tree = TreeArena::with_root(NodeKey::default());
        tree.insert_node(NodeKey::from(1), Entry::new(1, None)).unwrap();
        let err = tree
            .insert_node(NodeKey::from(1), Entry::new(1, None))
            .unwrap_err();
        assert_eq!(err, TreeError::DuplicateId(NodeKey::from(1)));
    }

    #[test]
    fn given_root_key_when_inserting_then_errors() {
        let mut tree = TreeArena::with_root(NodeKey::default());
        let err = tree
            .insert_node(NodeKey::from(0), Entry::new(0, None))
            .unwrap_err();
        assert_eq!(err, TreeError::DuplicateId(NodeKey::from(0)));
    }

    #[test]
    fn given_wired_nodes_when_iterating_then_preorder_and_postorder() {
        //   0
        //   ├── 1
        //   │   └── 2
        //   └── 3
        let mut tree = TreeArena::with_root(NodeKey::default());
        let n1 = tree.insert_node(NodeKey::from(1), Entry::new(1, None)).unwrap();
        let n2 = tree.insert_node(NodeKey::from(2), Entry::child_of(2, 1)).unwrap();
        let n3 = tree.insert_node(NodeKey::from(3), Entry::new(3, None)).unwrap();
        let root = tree.root;
        tree.attach(root, n1);
        tree.attach(n1, n2);
        tree.attach(root, n3);

        let pre: Vec<_> = tree.iter().collect();
        assert_eq!(keys(&pre), vec!["0", "1", "2", "3"]);

        let post: Vec<_> = tree.iter_postorder().collect();
        assert_eq!(keys(&post), vec!["2", "1", "3", "0"]);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), 2);
        assert_eq!(keys(&tree.leaf_nodes()), vec!["2", "3"]);

        let depths: Vec<usize> = tree.iter_with_depth().map(|(_, d)| d).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }
}
