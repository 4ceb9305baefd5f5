//! Tree builder turning flat parent-referencing records into a hierarchy.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{TreeError, TreeResult};
use crate::domain::key::NodeKey;
use crate::domain::record::Record;

/// Constructs trees from flat records.
///
/// Building runs in two passes. The first creates a node for every record,
/// the second wires each node to its declared parent. Children may therefore
/// appear in the input before their parents. Records without a parent hang
/// directly below the synthetic root.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    root_id: NodeKey,
}

/// Child edges waiting to be wired, grouped by parent in first-seen order.
#[derive(Default)]
struct PendingEdges {
    groups: Vec<(NodeKey, Vec<(NodeKey, Index)>)>,
    positions: HashMap<NodeKey, usize>,
}

impl PendingEdges {
    fn push(&mut self, parent: NodeKey, child: NodeKey, child_idx: Index) {
        let pos = match self.positions.get(&parent) {
            Some(&pos) => pos,
            None => {
                self.positions.insert(parent.clone(), self.groups.len());
                self.groups.push((parent, Vec::new()));
                self.groups.len() - 1
            }
        };
        self.groups[pos].1.push((child, child_idx));
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for the synthetic root (default `0`).
    pub fn root_id(mut self, root_id: impl Into<NodeKey>) -> Self {
        self.root_id = root_id.into();
        self
    }

    /// Builds a tree from `records`.
    ///
    /// Fails without returning a partial tree when a record is its own parent,
    /// references a parent that does not exist, reuses an id, or belongs to a
    /// cycle that never reaches the root.
    #[instrument(level = "debug", skip(self, records), fields(root_id = %self.root_id))]
    pub fn build<D, I>(&self, records: I) -> TreeResult<TreeArena<D>>
    where
        D: Record,
        I: IntoIterator<Item = D>,
    {
        let mut tree = TreeArena::with_root(self.root_id.clone());
        let mut pending = PendingEdges::default();
        let mut created = Vec::new();

        // Pass 1: create every node
        for record in records {
            let id = record.id();
            let parent = record.parent().unwrap_or_else(|| self.root_id.clone());
            let idx = tree.insert_node(id.clone(), record)?;
            pending.push(parent, id, idx);
            created.push(idx);
        }
        debug!(records = created.len(), "created nodes");

        // Pass 2: wire edges
        for (parent, children) in pending.groups {
            for (child, child_idx) in children {
                if child == parent {
                    return Err(TreeError::SelfReference { id: child });
                }
                let parent_idx =
                    tree.index_of(&parent)
                        .ok_or_else(|| TreeError::DanglingParent {
                            id: child.clone(),
                            parent: parent.clone(),
                        })?;
                tree.attach(parent_idx, child_idx);
            }
        }

        Self::check_reachable(&tree, &created)?;
        debug!(nodes = tree.len(), height = tree.height(), "tree built");
        Ok(tree)
    }

    /// Every node must hang off the root. Nodes that do not are part of, or
    /// below, a parent cycle.
    #[instrument(level = "trace", skip_all)]
    fn check_reachable<D>(tree: &TreeArena<D>, created: &[Index]) -> TreeResult<()> {
        let reached: HashSet<Index> = tree.iter().map(|node| node.index()).collect();
        if reached.len() == created.len() + 1 {
            return Ok(());
        }

        let Some(&orphan) = created.iter().find(|idx| !reached.contains(*idx)) else {
            return Ok(());
        };

        // Walk up until a node repeats; that node sits on the cycle.
        let mut visited = HashSet::new();
        let mut current = orphan;
        loop {
            let Some(node) = tree.get_node(current) else {
                return Err(TreeError::CycleDetected(tree.root_id().clone()));
            };
            if !visited.insert(current) {
                return Err(TreeError::CycleDetected(node.key.clone()));
            }
            match node.parent {
                Some(parent) => current = parent,
                None => return Err(TreeError::CycleDetected(node.key.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Entry;

    #[test]
    fn given_two_node_cycle_when_building_then_reports_cycle() {
        let result = TreeBuilder::new().build(vec![
            Entry::new(1, None),
            Entry::child_of(2, 3),
            Entry::child_of(3, 2),
        ]);
        match result {
            Err(TreeError::CycleDetected(key)) => {
                assert!(key == NodeKey::from(2) || key == NodeKey::from(3))
            }
            other => panic!("expected cycle, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn given_subtree_below_cycle_when_building_then_reports_cycle_member() {
        // 4 hangs below the 2 <-> 3 loop but is not part of it
        let result = TreeBuilder::new().build(vec![
            Entry::child_of(4, 2),
            Entry::child_of(2, 3),
            Entry::child_of(3, 2),
        ]);
        match result {
            Err(TreeError::CycleDetected(key)) => assert_ne!(key, NodeKey::from(4)),
            other => panic!("expected cycle, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn given_parent_groups_when_wiring_then_keeps_input_order_per_parent() {
        let tree = TreeBuilder::new()
            .build(vec![
                Entry::child_of(10, 1),
                Entry::new(1, None),
                Entry::child_of(11, 1),
                Entry::new(2, None),
                Entry::child_of(12, 1),
            ])
            .unwrap();
        let one = tree.get_node_by_id(&NodeKey::from(1)).unwrap();
        let kids: Vec<String> = one.children().iter().map(|n| n.to_string()).collect();
        assert_eq!(kids, vec!["10", "11", "12"]);
    }
}
