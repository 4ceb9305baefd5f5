//! Text rendering of built trees.
//!
//! Rendering only needs read access: node ids, depths, and pre-order.

use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{NodeRef, TreeArena};

/// Indented outline renderer.
///
/// Each node becomes one line: `indent * (depth - 1) + marker + label`, in
/// pre-order, so direct children of the root start at column zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    pub indent: String,
    pub marker: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            marker: "- ".to_string(),
        }
    }
}

impl Renderer {
    pub fn new(indent: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            marker: marker.into(),
        }
    }

    /// Renders every node labelled by its id.
    #[instrument(level = "debug", skip_all)]
    pub fn render<D>(&self, tree: &TreeArena<D>) -> String {
        self.render_with(tree, |node| node.id().to_string())
    }

    /// Renders every node with a caller supplied label.
    pub fn render_with<D, F>(&self, tree: &TreeArena<D>, label: F) -> String
    where
        F: Fn(NodeRef<'_, D>) -> String,
    {
        tree.iter_with_depth()
            .skip(1)
            .map(|(node, depth)| self.line(depth, &label(node)))
            .join("\n")
    }

    fn line(&self, depth: usize, label: &str) -> String {
        format!(
            "{}{}{}",
            self.indent.repeat(depth.saturating_sub(1)),
            self.marker,
            label
        )
    }
}

/*
Conversion into termtree for box-drawing output.
 */
pub trait TreeNodeConvert {
    /// Recurses once per tree level, so stack use grows with depth. Prefer
    /// [`Renderer`] for very deep trees.
    fn to_tree_string(&self) -> Tree<String>;
}

impl<D> TreeNodeConvert for NodeRef<'_, D> {
    fn to_tree_string(&self) -> Tree<String> {
        // Recursively construct the children
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|child| child.to_tree_string())
            .collect();

        Tree::new(self.id().to_string()).with_leaves(leaves)
    }
}

impl<D> TreeNodeConvert for TreeArena<D> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        self.root().to_tree_string()
    }
}
