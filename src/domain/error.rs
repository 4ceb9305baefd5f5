//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::key::NodeKey;

/// Errors raised while building or querying a tree.
///
/// Every variant except `NotFound` aborts a build; `NotFound` is local to the
/// lookup that raised it and leaves the tree usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("record {id} declares itself as its own parent")]
    SelfReference { id: NodeKey },

    #[error("record {id} references missing parent {parent}")]
    DanglingParent { id: NodeKey, parent: NodeKey },

    #[error("node not found: {0}")]
    NotFound(NodeKey),

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeKey),

    #[error("cycle detected in hierarchy at node: {0}")]
    CycleDetected(NodeKey),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
