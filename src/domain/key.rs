//! Node identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node, unique within one tree.
///
/// Records may be keyed by integers or by strings. The two variants never
/// compare equal to each other: `Int(1)` and `Str("1")` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Str(String),
}

impl Default for NodeKey {
    /// The conventional root sentinel `0`.
    fn default() -> Self {
        NodeKey::Int(0)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(i) => write!(f, "{}", i),
            NodeKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(id: i64) -> Self {
        NodeKey::Int(id)
    }
}

impl From<&str> for NodeKey {
    fn from(id: &str) -> Self {
        NodeKey::Str(id.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(id: String) -> Self {
        NodeKey::Str(id)
    }
}
