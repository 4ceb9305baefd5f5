//! Flat input records

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::key::NodeKey;

/// A flat record that knows its own id and the id of its parent.
///
/// Anything implementing `Record` can be fed to the
/// [`TreeBuilder`](crate::domain::TreeBuilder); the record itself becomes the
/// payload of its node and is handed back unchanged by
/// [`NodeRef::data`](crate::domain::NodeRef::data).
pub trait Record {
    fn id(&self) -> NodeKey;

    /// `None` attaches the record directly below the root.
    fn parent(&self) -> Option<NodeKey>;
}

/// General purpose record with opaque string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: NodeKey,
    pub parent: Option<NodeKey>,
    /// Payload fields, passed through untouched
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    pub fn new(id: impl Into<NodeKey>, parent: Option<NodeKey>) -> Self {
        Self {
            id: id.into(),
            parent,
            fields: BTreeMap::new(),
        }
    }

    /// Record attached to `parent`.
    pub fn child_of(id: impl Into<NodeKey>, parent: impl Into<NodeKey>) -> Self {
        Self::new(id, Some(parent.into()))
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl Record for Entry {
    fn id(&self) -> NodeKey {
        self.id.clone()
    }

    fn parent(&self) -> Option<NodeKey> {
        self.parent.clone()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
