//! Domain layer: tree storage, construction, and navigation
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod key;
pub mod node;
pub mod record;

pub use arena::{DepthIterator, PostOrderIterator, TreeArena, TreeIterator, TreeNode};
pub use builder::TreeBuilder;
pub use error::{TreeError, TreeResult};
pub use key::NodeKey;
pub use node::NodeRef;
pub use record::{Entry, Record};
