//! Build navigable in-memory trees from flat parent-referencing records.
//!
//! ```
//! use rstree::{Entry, NodeKey, TreeBuilder};
//!
//! let tree = TreeBuilder::new()
//!     .build(vec![
//!         Entry::new(1, None).with_field("name", "Microsoft"),
//!         Entry::child_of(5, 1).with_field("name", "Google"),
//!         Entry::new(3, None).with_field("name", "Adobe"),
//!     ])
//!     .unwrap();
//!
//! let google = tree.get_node_by_id(&NodeKey::from(5)).unwrap();
//! assert_eq!(google.depth(), 2);
//! assert_eq!(google.parent().unwrap().id(), &NodeKey::from(1));
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod render;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, TreeService};
pub use config::Settings;
pub use domain::{
    Entry, NodeKey, NodeRef, Record, TreeArena, TreeBuilder, TreeError, TreeResult,
};
pub use render::{Renderer, TreeNodeConvert};
