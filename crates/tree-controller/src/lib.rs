//! Tree Controller Library
//!
//! A controller for ordered hierarchical lists: nodes arrive as flat records
//! pointing at their parent, and the controller keeps them as a mounted tree
//! of per-parent lists together with a flat, pre-order index used for
//! navigation and range selection.
//!
//! # Core Concepts
//!
//! - **NodeData**: A caller-supplied record (id, parent id, title, payload)
//! - **OrderedIndex**: Every active node in depth-first traversal order
//! - **ViewLayer**: The drawing side, told where to mount and what to decorate
//! - **Archive**: Soft removal so a refresh can reuse views of returning nodes
//!
//! # Example
//!
//! ```
//! use tree_controller::prelude::*;
//!
//! let mut tree = TreeController::new(TreeConfig::file_tree(), NullView);
//! let docs = tree.add_node(NodeData::container(1, 0, "docs", ())).unwrap();
//! tree.add_node(NodeData::leaf(2, 1, "README.md", ())).unwrap();
//!
//! tree.expand(docs);
//! tree.go_down();
//! assert_eq!(tree.selected_ids(), &[docs]);
//!
//! for id in tree.walk(TraversalOrder::PreOrder) {
//!     println!("{:indent$}{}", "", tree.title(id).unwrap_or(""), indent = tree.depth(id) * 2);
//! }
//! ```

pub mod archive;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod input;
pub mod materialize;
pub mod node;
pub mod ordered_index;
pub mod pointer;
pub mod registry;
pub mod selection;
pub mod traits;
pub mod view;
pub mod visibility;

pub use config::{OrphanPolicy, TreeConfig};
pub use controller::TreeController;
pub use error::TreeError;
pub use input::{InputEvent, Key, Modifiers, MouseButton, TreeEvent};
pub use node::{NodeData, NodeId, NodeKind};
pub use view::{MountTarget, NodeView, NullView, Placement, Unmount, ViewInstance, ViewLayer};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{OrphanPolicy, TreeConfig};
    pub use crate::controller::TreeController;
    pub use crate::error::TreeError;
    pub use crate::input::{InputEvent, Key, Modifiers, MouseButton, TreeEvent};
    pub use crate::node::{NodeData, NodeId, NodeKind};
    pub use crate::selection::Step;
    pub use crate::traits::{TraversalOrder, Tree, TreeTraversal};
    pub use crate::view::{
        MountTarget, NodeView, NullView, Placement, Unmount, ViewInstance, ViewLayer,
    };
}
