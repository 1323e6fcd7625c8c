//! Core node types for the tree controller

use derive_more::{Display, From};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a controller
///
/// Identifiers are supplied by the caller. `NodeId::ROOT` is reserved as the
/// parent of every top-level node and never names a stored node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display(fmt = "{}", _0)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    /// The root sentinel always has ID 0
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new NodeId from a u64
    pub const fn new(id: u64) -> Self {
        NodeId(id)
    }

    /// Get the inner u64 value
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true if this is the root sentinel
    pub const fn is_root(self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// The type/kind of a node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// A container node - can have children (e.g., directory, submenu)
    #[default]
    #[display(fmt = "Container")]
    Container,
    /// A leaf node - cannot have children of its own (e.g., file, menu entry)
    #[display(fmt = "Leaf")]
    Leaf,
}

impl NodeKind {
    /// Returns true if this is a container node
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Container)
    }

    /// Returns true if this is a leaf node
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf)
    }
}

/// The data record describing one node
///
/// Generic over the payload `D`, which carries arbitrary caller-defined
/// fields (file size, menu action, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeData<D> {
    /// The node's identifier
    pub id: NodeId,
    /// Identifier of the parent node, `NodeId::ROOT` for top-level nodes
    pub parent_id: NodeId,
    /// Display title
    pub title: String,
    /// Whether this is a container or leaf node
    pub kind: NodeKind,
    /// Depth below the root, filled in by the controller when depth tracking is on
    pub depth: Option<usize>,
    /// Caller-defined payload
    pub data: D,
}

impl<D> NodeData<D> {
    /// Create a new node record
    pub fn new(
        id: impl Into<NodeId>,
        parent_id: impl Into<NodeId>,
        title: impl Into<String>,
        kind: NodeKind,
        data: D,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            title: title.into(),
            kind,
            depth: None,
            data,
        }
    }

    /// Create a new container node
    pub fn container(
        id: impl Into<NodeId>,
        parent_id: impl Into<NodeId>,
        title: impl Into<String>,
        data: D,
    ) -> Self {
        Self::new(id, parent_id, title, NodeKind::Container, data)
    }

    /// Create a new leaf node
    pub fn leaf(
        id: impl Into<NodeId>,
        parent_id: impl Into<NodeId>,
        title: impl Into<String>,
        data: D,
    ) -> Self {
        Self::new(id, parent_id, title, NodeKind::Leaf, data)
    }

    /// Returns true if this is a container node
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Returns true if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

impl<D: Default> NodeData<D> {
    /// Create a container node with default payload and an id-derived title
    pub fn with_parent(id: impl Into<NodeId>, parent_id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self::container(id, parent_id, format!("node {id}"), D::default())
    }
}

impl<D> fmt::Display for NodeData<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) #{}", self.title, self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        assert_eq!(NodeId::ROOT, NodeId(0));
        assert!(NodeId::ROOT.is_root());
        assert_eq!(NodeId::new(5).get(), 5);
        assert_eq!(NodeId::from(10), NodeId(10));
        assert_eq!(u64::from(NodeId(7)), 7);
        assert_eq!(NodeId(42).to_string(), "42");
    }

    #[test]
    fn test_node_kind() {
        assert!(NodeKind::Container.is_container());
        assert!(!NodeKind::Container.is_leaf());
        assert!(NodeKind::Leaf.is_leaf());
        assert!(!NodeKind::Leaf.is_container());
        assert_eq!(NodeKind::default(), NodeKind::Container);
    }

    #[test]
    fn test_node_data() {
        let node = NodeData::container(3, 1, "src", 42);
        assert_eq!(node.id, NodeId(3));
        assert_eq!(node.parent_id, NodeId(1));
        assert!(node.is_container());
        assert_eq!(node.depth, None);
        assert_eq!(node.data, 42);
        assert_eq!(node.to_string(), "src (Container) #3");

        let leaf = NodeData::leaf(4, 3, "main.rs", "hello");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.data, "hello");
    }

    #[test]
    fn test_node_with_parent() {
        let node: NodeData<()> = NodeData::with_parent(9, 0);
        assert_eq!(node.title, "node 9");
        assert_eq!(node.parent_id, NodeId::ROOT);
    }
}
