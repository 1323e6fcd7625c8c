use derive_more::Display;

use crate::node::NodeId;

/// Reasons a mutation was refused
///
/// A refused mutation leaves the controller untouched, so hosts that follow
/// the "invalid operation silently does nothing" contract can ignore these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TreeError {
    /// A node with this id is already part of the tree
    #[display(fmt = "node {} already exists", _0)]
    DuplicateId(NodeId),

    /// The parent does not exist and orphans are rejected
    #[display(fmt = "node {} references missing parent {}", node, parent)]
    OrphanRejected { node: NodeId, parent: NodeId },

    /// The referenced node is not part of the tree
    #[display(fmt = "node {} does not exist", _0)]
    UnknownNode(NodeId),
}

impl std::error::Error for TreeError {}
