//! Id-keyed storage of node data and node views
//!
//! Parent/child adjacency is implicit: every node names its parent, and the
//! registry answers ancestry questions by walking those links.

use log::error;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::node::{NodeData, NodeId};
use crate::view::{NodeView, ViewInstance};

/// Parent chains are short in practice; keep them off the heap.
pub type AncestorChain = SmallVec<[NodeId; 8]>;

/// Node data and views of the active (non-archived) tree
#[derive(Debug)]
pub struct NodeRegistry<D> {
    nodes: HashMap<NodeId, NodeData<D>>,
    views: HashMap<NodeId, NodeView>,
    next_instance: u64,
    highest_id: u64,
}

impl<D> NodeRegistry<D> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            views: HashMap::new(),
            next_instance: 1,
            highest_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData<D>> {
        self.nodes.get(&id)
    }

    pub fn view(&self, id: NodeId) -> Option<&NodeView> {
        self.views.get(&id)
    }

    pub fn view_mut(&mut self, id: NodeId) -> Option<&mut NodeView> {
        self.views.get_mut(&id)
    }

    /// Parent id of a stored node
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).map(|n| n.parent_id)
    }

    /// Find the node owning a view instance
    pub fn id_of_instance(&self, instance: ViewInstance) -> Option<NodeId> {
        self.views
            .values()
            .find(|v| v.instance == instance)
            .map(|v| v.id)
    }

    /// Allocate a fresh view handle
    pub fn next_instance(&mut self) -> ViewInstance {
        let instance = ViewInstance(self.next_instance);
        self.next_instance += 1;
        instance
    }

    /// Generate an id that no stored node uses
    pub fn generate_id(&mut self) -> NodeId {
        let mut candidate = self.highest_id + 1;
        while self.nodes.contains_key(&NodeId(candidate)) {
            candidate += 1;
        }
        self.highest_id = candidate;
        NodeId(candidate)
    }

    pub fn insert(&mut self, data: NodeData<D>, view: NodeView) {
        self.highest_id = self.highest_id.max(data.id.get());
        self.views.insert(data.id, view);
        self.nodes.insert(data.id, data);
    }

    pub fn remove(&mut self, id: NodeId) -> Option<(NodeData<D>, NodeView)> {
        let data = self.nodes.remove(&id)?;
        let view = self.views.remove(&id)?;
        Some((data, view))
    }

    /// Visit the stored ancestors of `id`, nearest first, until `stop`
    /// returns true; reports whether it did. The root sentinel is not visited.
    ///
    /// The walk ends at the root sentinel. A parent that is not stored ends
    /// it early, which leaves the node a top-level orphan. A chain with more
    /// links than there are stored nodes must loop and is cut the same way.
    pub(crate) fn any_ancestor(&self, id: NodeId, mut stop: impl FnMut(NodeId) -> bool) -> bool {
        let mut current = self.parent_of(id);
        let mut steps = 0;
        while let Some(parent) = current {
            if parent.is_root() {
                return false;
            }
            if !self.contains(parent) {
                error!("node {id} has unresolvable ancestor {parent}");
                debug_assert!(false, "node {id} has unresolvable ancestor {parent}");
                return false;
            }
            if steps >= self.nodes.len() {
                error!("parent chain of node {id} loops");
                debug_assert!(false, "parent chain of node {id} loops");
                return false;
            }
            if stop(parent) {
                return true;
            }
            steps += 1;
            current = self.parent_of(parent);
        }
        false
    }

    /// Strict ancestors of `id`, nearest first, excluding the root sentinel
    pub fn ancestor_chain(&self, id: NodeId) -> AncestorChain {
        let mut chain = AncestorChain::new();
        self.any_ancestor(id, |parent| {
            chain.push(parent);
            false
        });
        chain
    }

    /// Whether `ancestor` lies on the parent chain of `id`
    ///
    /// Every stored node descends from the root sentinel.
    pub fn has_ancestor(&self, id: NodeId, ancestor: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        ancestor.is_root() || self.any_ancestor(id, |parent| parent == ancestor)
    }

    /// Depth below the root (top-level nodes = 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        self.any_ancestor(id, |_| {
            depth += 1;
            false
        });
        depth
    }
}
