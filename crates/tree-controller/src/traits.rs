//! Read-only tree navigation shared by the controller and its tests

use crate::node::{NodeData, NodeId, NodeKind};

/// A hierarchical structure addressed by [`NodeId`]
///
/// The root sentinel is the implicit parent of every top-level node and
/// carries no data of its own.
pub trait Tree {
    /// Caller-defined payload stored at each node
    type Payload;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Node data, `None` for the root sentinel and unknown ids
    fn get(&self, id: NodeId) -> Option<&NodeData<Self::Payload>>;

    /// Parent of a node, `None` for the root and unknown ids
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Children of a node in display order
    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Number of nodes, excluding the root sentinel
    fn node_count(&self) -> usize;

    fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).map_or(false, |n| n.kind == NodeKind::Leaf)
    }

    fn is_container(&self, id: NodeId) -> bool {
        self.get(id).map_or(false, |n| n.kind == NodeKind::Container)
    }

    fn title(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.title.as_str())
    }

    /// Levels below the root (top-level nodes = 0)
    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current.filter(|p| !p.is_root()) {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Whether `ancestor` is a strict ancestor of `descendant`
    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }
}

/// Traversal order for walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Parents before their children
    PreOrder,
    /// Children before their parents
    PostOrder,
}

/// Walks over any [`Tree`]
pub trait TreeTraversal: Tree {
    /// Every node below the root; the sentinel itself is not yielded
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::below(self, self.root(), order)
    }

    /// A subtree, including its starting node
    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, start, order)
    }
}

impl<T: Tree> TreeTraversal for T {}

/// Depth-first iterator with an explicit stack, so depth costs heap not
/// call frames
///
/// Each stack entry remembers whether its children have been pushed yet;
/// post-order yields a node on its second visit.
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    pub fn new(tree: &'a T, start: NodeId, order: TraversalOrder) -> Self {
        Self {
            tree,
            order,
            stack: vec![(start, false)],
        }
    }

    /// Walker over the descendants of `start`, excluding `start`
    pub fn below(tree: &'a T, start: NodeId, order: TraversalOrder) -> Self {
        let mut walker = Self {
            tree,
            order,
            stack: Vec::new(),
        };
        walker.push_children(start);
        walker
    }

    fn push_children(&mut self, id: NodeId) {
        let tree = self.tree;
        let first = self.stack.len();
        self.stack.extend(tree.children(id).map(|child| (child, false)));
        self.stack[first..].reverse();
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            match self.order {
                TraversalOrder::PreOrder => {
                    self.push_children(id);
                    return Some(id);
                }
                TraversalOrder::PostOrder if expanded => return Some(id),
                TraversalOrder::PostOrder => {
                    self.stack.push((id, true));
                    self.push_children(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Adjacency lists keyed by parent
    #[derive(Default)]
    struct Outline {
        nodes: HashMap<NodeId, NodeData<()>>,
        children: HashMap<NodeId, Vec<NodeId>>,
    }

    impl Outline {
        fn with(links: &[(u64, u64, NodeKind)]) -> Self {
            let mut outline = Self::default();
            for &(id, parent, kind) in links {
                let node = NodeData::new(id, parent, format!("n{id}"), kind, ());
                outline.children.entry(node.parent_id).or_default().push(node.id);
                outline.nodes.insert(node.id, node);
            }
            outline
        }
    }

    impl Tree for Outline {
        type Payload = ();

        fn get(&self, id: NodeId) -> Option<&NodeData<()>> {
            self.nodes.get(&id)
        }

        fn parent(&self, id: NodeId) -> Option<NodeId> {
            self.nodes.get(&id).map(|n| n.parent_id)
        }

        fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
            Box::new(self.children.get(&id).into_iter().flatten().copied())
        }

        fn node_count(&self) -> usize {
            self.nodes.len()
        }
    }

    fn sample() -> Outline {
        Outline::with(&[
            (1, 0, NodeKind::Container),
            (2, 1, NodeKind::Container),
            (3, 1, NodeKind::Leaf),
            (4, 2, NodeKind::Leaf),
            (5, 0, NodeKind::Leaf),
        ])
    }

    #[test]
    fn test_node_queries() {
        let tree = sample();
        assert_eq!(tree.node_count(), 5);
        assert!(tree.is_leaf(NodeId(3)));
        assert!(tree.is_container(NodeId(2)));
        assert!(!tree.is_leaf(NodeId(99)));
        assert_eq!(tree.title(NodeId(4)), Some("n4"));
        assert_eq!(tree.depth(NodeId(1)), 0);
        assert_eq!(tree.depth(NodeId(4)), 2);
        assert!(tree.is_ancestor_of(NodeId(1), NodeId(4)));
        assert!(!tree.is_ancestor_of(NodeId(4), NodeId(1)));
        assert!(!tree.is_ancestor_of(NodeId(3), NodeId(4)));
    }

    #[test]
    fn test_walk_orders() {
        let tree = sample();
        let pre: Vec<_> = tree.walk(TraversalOrder::PreOrder).map(NodeId::get).collect();
        assert_eq!(pre, vec![1, 2, 4, 3, 5]);

        let post: Vec<_> = tree
            .walk_from(NodeId(1), TraversalOrder::PostOrder)
            .map(NodeId::get)
            .collect();
        assert_eq!(post, vec![4, 2, 3, 1]);

        let all_post: Vec<_> = tree.walk(TraversalOrder::PostOrder).map(NodeId::get).collect();
        assert_eq!(all_post, vec![4, 2, 3, 1, 5]);
    }

    #[test]
    fn test_walk_deep_chain() {
        let links: Vec<_> = (1..=5_000u64).map(|id| (id, id - 1, NodeKind::Container)).collect();
        let tree = Outline::with(&links);
        assert_eq!(tree.walk(TraversalOrder::PostOrder).next(), Some(NodeId(5_000)));
        assert_eq!(tree.walk(TraversalOrder::PreOrder).count(), 5_000);
        assert_eq!(tree.depth(NodeId(5_000)), 4_999);
    }
}
