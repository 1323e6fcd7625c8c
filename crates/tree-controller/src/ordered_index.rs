//! The flattened pre-order sequence of active nodes
//!
//! Every node's descendants occupy one contiguous block starting right after
//! the node itself. Spans are found by scanning forward from the parent while
//! entries still descend from it, so no retraversal of the tree is needed.
//!
//! Cost of an insert: locating the parent is a linear scan of the index and
//! the `Vec` insert shifts the tail, both O(n); the span scan adds
//! O(descendants of the parent) ancestry checks on top.

use std::ops::Range;

use crate::node::NodeId;
use crate::registry::NodeRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedIndex {
    entries: Vec<NodeId>,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<NodeId> {
        self.entries.get(position).copied()
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|&entry| entry == id)
    }

    /// Position of the first descendant of the node at `parent_position`
    pub fn first_sub_item<D>(
        &self,
        parent_position: usize,
        registry: &NodeRegistry<D>,
    ) -> Option<usize> {
        let parent = self.get(parent_position)?;
        let candidate = parent_position + 1;
        self.get(candidate)
            .filter(|&entry| registry.has_ancestor(entry, parent))
            .map(|_| candidate)
    }

    /// Position of the last descendant of the node at `parent_position`
    pub fn last_sub_item<D>(
        &self,
        parent_position: usize,
        registry: &NodeRegistry<D>,
    ) -> Option<usize> {
        let parent = self.get(parent_position)?;
        self.first_sub_item(parent_position, registry)?;
        let mut last = parent_position + 1;
        while let Some(entry) = self.get(last + 1) {
            if !registry.has_ancestor(entry, parent) {
                break;
            }
            last += 1;
        }
        Some(last)
    }

    /// Positions held by the descendants of `parent`, possibly empty
    ///
    /// For the root sentinel this is the whole index. Returns `None` when
    /// `parent` is neither the root nor indexed.
    pub fn descendant_span<D>(
        &self,
        parent: NodeId,
        registry: &NodeRegistry<D>,
    ) -> Option<Range<usize>> {
        if parent.is_root() {
            return Some(0..self.len());
        }
        let parent_position = self.position(parent)?;
        let start = parent_position + 1;
        let end = self
            .last_sub_item(parent_position, registry)
            .map_or(start, |last| last + 1);
        Some(start..end)
    }

    /// Direct children of `parent` in index order
    pub fn children_of<D>(&self, parent: NodeId, registry: &NodeRegistry<D>) -> Vec<NodeId> {
        let Some(span) = self.descendant_span(parent, registry) else {
            return Vec::new();
        };
        self.entries[span]
            .iter()
            .copied()
            .filter(|&entry| registry.parent_of(entry) == Some(parent))
            .collect()
    }

    /// Where a new child of `parent` goes
    ///
    /// With `sibling_index` the child is placed before the sibling currently
    /// at that local position; otherwise (or when the index is past the end)
    /// it goes right after the parent's last descendant, or right after the
    /// parent when it has none. Returns `None` if `parent` is not indexed.
    pub fn insertion_point<D>(
        &self,
        parent: NodeId,
        sibling_index: Option<usize>,
        registry: &NodeRegistry<D>,
    ) -> Option<usize> {
        if let Some(local) = sibling_index {
            let siblings = self.children_of(parent, registry);
            if let Some(&sibling) = siblings.get(local) {
                return self.position(sibling);
            }
        }
        self.descendant_span(parent, registry).map(|span| span.end)
    }

    pub fn insert(&mut self, position: usize, id: NodeId) {
        let position = position.min(self.entries.len());
        self.entries.insert(position, id);
    }

    /// Remove a single entry, returning the position it held
    pub fn remove(&mut self, id: NodeId) -> Option<usize> {
        let position = self.position(id)?;
        self.entries.remove(position);
        Some(position)
    }

    /// Remove a contiguous block of entries
    pub fn remove_span(&mut self, span: Range<usize>) -> Vec<NodeId> {
        let end = span.end.min(self.entries.len());
        let start = span.start.min(end);
        self.entries.drain(start..end).collect()
    }
}
