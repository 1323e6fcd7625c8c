//! Selection of node views: single, additive and range selection plus
//! keyboard stepping over the ordered index

use log::debug;

use crate::controller::TreeController;
use crate::input::{Modifiers, TreeEvent};
use crate::node::NodeId;
use crate::ordered_index::OrderedIndex;
use crate::view::ViewLayer;

/// Currently selected nodes, in the order they were selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: Vec<NodeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Anchor for range selection
    pub fn first(&self) -> Option<NodeId> {
        self.selected.first().copied()
    }

    /// Origin for keyboard stepping
    pub fn last(&self) -> Option<NodeId> {
        self.selected.last().copied()
    }

    fn push(&mut self, id: NodeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    fn remove(&mut self, id: NodeId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&entry| entry != id);
        before != self.selected.len()
    }

    fn take(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.selected)
    }
}

/// Direction of a keyboard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// The nearest position from `from` in `direction` whose node passes
/// `visible`, or `None` at the bounds
pub fn step_visible<F>(index: &OrderedIndex, from: usize, direction: Step, visible: F) -> Option<usize>
where
    F: Fn(NodeId) -> bool,
{
    let mut position = from;
    loop {
        position = match direction {
            Step::Up => position.checked_sub(1)?,
            Step::Down => position + 1,
        };
        if visible(index.get(position)?) {
            return Some(position);
        }
    }
}

/// The order-normalised slice of the index between two nodes, inclusive
pub fn range_between(index: &OrderedIndex, a: NodeId, b: NodeId) -> Vec<NodeId> {
    let (Some(pa), Some(pb)) = (index.position(a), index.position(b)) else {
        return Vec::new();
    };
    let (start, end) = if pa <= pb { (pa, pb) } else { (pb, pa) };
    index.as_slice()[start..=end].to_vec()
}

impl<D, V: ViewLayer> TreeController<D, V> {
    pub(crate) fn mark_selected(&mut self, id: NodeId) -> bool {
        if !self.selection.push(id) {
            return false;
        }
        if let Some(view) = self.registry.view_mut(id) {
            view.selected = true;
            let instance = view.instance;
            self.view.set_selected_visual(instance, true);
        }
        true
    }

    pub(crate) fn unmark_selected(&mut self, id: NodeId) -> bool {
        if !self.selection.remove(id) {
            return false;
        }
        if let Some(view) = self.registry.view_mut(id) {
            view.selected = false;
            let instance = view.instance;
            self.view.set_selected_visual(instance, false);
        }
        true
    }

    fn clear_selection_marks(&mut self) -> bool {
        let former = self.selection.take();
        for &id in &former {
            if let Some(view) = self.registry.view_mut(id) {
                view.selected = false;
                let instance = view.instance;
                self.view.set_selected_visual(instance, false);
            }
        }
        !former.is_empty()
    }

    pub(crate) fn selection_changed(&mut self) {
        let selected = self.selection.as_slice().to_vec();
        debug!("selection changed: {selected:?}");
        self.events.push(TreeEvent::SelectionChanged(selected));
    }

    /// Whether `id` may join the selection
    fn selectable(&self, id: NodeId) -> bool {
        self.registry.contains(id) && self.is_visible(id)
    }

    /// Select `id` alone
    ///
    /// Unknown and hidden nodes are ignored. Returns whether the selection
    /// changed.
    pub fn select_node(&mut self, id: NodeId) -> bool {
        if !self.selectable(id) {
            debug!("ignoring selection of unavailable node {id}");
            return false;
        }
        if self.selection.as_slice() == [id] {
            return false;
        }
        self.clear_selection_marks();
        self.mark_selected(id);
        self.selection_changed();
        true
    }

    /// Add `id` to the selection, or drop it if it is already selected
    ///
    /// Behaves like [`select_node`](Self::select_node) when multiple
    /// selection is disabled.
    pub fn toggle_node_selection(&mut self, id: NodeId) -> bool {
        if !self.config.is_multiple_selection() {
            return self.select_node(id);
        }
        if self.selection.contains(id) {
            return self.deselect_node(id);
        }
        if !self.selectable(id) {
            return false;
        }
        self.mark_selected(id);
        self.selection_changed();
        true
    }

    pub fn deselect_node(&mut self, id: NodeId) -> bool {
        if !self.unmark_selected(id) {
            return false;
        }
        self.selection_changed();
        true
    }

    pub fn deselect_all_nodes(&mut self) -> bool {
        if !self.clear_selection_marks() {
            return false;
        }
        self.selection_changed();
        true
    }

    /// Replace the selection with the index slice between `a` and `b`
    ///
    /// The slice is taken in traversal order regardless of argument order and
    /// may cover structurally unrelated nodes; hidden nodes in it are
    /// skipped.
    pub fn select_nodes_by_range(&mut self, a: NodeId, b: NodeId) -> bool {
        let range: Vec<NodeId> = range_between(&self.index, a, b)
            .into_iter()
            .filter(|&id| self.is_visible(id))
            .collect();
        if range.is_empty() || self.selection.as_slice() == range.as_slice() {
            return false;
        }
        self.clear_selection_marks();
        for id in range {
            self.mark_selected(id);
        }
        self.selection_changed();
        true
    }

    pub fn select_first_node(&mut self) -> bool {
        match self.index.get(0) {
            Some(first) => self.select_node(first),
            None => false,
        }
    }

    /// Translate a click into a selection change
    ///
    /// Shift extends from the first selected node, the command modifier
    /// toggles, a plain click selects the node alone.
    pub fn click_node(&mut self, id: NodeId, modifiers: Modifiers) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        let multiple = self.config.is_multiple_selection();
        if multiple && modifiers.shift {
            return match self.selection.first() {
                Some(anchor) => self.select_nodes_by_range(anchor, id),
                None => self.select_node(id),
            };
        }
        if multiple && modifiers.command {
            return self.toggle_node_selection(id);
        }
        self.select_node(id)
    }

    /// Move the selection one visible position up or down
    ///
    /// With nothing selected the first node is selected. At either end of
    /// the index this does nothing.
    pub fn step_selection(&mut self, direction: Step) -> bool {
        let Some(current) = self.selection.last() else {
            return self.select_first_node();
        };
        let Some(from) = self.index.position(current) else {
            return false;
        };
        let target = step_visible(&self.index, from, direction, |id| self.is_visible(id))
            .and_then(|position| self.index.get(position));
        match target {
            Some(id) => self.select_node(id),
            None => false,
        }
    }

    pub fn go_down(&mut self) -> bool {
        self.step_selection(Step::Down)
    }

    pub fn go_up(&mut self) -> bool {
        self.step_selection(Step::Up)
    }

    /// Select the parent of the current node, leaving expansion untouched
    pub fn select_parent(&mut self) -> bool {
        let parent = self
            .selection
            .last()
            .and_then(|id| self.registry.parent_of(id))
            .filter(|parent| !parent.is_root());
        match parent {
            Some(parent) => self.select_node(parent),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(ids: &[u64]) -> OrderedIndex {
        let mut index = OrderedIndex::new();
        for &id in ids {
            index.insert(index.len(), NodeId(id));
        }
        index
    }

    #[test]
    fn test_step_skips_hidden() {
        let index = index_of(&[1, 2, 3, 4]);
        let visible = |id: NodeId| id != NodeId(2) && id != NodeId(3);
        assert_eq!(step_visible(&index, 0, Step::Down, visible), Some(3));
        assert_eq!(step_visible(&index, 3, Step::Up, visible), Some(0));
        assert_eq!(step_visible(&index, 3, Step::Down, visible), None);
        assert_eq!(step_visible(&index, 0, Step::Up, visible), None);
        assert_eq!(step_visible(&index, 0, Step::Down, |_| false), None);
    }

    #[test]
    fn test_step_over_long_hidden_run() {
        let mut index = OrderedIndex::new();
        for id in 1..=200_002 {
            index.insert(index.len(), NodeId(id));
        }
        let visible = |id: NodeId| id == NodeId(1) || id == NodeId(200_002);
        assert_eq!(step_visible(&index, 0, Step::Down, visible), Some(200_001));
        assert_eq!(step_visible(&index, 200_001, Step::Up, visible), Some(0));
    }

    #[test]
    fn test_range_is_order_normalised() {
        let index = index_of(&[1, 2, 3, 4]);
        let forward = range_between(&index, NodeId(2), NodeId(4));
        let backward = range_between(&index, NodeId(4), NodeId(2));
        assert_eq!(forward, vec![NodeId(2), NodeId(3), NodeId(4)]);
        assert_eq!(forward, backward);
        assert_eq!(range_between(&index, NodeId(3), NodeId(3)), vec![NodeId(3)]);
        assert!(range_between(&index, NodeId(3), NodeId(9)).is_empty());
    }

    #[test]
    fn test_selection_set_order() {
        let mut set = SelectionSet::new();
        assert!(set.push(NodeId(3)));
        assert!(set.push(NodeId(1)));
        assert!(!set.push(NodeId(3)));
        assert_eq!(set.first(), Some(NodeId(3)));
        assert_eq!(set.last(), Some(NodeId(1)));
        assert!(set.remove(NodeId(3)));
        assert_eq!(set.as_slice(), &[NodeId(1)]);
        assert_eq!(set.take(), vec![NodeId(1)]);
        assert!(set.is_empty());
    }
}
