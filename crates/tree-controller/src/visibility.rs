//! Expand/collapse state and the visibility derived from it
//!
//! A node is visible when every strict ancestor is expanded. Visibility is
//! computed on demand from the parent chain rather than cached, so toggling
//! an ancestor needs no invalidation pass.

use log::debug;

use crate::controller::TreeController;
use crate::input::TreeEvent;
use crate::node::NodeId;
use crate::view::ViewLayer;

impl<D, V: ViewLayer> TreeController<D, V> {
    /// Whether `id` can be reached by navigation
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.registry.contains(id)
            && !self
                .registry
                .any_ancestor(id, |ancestor| !self.is_expanded(ancestor))
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.registry
            .view(id)
            .map(|view| view.expanded)
            .unwrap_or(false)
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        let Some(view) = self.registry.view_mut(id) else {
            return false;
        };
        if view.expanded == expanded {
            return false;
        }
        view.expanded = expanded;
        debug!("{} node {id}", if expanded { "expanded" } else { "collapsed" });
        self.lists.set_expanded(id, expanded, &mut self.view);
        self.events.push(TreeEvent::ExpansionChanged { id, expanded });
        true
    }

    /// Show the children of `id`
    pub fn expand(&mut self, id: NodeId) -> bool {
        self.set_expanded(id, true)
    }

    /// Hide the children of `id` without destroying them
    ///
    /// Selected descendants become hidden and are deselected; if that leaves
    /// nothing selected, `id` itself is selected.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        if !self.set_expanded(id, false) {
            return false;
        }
        let hidden: Vec<NodeId> = self
            .selection
            .as_slice()
            .iter()
            .copied()
            .filter(|&selected| self.registry.has_ancestor(selected, id))
            .collect();
        if hidden.is_empty() {
            return true;
        }
        for selected in hidden {
            self.unmark_selected(selected);
        }
        if self.selection.is_empty() && self.is_visible(id) {
            self.mark_selected(id);
        }
        self.selection_changed();
        true
    }

    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expand every strict ancestor of `id` so it becomes visible
    pub fn reveal(&mut self, id: NodeId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        let chain = self.registry.ancestor_chain(id);
        let mut changed = false;
        for &ancestor in chain.iter().rev() {
            changed |= self.expand(ancestor);
        }
        changed
    }

    pub fn expand_all(&mut self) {
        let ids = self.index.as_slice().to_vec();
        for id in ids {
            self.expand(id);
        }
    }

    pub fn collapse_all(&mut self) {
        // Reverse pre-order: descendants before their ancestors
        let ids = self.index.as_slice().to_vec();
        for id in ids.into_iter().rev() {
            self.collapse(id);
        }
    }
}
