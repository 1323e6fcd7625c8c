//! Soft removal of a parent's sub-items for diff-style refreshes
//!
//! Archived nodes leave the registry and the ordered index but keep their
//! view, so a node that comes back with the same id reattaches to the view it
//! had. Whatever is still archived when the archive is emptied is destroyed.

use std::collections::HashMap;

use log::{debug, trace};

use crate::controller::TreeController;
use crate::error::TreeError;
use crate::input::TreeEvent;
use crate::materialize::ListContainer;
use crate::node::{NodeData, NodeId};
use crate::view::{MountTarget, NodeView, Unmount, ViewLayer};

/// A node set aside by an archive pass
#[derive(Debug)]
pub struct ArchivedNode<D> {
    pub data: NodeData<D>,
    pub view: NodeView,
}

#[derive(Debug)]
pub struct ArchiveRegistry<D> {
    nodes: HashMap<NodeId, ArchivedNode<D>>,
    lists: HashMap<NodeId, ListContainer>,
}

impl<D> Default for ArchiveRegistry<D> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            lists: HashMap::new(),
        }
    }
}

impl<D> ArchiveRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.lists.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub(crate) fn insert_node(&mut self, data: NodeData<D>, mut view: NodeView) {
        view.archived = true;
        view.selected = false;
        self.nodes.insert(data.id, ArchivedNode { data, view });
    }

    pub(crate) fn insert_list(&mut self, list: ListContainer) {
        self.lists.insert(list.parent(), list);
    }

    /// Claim the view of an archived node; its old data is dropped
    pub(crate) fn take_view(&mut self, id: NodeId) -> Option<NodeView> {
        self.nodes.remove(&id).map(|archived| archived.view)
    }

    pub(crate) fn take_list(&mut self, parent: NodeId) -> Option<ListContainer> {
        self.lists.remove(&parent)
    }

    pub(crate) fn drain(&mut self) -> (Vec<ArchivedNode<D>>, Vec<ListContainer>) {
        let nodes = self.nodes.drain().map(|(_, node)| node).collect();
        let lists = self.lists.drain().map(|(_, list)| list).collect();
        (nodes, lists)
    }
}

impl<D, V: ViewLayer> TreeController<D, V> {
    pub fn is_archived(&self, id: NodeId) -> bool {
        self.archive.contains(id)
    }

    pub fn archived_count(&self) -> usize {
        self.archive.len()
    }

    /// Move every descendant of `parent` into the archive
    ///
    /// The nodes stop being part of the ordered index and selection but their
    /// views are only detached. Returns how many nodes were archived.
    pub fn archive_sub_items_of_item(&mut self, parent: NodeId) -> usize {
        let Some(span) = self.index.descendant_span(parent, &self.registry) else {
            return 0;
        };
        if span.is_empty() {
            return 0;
        }
        let archived = self.index.remove_span(span);

        let mut deselected = false;
        for &id in &archived {
            deselected |= self.unmark_selected(id);
        }

        for owner in std::iter::once(parent).chain(archived.iter().copied()) {
            if let Some(list) = self.lists.detach_list(owner, &mut self.view) {
                self.archive.insert_list(list);
            }
        }
        for &id in &archived {
            let Some((data, view)) = self.registry.remove(id) else {
                continue;
            };
            self.view.unmount(MountTarget::Node(view.instance), Unmount::Detach);
            self.drag.forget(MountTarget::Node(view.instance));
            self.drag.forget(MountTarget::List(id));
            self.archive.insert_node(data, view);
        }
        self.refresh_has_children(parent);
        debug!("archived {} sub-items of {parent}", archived.len());

        if deselected {
            self.selection_changed();
        }
        archived.len()
    }

    /// Destroy whatever is still archived
    ///
    /// Each destroyed node is reported as removed. Returns the number of
    /// nodes destroyed.
    pub fn empty_archive(&mut self) -> usize {
        let (nodes, lists) = self.archive.drain();
        for list in lists {
            self.view
                .unmount(MountTarget::List(list.parent()), Unmount::Destroy);
        }
        let count = nodes.len();
        for ArchivedNode { data, view } in nodes {
            trace!("destroying archived node {}", data.id);
            self.view.unmount(MountTarget::Node(view.instance), Unmount::Destroy);
            self.events.push(TreeEvent::NodeWasRemoved(data.id));
        }
        if count > 0 {
            debug!("emptied archive of {count} nodes");
        }
        count
    }

    /// Replace the sub-items of `parent` with `children`
    ///
    /// With `reload_all` the old sub-items are removed outright. Otherwise
    /// they are archived first, so nodes that come back keep their views,
    /// expansion and selection, and only the ones that did not return are
    /// destroyed. Returns the ids that were added.
    pub fn refresh_sub_items_of_item(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeData<D>>,
        reload_all: bool,
    ) -> Result<Vec<NodeId>, TreeError> {
        if !parent.is_root() && !self.registry.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        if reload_all {
            self.remove_child_nodes(parent);
            return Ok(self.add_nodes(children));
        }

        let reselect: Vec<NodeId> = self
            .selection
            .as_slice()
            .iter()
            .copied()
            .filter(|&id| self.registry.has_ancestor(id, parent) && id != parent)
            .collect();
        self.archive_sub_items_of_item(parent);
        let added = self.add_nodes(children);
        self.empty_archive();

        let mut reselected = false;
        for id in reselect {
            if self.is_visible(id) {
                reselected |= self.mark_selected(id);
            }
        }
        if reselected {
            self.selection_changed();
        }
        Ok(added)
    }
}
