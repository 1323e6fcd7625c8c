//! The tree controller: node CRUD, input dispatch and the derived flat order
//!
//! The controller owns one node registry, one ordered index and one selection
//! per instance. Selection, visibility, archiving and drag feedback are
//! implemented in their own modules as further `impl` blocks on
//! [`TreeController`].

use std::time::Instant;

use log::{debug, trace, warn};

use crate::archive::ArchiveRegistry;
use crate::config::{OrphanPolicy, TreeConfig};
use crate::drag::DragFeedback;
use crate::error::TreeError;
use crate::input::{InputEvent, Key, Modifiers, MouseButton, TreeEvent};
use crate::materialize::ListMaterializer;
use crate::node::{NodeData, NodeId};
use crate::ordered_index::OrderedIndex;
use crate::pointer::PointerTracker;
use crate::registry::NodeRegistry;
use crate::selection::{step_visible, SelectionSet, Step};
use crate::traits::{TraversalOrder, Tree, TreeTraversal};
use crate::view::{MountTarget, NodeView, Unmount, ViewInstance, ViewLayer};

/// Controller for an ordered hierarchical list
///
/// # Example
///
/// ```
/// use tree_controller::prelude::*;
///
/// let mut tree: TreeController<(), NullView> = TreeController::new(TreeConfig::default(), NullView);
/// tree.add_node(NodeData::with_parent(1, 0)).unwrap();
/// tree.add_node(NodeData::with_parent(2, 1)).unwrap();
/// tree.add_node(NodeData::with_parent(3, 1)).unwrap();
/// tree.add_node(NodeData::with_parent(4, 2)).unwrap();
///
/// let order: Vec<u64> = tree.ordered_ids().iter().map(|id| id.get()).collect();
/// assert_eq!(order, vec![1, 2, 4, 3]);
/// ```
pub struct TreeController<D, V> {
    pub(crate) config: TreeConfig,
    pub(crate) registry: NodeRegistry<D>,
    pub(crate) index: OrderedIndex,
    pub(crate) lists: ListMaterializer,
    pub(crate) selection: SelectionSet,
    pub(crate) archive: ArchiveRegistry<D>,
    pub(crate) pointer: PointerTracker,
    pub(crate) drag: DragFeedback,
    pub(crate) view: V,
    pub(crate) events: Vec<TreeEvent>,
}

impl<D, V: ViewLayer> TreeController<D, V> {
    pub fn new(config: TreeConfig, view: V) -> Self {
        Self {
            registry: NodeRegistry::new(),
            index: OrderedIndex::new(),
            lists: ListMaterializer::new(),
            selection: SelectionSet::new(),
            archive: ArchiveRegistry::new(),
            pointer: PointerTracker::new(config.get_hold_delay()),
            drag: DragFeedback::new(config.get_drag_throttle()),
            config,
            view,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData<D>> {
        self.registry.get(id)
    }

    pub fn node_view(&self, id: NodeId) -> Option<&NodeView> {
        self.registry.view(id)
    }

    /// Resolve a view handle back to its node
    pub fn node_of_view(&self, instance: ViewInstance) -> Option<NodeId> {
        self.registry.id_of_instance(instance)
    }

    /// Active nodes in traversal order
    pub fn ordered_ids(&self) -> &[NodeId] {
        self.index.as_slice()
    }

    pub fn selected_ids(&self) -> &[NodeId] {
        self.selection.as_slice()
    }

    /// Mounted children of `id` in display order
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.lists.children(id)
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.lists.has_list(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Take the notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<TreeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add a node to the tree
    ///
    /// A missing id (`0`) is replaced by a generated one, and a parent that is
    /// not part of the tree is handled per the orphan policy. The node is
    /// placed after the last existing descendant of its parent.
    pub fn add_node(&mut self, data: NodeData<D>) -> Result<NodeId, TreeError> {
        self.insert_node(data, None)
    }

    /// Add a node before the sibling currently at `sibling_index`
    pub fn add_node_at(&mut self, data: NodeData<D>, sibling_index: usize) -> Result<NodeId, TreeError> {
        self.insert_node(data, Some(sibling_index))
    }

    /// Add nodes in order, returning the ids that were accepted
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = NodeData<D>>) -> Vec<NodeId> {
        nodes
            .into_iter()
            .filter_map(|data| self.add_node(data).ok())
            .collect()
    }

    fn repair(&mut self, mut data: NodeData<D>) -> Result<NodeData<D>, TreeError> {
        if data.id.is_root() {
            data.id = self.registry.generate_id();
            warn!("node without id received generated id {}", data.id);
        }
        if self.registry.contains(data.id) {
            debug!("ignoring duplicate node {}", data.id);
            return Err(TreeError::DuplicateId(data.id));
        }
        let parent = data.parent_id;
        if !parent.is_root() && !self.registry.contains(parent) {
            match self.config.get_orphan_policy() {
                OrphanPolicy::AttachToRoot => {
                    warn!("node {} has missing parent {parent}, attaching to root", data.id);
                    data.parent_id = NodeId::ROOT;
                }
                OrphanPolicy::Reject => {
                    debug!("rejecting orphan node {}", data.id);
                    return Err(TreeError::OrphanRejected {
                        node: data.id,
                        parent,
                    });
                }
            }
        }
        if self.config.is_tracking_depth() {
            data.depth = Some(match self.registry.get(data.parent_id) {
                Some(parent) => parent
                    .depth
                    .unwrap_or_else(|| self.registry.depth(parent.id))
                    + 1,
                None => 0,
            });
        }
        Ok(data)
    }

    fn insert_node(
        &mut self,
        data: NodeData<D>,
        sibling_index: Option<usize>,
    ) -> Result<NodeId, TreeError> {
        let data = self.repair(data)?;
        let id = data.id;
        let parent = data.parent_id;
        let position = self
            .index
            .insertion_point(parent, sibling_index, &self.registry)
            .unwrap_or(self.index.len());

        let view = match self.archive.take_view(id) {
            Some(mut view) => {
                trace!("reusing archived view {} for node {id}", view.instance);
                view.archived = false;
                view.selected = false;
                self.view.update(&view, &data.title);
                view
            }
            None => {
                let instance = self.registry.next_instance();
                let view = NodeView::new(id, instance, self.config.is_start_expanded());
                self.view.create(&view, &data.title);
                view
            }
        };
        let instance = view.instance;
        self.registry.insert(data, view);
        self.index.insert(position, id);
        trace!("added node {id} under {parent} at position {position}");

        let parent_view = self.registry.view(parent).map(|view| view.instance);
        let parent_expanded = parent.is_root() || self.is_expanded(parent);
        let reuse = self.archive.take_list(parent);
        self.lists
            .ensure_list(parent, parent_view, parent_expanded, reuse, &mut self.view);
        let siblings = self.index.children_of(parent, &self.registry);
        let registry = &self.registry;
        self.lists.mount_child(
            parent,
            id,
            instance,
            siblings,
            |sibling| registry.view(sibling).map(|view| view.instance),
            &mut self.view,
        );
        self.refresh_has_children(parent);
        // A reused view may still advertise children it no longer has
        self.refresh_has_children(id);

        self.events.push(TreeEvent::NodeWasAdded(id));
        Ok(id)
    }

    /// Sync a parent's "has children" decoration with its list
    pub(crate) fn refresh_has_children(&mut self, parent: NodeId) {
        let has_children = self.lists.has_list(parent);
        if let Some(view) = self.registry.view_mut(parent) {
            if view.has_children != has_children {
                view.has_children = has_children;
                let instance = view.instance;
                self.view.set_has_children_visual(instance, has_children);
            }
        }
    }

    /// Remove a node and all of its descendants
    ///
    /// Descendants go first, leaves before parents. Returns false if `id` is
    /// not part of the tree.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.registry.parent_of(id) else {
            return false;
        };
        let doomed: Vec<NodeId> = self.walk_from(id, TraversalOrder::PostOrder).collect();
        let mut deselected = false;
        for target in doomed {
            deselected |= self.destroy_node(target);
        }
        self.refresh_has_children(parent);
        if deselected {
            self.selection_changed();
        }
        true
    }

    /// Tear down one node whose children are already gone; returns whether
    /// it was selected
    fn destroy_node(&mut self, id: NodeId) -> bool {
        let deselected = self.unmark_selected(id);
        let (Some(parent), Some(instance)) = (
            self.registry.parent_of(id),
            self.registry.view(id).map(|view| view.instance),
        ) else {
            return deselected;
        };
        self.index.remove(id);
        self.lists.destroy_list(id, &mut self.view);
        self.lists
            .unmount_child(parent, id, instance, Unmount::Destroy, &mut self.view);
        self.drag.forget(MountTarget::Node(instance));
        self.drag.forget(MountTarget::List(id));
        self.registry.remove(id);
        trace!("removed node {id}");
        self.events.push(TreeEvent::NodeWasRemoved(id));
        deselected
    }

    /// Remove every descendant of `id`, keeping `id` itself
    pub fn remove_child_nodes(&mut self, id: NodeId) -> usize {
        let children = self.lists.children(id).to_vec();
        let before = self.index.len();
        for child in children {
            self.remove_node(child);
        }
        before - self.index.len()
    }

    /// Remove every active node
    pub fn remove_all_nodes(&mut self) -> usize {
        self.remove_child_nodes(NodeId::ROOT)
    }

    /// Feed one input event through the controller
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click { id, modifiers } => {
                self.click_node(id, modifiers);
            }
            InputEvent::DoubleClick(id) => {
                self.toggle(id);
            }
            InputEvent::MouseDown { id, button, at } => {
                self.tick(at);
                if button == MouseButton::Primary && self.registry.contains(id) {
                    self.pointer.mouse_down(id, at);
                }
            }
            InputEvent::MouseUp { at } => {
                self.tick(at);
                self.pointer.mouse_up();
            }
            InputEvent::MouseEnter { id, at } => {
                self.tick(at);
                let multiple = self.config.is_multiple_selection();
                if let Some((anchor, target)) = self.pointer.mouse_enter(id, multiple) {
                    self.select_nodes_by_range(anchor, target);
                }
            }
            InputEvent::MouseMove { at, .. } | InputEvent::DragOver { at, .. } => {
                self.tick(at);
            }
            InputEvent::KeyDown { key, modifiers } => {
                self.key_down(key, modifiers);
            }
            InputEvent::DragStart { id, at } => {
                self.tick(at);
                self.drag_start(id);
            }
            InputEvent::DragEnter { id, at } => self.drag_enter(id, at),
            InputEvent::DragLeave { id, at } => self.drag_leave(id, at),
            InputEvent::DragEnd | InputEvent::Drop { .. } => self.drag_end(),
        }
    }

    /// Run deferred work that is due at `now`
    ///
    /// Hosts call this from their scheduling tick; input handlers call it
    /// too, so late timers are flushed before new input is interpreted.
    pub fn tick(&mut self, now: Instant) {
        if let Some(anchor) = self.pointer.tick(now) {
            // The pressed node may have vanished since the timer was armed
            if !self.selection.contains(anchor) {
                self.select_node(anchor);
            }
        }
        if let Some(hover) = self.drag.tick(now) {
            self.apply_drag_hover(hover);
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pointer.next_deadline(), self.drag.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handle a key press; returns whether the tree changed
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if !self.config.is_keyboard_navigation() {
            return false;
        }
        let current = self.selection.last();
        let handled = match key {
            Key::Up | Key::Down => {
                let direction = if key == Key::Up { Step::Up } else { Step::Down };
                if modifiers.shift && self.config.is_multiple_selection() {
                    self.extend_selection(direction)
                } else {
                    self.step_selection(direction)
                }
            }
            Key::Right => current.map_or(false, |id| self.expand(id)),
            Key::Left => self.select_parent(),
            Key::Enter => current.map_or(false, |id| self.toggle(id)),
            Key::Escape => self.deselect_all_nodes(),
            Key::Char(_) => false,
        };
        self.events.push(TreeEvent::KeyEventPerformedOnTreeView(key));
        handled
    }

    /// Grow the selection from its anchor to the next visible node
    fn extend_selection(&mut self, direction: Step) -> bool {
        let (Some(anchor), Some(current)) = (self.selection.first(), self.selection.last()) else {
            return self.select_first_node();
        };
        let target = self
            .index
            .position(current)
            .and_then(|from| step_visible(&self.index, from, direction, |id| self.is_visible(id)))
            .and_then(|position| self.index.get(position));
        match target {
            Some(target) => self.select_nodes_by_range(anchor, target),
            None => false,
        }
    }

    /// Indented rendering of the ordered index
    ///
    /// `-` marks an expanded parent, `+` a collapsed one and `*` a selected
    /// node.
    pub fn dump_structure(&self) -> String {
        let mut out = String::new();
        for &id in self.index.as_slice() {
            let Some(node) = self.registry.get(id) else {
                continue;
            };
            let depth = self.registry.depth(id);
            let marker = match self.registry.view(id) {
                Some(view) if view.has_children && view.expanded => "- ",
                Some(view) if view.has_children => "+ ",
                _ => "  ",
            };
            let selected = if self.selection.contains(id) { " *" } else { "" };
            out.push_str(&format!(
                "{:indent$}{marker}{}{selected}\n",
                "",
                node.title,
                indent = depth * 2
            ));
        }
        out
    }

    /// Check the derived structures against each other
    ///
    /// The ordered index must equal a pre-order walk of the mounted lists,
    /// hold no archived id, and every selected node must be visible.
    pub fn is_consistent(&self) -> bool {
        let walked: Vec<NodeId> = self.walk(TraversalOrder::PreOrder).collect();
        if walked.as_slice() != self.index.as_slice() {
            warn!("ordered index {:?} differs from walk {walked:?}", self.index.as_slice());
            return false;
        }
        if self.index.len() != self.registry.len() {
            warn!("ordered index and registry sizes differ");
            return false;
        }
        if let Some(&id) = self.index.as_slice().iter().find(|&&id| self.archive.contains(id)) {
            warn!("archived node {id} is still indexed");
            return false;
        }
        if let Some(&id) = self
            .selection
            .as_slice()
            .iter()
            .find(|&&id| !self.is_visible(id))
        {
            warn!("selected node {id} is not visible");
            return false;
        }
        true
    }
}

impl<D, V: ViewLayer> Tree for TreeController<D, V> {
    type Payload = D;

    fn get(&self, id: NodeId) -> Option<&NodeData<D>> {
        self.registry.get(id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        if id.is_root() {
            return None;
        }
        self.registry.parent_of(id)
    }

    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.lists.children(id).iter().copied())
    }

    fn node_count(&self) -> usize {
        self.registry.len()
    }

    fn depth(&self, id: NodeId) -> usize {
        self.registry.depth(id)
    }

    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.registry.has_ancestor(descendant, ancestor)
    }
}
