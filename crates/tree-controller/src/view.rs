//! The seam between the controller and whatever draws the tree
//!
//! The controller never touches visuals directly. It owns a [`NodeView`] per
//! node (its expand/select state plus a stable [`ViewInstance`] handle) and
//! tells a [`ViewLayer`] where to mount, detach or destroy things.

use derive_more::Display;

use crate::node::NodeId;

/// Stable handle of one visual representation
///
/// A handle survives archiving, so a node re-added after a refresh keeps the
/// instance it had before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "view#{}", _0)]
pub struct ViewInstance(pub(crate) u64);

impl ViewInstance {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Controller-side state of a node's visual representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub(crate) id: NodeId,
    pub(crate) instance: ViewInstance,
    pub(crate) expanded: bool,
    pub(crate) selected: bool,
    pub(crate) has_children: bool,
    pub(crate) archived: bool,
}

impl NodeView {
    pub(crate) fn new(id: NodeId, instance: ViewInstance, expanded: bool) -> Self {
        Self {
            id,
            instance,
            expanded,
            selected: false,
            has_children: false,
            archived: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn instance(&self) -> ViewInstance {
        self.instance
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }
}

/// Something the view layer can mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountTarget {
    /// A node's own visual
    Node(ViewInstance),
    /// The list container holding the children of a parent (root included)
    List(NodeId),
}

/// Where a mounted target goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately after an already mounted sibling
    After(MountTarget),
    /// As the first entry of a parent's list
    Prepend(NodeId),
    /// Directly under the controller's root element
    Root,
}

/// How an unmounted target is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmount {
    /// Keep it alive for a later reattachment
    Detach,
    /// Release it for good
    Destroy,
}

/// Operations the controller consumes from the drawing layer
///
/// Only mounting, unmounting and the expanded toggle are required; the
/// remaining decorations default to doing nothing. Rendering node content is
/// left to the implementation.
pub trait ViewLayer {
    /// A new visual was created
    fn create(&mut self, _view: &NodeView, _title: &str) {}

    /// An existing visual is being reused with fresh data
    fn update(&mut self, _view: &NodeView, _title: &str) {}

    fn mount(&mut self, target: MountTarget, placement: Placement);

    fn unmount(&mut self, target: MountTarget, mode: Unmount);

    /// Show or hide the list holding `parent`'s children
    fn set_expanded_visual(&mut self, parent: NodeId, expanded: bool);

    fn set_selected_visual(&mut self, _view: ViewInstance, _selected: bool) {}

    fn set_has_children_visual(&mut self, _view: ViewInstance, _has_children: bool) {}

    fn set_drop_highlight(&mut self, _target: MountTarget, _highlighted: bool) {}
}

/// A view layer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl ViewLayer for NullView {
    fn mount(&mut self, _target: MountTarget, _placement: Placement) {}

    fn unmount(&mut self, _target: MountTarget, _mode: Unmount) {}

    fn set_expanded_visual(&mut self, _parent: NodeId, _expanded: bool) {}
}
