//! Mounted list containers, one per parent
//!
//! A parent's list is created (and mounted right after the parent's own view,
//! or at the controller root for the root sentinel) when its first child
//! arrives, and destroyed when its last child leaves. The local order of a
//! list is always copied from the ordered index, never tracked separately.

use log::trace;
use std::collections::HashMap;

use crate::node::NodeId;
use crate::view::{MountTarget, Placement, Unmount, ViewInstance, ViewLayer};

/// The mounted children of one parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContainer {
    parent: NodeId,
    children: Vec<NodeId>,
}

impl ListContainer {
    fn new(parent: NodeId) -> Self {
        Self {
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ListMaterializer {
    lists: HashMap<NodeId, ListContainer>,
}

impl ListMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_list(&self, parent: NodeId) -> bool {
        self.lists.contains_key(&parent)
    }

    pub fn list(&self, parent: NodeId) -> Option<&ListContainer> {
        self.lists.get(&parent)
    }

    /// Mounted children of `parent`, in display order
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.lists
            .get(&parent)
            .map(|list| list.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Make sure `parent` has a mounted list
    ///
    /// `parent_view` is `None` for the root sentinel. A previously detached
    /// list is reattached instead of creating a new one.
    pub fn ensure_list<V: ViewLayer>(
        &mut self,
        parent: NodeId,
        parent_view: Option<ViewInstance>,
        expanded: bool,
        reuse: Option<ListContainer>,
        view: &mut V,
    ) {
        if self.lists.contains_key(&parent) {
            return;
        }
        let mut list = reuse.unwrap_or_else(|| ListContainer::new(parent));
        list.children.clear();
        let placement = match parent_view {
            Some(instance) => Placement::After(MountTarget::Node(instance)),
            None => Placement::Root,
        };
        trace!("mounting list of {parent}");
        view.mount(MountTarget::List(parent), placement);
        view.set_expanded_visual(parent, expanded);
        self.lists.insert(parent, list);
    }

    /// Mount `child` into its parent's list
    ///
    /// `siblings` is the parent's child order taken from the ordered index,
    /// already including `child`; `instance_of` resolves sibling views.
    pub fn mount_child<V, F>(
        &mut self,
        parent: NodeId,
        child: NodeId,
        child_view: ViewInstance,
        siblings: Vec<NodeId>,
        instance_of: F,
        view: &mut V,
    ) where
        V: ViewLayer,
        F: Fn(NodeId) -> Option<ViewInstance>,
    {
        let Some(list) = self.lists.get_mut(&parent) else {
            return;
        };
        let local = siblings.iter().position(|&id| id == child).unwrap_or(0);
        let placement = match local.checked_sub(1).and_then(|prev| siblings.get(prev)) {
            Some(&previous) => match instance_of(previous) {
                Some(instance) => Placement::After(MountTarget::Node(instance)),
                None => Placement::Prepend(parent),
            },
            None => Placement::Prepend(parent),
        };
        list.children = siblings;
        view.mount(MountTarget::Node(child_view), placement);
    }

    /// Unmount `child` from its parent's list
    ///
    /// The list itself is destroyed once it has no children left; returns
    /// true when that happened.
    pub fn unmount_child<V: ViewLayer>(
        &mut self,
        parent: NodeId,
        child: NodeId,
        child_view: ViewInstance,
        mode: Unmount,
        view: &mut V,
    ) -> bool {
        view.unmount(MountTarget::Node(child_view), mode);
        let Some(list) = self.lists.get_mut(&parent) else {
            return false;
        };
        list.children.retain(|&id| id != child);
        if !list.children.is_empty() {
            return false;
        }
        self.destroy_list(parent, view);
        true
    }

    /// Remove a list from the mounted tree, keeping it for reattachment
    pub fn detach_list<V: ViewLayer>(
        &mut self,
        parent: NodeId,
        view: &mut V,
    ) -> Option<ListContainer> {
        let list = self.lists.remove(&parent)?;
        trace!("detaching list of {parent}");
        view.unmount(MountTarget::List(parent), Unmount::Detach);
        Some(list)
    }

    pub fn destroy_list<V: ViewLayer>(&mut self, parent: NodeId, view: &mut V) {
        if self.lists.remove(&parent).is_some() {
            trace!("destroying list of {parent}");
            view.unmount(MountTarget::List(parent), Unmount::Destroy);
        }
    }

    /// Show or hide a parent's list if it has one
    pub fn set_expanded<V: ViewLayer>(&self, parent: NodeId, expanded: bool, view: &mut V) {
        if self.lists.contains_key(&parent) {
            view.set_expanded_visual(parent, expanded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::NullView;

    fn instance(n: u64) -> Option<ViewInstance> {
        Some(ViewInstance(n))
    }

    #[test]
    fn test_list_lifecycle() {
        let mut lists = ListMaterializer::new();
        let mut view = NullView;
        lists.ensure_list(NodeId(1), instance(1), false, None, &mut view);
        assert!(lists.has_list(NodeId(1)));

        lists.mount_child(
            NodeId(1),
            NodeId(2),
            ViewInstance(2),
            vec![NodeId(2)],
            |id| instance(id.get()),
            &mut view,
        );
        lists.mount_child(
            NodeId(1),
            NodeId(3),
            ViewInstance(3),
            vec![NodeId(2), NodeId(3)],
            |id| instance(id.get()),
            &mut view,
        );
        assert_eq!(lists.children(NodeId(1)), &[NodeId(2), NodeId(3)]);

        let emptied = lists.unmount_child(
            NodeId(1),
            NodeId(2),
            ViewInstance(2),
            Unmount::Destroy,
            &mut view,
        );
        assert!(!emptied);
        let emptied = lists.unmount_child(
            NodeId(1),
            NodeId(3),
            ViewInstance(3),
            Unmount::Destroy,
            &mut view,
        );
        assert!(emptied);
        assert!(!lists.has_list(NodeId(1)));
        assert_eq!(lists.children(NodeId(1)), &[] as &[NodeId]);
    }

    #[test]
    fn test_detach_keeps_container() {
        let mut lists = ListMaterializer::new();
        let mut view = NullView;
        lists.ensure_list(NodeId::ROOT, None, true, None, &mut view);
        lists.mount_child(
            NodeId::ROOT,
            NodeId(1),
            ViewInstance(1),
            vec![NodeId(1)],
            |id| instance(id.get()),
            &mut view,
        );
        let detached = lists.detach_list(NodeId::ROOT, &mut view).unwrap();
        assert_eq!(detached.parent(), NodeId::ROOT);
        assert_eq!(detached.children(), &[NodeId(1)]);
        assert_eq!(lists.list_count(), 0);

        lists.ensure_list(NodeId::ROOT, None, true, Some(detached), &mut view);
        assert!(lists.list(NodeId::ROOT).map(ListContainer::is_empty).unwrap_or(false));
    }
}
