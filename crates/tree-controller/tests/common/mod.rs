#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use tree_controller::prelude::*;

/// One call the controller made into the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Create(NodeId, ViewInstance),
    Update(NodeId, ViewInstance),
    Mount(MountTarget, Placement),
    Unmount(MountTarget, Unmount),
    Expanded(NodeId, bool),
    Selected(ViewInstance, bool),
    HasChildren(ViewInstance, bool),
    Highlight(MountTarget, bool),
}

/// View layer that records calls and tracks what is currently alive
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub mounted: HashSet<MountTarget>,
    pub destroyed: HashSet<MountTarget>,
    pub highlighted: HashSet<MountTarget>,
    pub titles: HashMap<ViewInstance, String>,
}

impl RecordingView {
    pub fn created(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, ViewCall::Create(..)))
            .count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ViewLayer for RecordingView {
    fn create(&mut self, view: &NodeView, title: &str) {
        self.titles.insert(view.instance(), title.to_string());
        self.calls.push(ViewCall::Create(view.id(), view.instance()));
    }

    fn update(&mut self, view: &NodeView, title: &str) {
        self.titles.insert(view.instance(), title.to_string());
        self.calls.push(ViewCall::Update(view.id(), view.instance()));
    }

    fn mount(&mut self, target: MountTarget, placement: Placement) {
        self.mounted.insert(target);
        self.calls.push(ViewCall::Mount(target, placement));
    }

    fn unmount(&mut self, target: MountTarget, mode: Unmount) {
        self.mounted.remove(&target);
        if mode == Unmount::Destroy {
            self.destroyed.insert(target);
        }
        self.calls.push(ViewCall::Unmount(target, mode));
    }

    fn set_expanded_visual(&mut self, parent: NodeId, expanded: bool) {
        self.calls.push(ViewCall::Expanded(parent, expanded));
    }

    fn set_selected_visual(&mut self, view: ViewInstance, selected: bool) {
        self.calls.push(ViewCall::Selected(view, selected));
    }

    fn set_has_children_visual(&mut self, view: ViewInstance, has_children: bool) {
        self.calls.push(ViewCall::HasChildren(view, has_children));
    }

    fn set_drop_highlight(&mut self, target: MountTarget, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(target);
        } else {
            self.highlighted.remove(&target);
        }
        self.calls.push(ViewCall::Highlight(target, highlighted));
    }
}

pub type TestTree = TreeController<(), RecordingView>;

pub fn new_tree(config: TreeConfig) -> TestTree {
    TreeController::new(config, RecordingView::default())
}

/// Build a tree from `(id, parent)` pairs
pub fn tree_of(config: TreeConfig, pairs: &[(u64, u64)]) -> TestTree {
    let mut tree = new_tree(config);
    for &(id, parent) in pairs {
        tree.add_node(NodeData::with_parent(id, parent))
            .expect("fixture node should be accepted");
    }
    tree
}

/// The four-node tree used throughout: 1 holds 2 and 3, 2 holds 4
pub fn sample_tree() -> TestTree {
    tree_of(TreeConfig::default(), &[(1, 0), (2, 1), (3, 1), (4, 2)])
}

pub fn ids(values: &[u64]) -> Vec<NodeId> {
    values.iter().copied().map(NodeId).collect()
}

pub fn order(tree: &TestTree) -> Vec<u64> {
    tree.ordered_ids().iter().map(|id| id.get()).collect()
}

pub fn selected(tree: &TestTree) -> Vec<u64> {
    tree.selected_ids().iter().map(|id| id.get()).collect()
}
