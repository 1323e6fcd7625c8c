//! A view layer that draws nothing and logs what it is asked to do

use log::{debug, trace};
use tree_controller::{MountTarget, NodeId, NodeView, Placement, Unmount, ViewInstance, ViewLayer};

/// Tallies of view work done since the last [`ConsoleView::reset_counts`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCounts {
    pub created: usize,
    pub reused: usize,
    pub destroyed: usize,
}

#[derive(Debug, Default)]
pub struct ConsoleView {
    counts: ViewCounts,
}

impl ConsoleView {
    pub fn counts(&self) -> ViewCounts {
        self.counts
    }

    pub fn reset_counts(&mut self) {
        self.counts = ViewCounts::default();
    }
}

impl ViewLayer for ConsoleView {
    fn create(&mut self, view: &NodeView, title: &str) {
        self.counts.created += 1;
        trace!("create {} for {title}", view.instance());
    }

    fn update(&mut self, view: &NodeView, title: &str) {
        self.counts.reused += 1;
        trace!("reuse {} for {title}", view.instance());
    }

    fn mount(&mut self, target: MountTarget, placement: Placement) {
        trace!("mount {target:?} at {placement:?}");
    }

    fn unmount(&mut self, target: MountTarget, mode: Unmount) {
        if mode == Unmount::Destroy {
            if let MountTarget::Node(_) = target {
                self.counts.destroyed += 1;
            }
        }
        trace!("unmount {target:?} ({mode:?})");
    }

    fn set_expanded_visual(&mut self, parent: NodeId, expanded: bool) {
        debug!("list of {parent} {}", if expanded { "shown" } else { "hidden" });
    }

    fn set_selected_visual(&mut self, view: ViewInstance, selected: bool) {
        debug!("{view} selected: {selected}");
    }
}
