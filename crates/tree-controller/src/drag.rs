//! Throttled hover decoration while something is dragged over the tree
//!
//! Feedback never touches ordering or selection. Every highlight applied is
//! remembered so that a single sweep removes all of them.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::trace;

use crate::controller::TreeController;
use crate::node::NodeId;
use crate::traits::Tree;
use crate::view::{MountTarget, ViewLayer};

/// A hover change waiting to be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHover {
    Enter(NodeId),
    Leave(NodeId),
}

#[derive(Debug, Clone)]
pub struct DragFeedback {
    window: Duration,
    last_applied: Option<Instant>,
    pending: Option<DragHover>,
    highlighted: HashSet<MountTarget>,
    dragging: bool,
}

impl DragFeedback {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_applied: None,
            pending: None,
            highlighted: HashSet::new(),
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pass a hover change through the throttle
    ///
    /// Returns the change if it may be applied now; otherwise it replaces any
    /// change already waiting for the window to close.
    pub fn throttle(&mut self, hover: DragHover, now: Instant) -> Option<DragHover> {
        let open = self
            .last_applied
            .map_or(true, |last| now.saturating_duration_since(last) >= self.window);
        if open {
            self.last_applied = Some(now);
            self.pending = None;
            Some(hover)
        } else {
            self.pending = Some(hover);
            None
        }
    }

    /// Release the waiting change once the window has closed
    pub fn tick(&mut self, now: Instant) -> Option<DragHover> {
        let last = self.last_applied?;
        if now.saturating_duration_since(last) < self.window {
            return None;
        }
        let hover = self.pending.take()?;
        self.last_applied = Some(now);
        Some(hover)
    }

    /// When the waiting change, if any, can be released
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending?;
        self.last_applied.map(|last| last + self.window)
    }

    /// Stop tracking a target that no longer exists
    pub fn forget(&mut self, target: MountTarget) {
        self.highlighted.remove(&target);
    }

    fn reset(&mut self) {
        self.pending = None;
        self.last_applied = None;
        self.dragging = false;
    }
}

impl<D, V: ViewLayer> TreeController<D, V> {
    /// Highlight targets for hovering `id`: the node itself and, for leaves,
    /// the list they would be dropped into
    fn drop_targets(&self, id: NodeId) -> Vec<MountTarget> {
        let Some(view) = self.registry.view(id) else {
            return Vec::new();
        };
        let mut targets = vec![MountTarget::Node(view.instance())];
        if self.is_leaf(id) {
            if let Some(parent) = self.registry.parent_of(id) {
                targets.push(MountTarget::List(parent));
            }
        }
        targets
    }

    pub(crate) fn apply_drag_hover(&mut self, hover: DragHover) {
        match hover {
            DragHover::Enter(id) => {
                for target in self.drop_targets(id) {
                    if self.drag.highlighted.insert(target) {
                        self.view.set_drop_highlight(target, true);
                    }
                }
            }
            DragHover::Leave(id) => {
                for target in self.drop_targets(id) {
                    if self.drag.highlighted.remove(&target) {
                        self.view.set_drop_highlight(target, false);
                    }
                }
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Begin a drag gesture from `id`
    ///
    /// Refused while the press is being read as a range selection, or when
    /// dragging is disabled.
    pub fn drag_start(&mut self, id: NodeId) -> bool {
        if !self.config.is_drag_and_drop()
            || !self.registry.contains(id)
            || !self.pointer.drag_allowed()
        {
            return false;
        }
        trace!("drag started from {id}");
        self.drag.dragging = true;
        true
    }

    pub fn drag_enter(&mut self, id: NodeId, at: Instant) {
        if !self.config.is_drag_and_drop() {
            return;
        }
        if let Some(hover) = self.drag.throttle(DragHover::Enter(id), at) {
            self.apply_drag_hover(hover);
        }
    }

    pub fn drag_leave(&mut self, id: NodeId, at: Instant) {
        if !self.config.is_drag_and_drop() {
            return;
        }
        if let Some(hover) = self.drag.throttle(DragHover::Leave(id), at) {
            self.apply_drag_hover(hover);
        }
    }

    /// Remove every drag highlight
    pub fn clear_all_drag_feedback(&mut self) {
        for target in self.drag.highlighted.drain() {
            self.view.set_drop_highlight(target, false);
        }
        self.drag.reset();
    }

    /// The drag ended, with or without a drop
    pub fn drag_end(&mut self) {
        self.clear_all_drag_feedback();
        self.pointer.reset();
    }
}
