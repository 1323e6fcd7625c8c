//! Press-and-hold interpretation of mouse input
//!
//! A mouse press provisionally arms the pressed node. If the pointer enters
//! another node while the button is still down, the press turns into a range
//! selection and dragging is refused for the rest of the gesture. If the hold
//! window elapses first, the provisional selection is committed. Releasing
//! the button cancels whatever is still pending.

use std::time::{Duration, Instant};

use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    anchor: NodeId,
    deadline: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct PointerTracker {
    hold_delay: Duration,
    press: Option<Press>,
    range_selecting: bool,
}

impl PointerTracker {
    pub fn new(hold_delay: Duration) -> Self {
        Self {
            hold_delay,
            press: None,
            range_selecting: false,
        }
    }

    pub fn is_mouse_down(&self) -> bool {
        self.press.is_some()
    }

    /// When the armed hold timer fires, if one is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.press.and_then(|press| press.deadline)
    }

    /// Whether a drag may start from the current gesture
    pub fn drag_allowed(&self) -> bool {
        !self.range_selecting
    }

    /// Arm a new press, replacing any previous timer
    pub fn mouse_down(&mut self, id: NodeId, at: Instant) {
        self.press = Some(Press {
            anchor: id,
            deadline: Some(at + self.hold_delay),
        });
        self.range_selecting = false;
    }

    /// The pointer entered `id`; returns the range to select if this
    /// supersedes the pending press
    pub fn mouse_enter(&mut self, id: NodeId, multiple: bool) -> Option<(NodeId, NodeId)> {
        let press = self.press.as_mut()?;
        if !multiple || press.anchor == id {
            return None;
        }
        press.deadline = None;
        self.range_selecting = true;
        Some((press.anchor, id))
    }

    pub fn mouse_up(&mut self) {
        self.press = None;
        self.range_selecting = false;
    }

    /// Fire the hold timer if it is due; returns the node to commit
    pub fn tick(&mut self, now: Instant) -> Option<NodeId> {
        let press = self.press.as_mut()?;
        let deadline = press.deadline?;
        if now < deadline {
            return None;
        }
        press.deadline = None;
        Some(press.anchor)
    }

    /// Drop all pending state, e.g. when the anchor vanished
    pub fn reset(&mut self) {
        self.mouse_up();
    }
}
