//! Input events consumed from the view layer and notifications emitted to
//! observers

use std::time::Instant;

use derive_more::Display;

use crate::node::NodeId;

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl, or Cmd on macOS
    pub command: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        command: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        command: false,
        alt: false,
    };

    pub const COMMAND: Modifiers = Modifiers {
        shift: false,
        command: true,
        alt: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Keys the tree reacts to; anything else is reported but not acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Key {
    #[display(fmt = "Up")]
    Up,
    #[display(fmt = "Down")]
    Down,
    #[display(fmt = "Left")]
    Left,
    #[display(fmt = "Right")]
    Right,
    #[display(fmt = "Enter")]
    Enter,
    #[display(fmt = "Escape")]
    Escape,
    #[display(fmt = "{}", _0)]
    Char(char),
}

/// An input event tagged with the node it originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click {
        id: NodeId,
        modifiers: Modifiers,
    },
    DoubleClick(NodeId),
    MouseDown {
        id: NodeId,
        button: MouseButton,
        at: Instant,
    },
    MouseUp {
        at: Instant,
    },
    MouseEnter {
        id: NodeId,
        at: Instant,
    },
    MouseMove {
        id: NodeId,
        at: Instant,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    DragStart {
        id: NodeId,
        at: Instant,
    },
    DragEnter {
        id: NodeId,
        at: Instant,
    },
    DragLeave {
        id: NodeId,
        at: Instant,
    },
    DragOver {
        id: NodeId,
        at: Instant,
    },
    DragEnd,
    Drop {
        id: NodeId,
    },
}

/// Notifications for external observers, drained after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    NodeWasAdded(NodeId),
    NodeWasRemoved(NodeId),
    SelectionChanged(Vec<NodeId>),
    KeyEventPerformedOnTreeView(Key),
    ExpansionChanged { id: NodeId, expanded: bool },
}
