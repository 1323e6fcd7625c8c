use std::time::Duration;

/// What to do with a node whose parent is not part of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Reparent the node to the root
    #[default]
    AttachToRoot,
    /// Refuse the node
    Reject,
}

/// Configuration for a [`TreeController`](crate::TreeController)
///
/// Behavioural variants of the tree (a file browser, a nested menu) are
/// expressed as presets of this type.
///
/// ```
/// use std::time::Duration;
/// use tree_controller::TreeConfig;
///
/// let config = TreeConfig::default()
///     .multiple_selection(false)
///     .start_expanded(true)
///     .hold_delay(Duration::from_millis(500));
/// assert!(!config.is_multiple_selection());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    orphan_policy: OrphanPolicy,
    start_expanded: bool,
    multiple_selection: bool,
    track_depth: bool,
    keyboard_navigation: bool,
    drag_and_drop: bool,
    hold_delay: Duration,
    drag_throttle: Duration,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            orphan_policy: OrphanPolicy::AttachToRoot,
            start_expanded: false,
            multiple_selection: true,
            track_depth: true,
            keyboard_navigation: true,
            drag_and_drop: true,
            hold_delay: Duration::from_millis(1000),
            drag_throttle: Duration::from_millis(100),
        }
    }
}

impl TreeConfig {
    /// A file browser: multi-select, drag and drop, collapsed folders
    pub fn file_tree() -> Self {
        Self::default()
    }

    /// A nested menu: single selection, no dragging, strict parent links
    pub fn menu_tree() -> Self {
        Self::default()
            .multiple_selection(false)
            .drag_and_drop(false)
            .orphan_policy(OrphanPolicy::Reject)
    }

    pub fn orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Whether new nodes start expanded instead of collapsed
    pub fn start_expanded(mut self, expanded: bool) -> Self {
        self.start_expanded = expanded;
        self
    }

    pub fn multiple_selection(mut self, enabled: bool) -> Self {
        self.multiple_selection = enabled;
        self
    }

    /// Whether the controller writes `depth` into added node data
    pub fn track_depth(mut self, enabled: bool) -> Self {
        self.track_depth = enabled;
        self
    }

    pub fn keyboard_navigation(mut self, enabled: bool) -> Self {
        self.keyboard_navigation = enabled;
        self
    }

    pub fn drag_and_drop(mut self, enabled: bool) -> Self {
        self.drag_and_drop = enabled;
        self
    }

    /// How long a mouse press must be held before it becomes a drag
    pub fn hold_delay(mut self, delay: Duration) -> Self {
        self.hold_delay = delay;
        self
    }

    /// Minimum interval between drag highlight updates
    pub fn drag_throttle(mut self, window: Duration) -> Self {
        self.drag_throttle = window;
        self
    }

    pub fn get_orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    pub fn is_start_expanded(&self) -> bool {
        self.start_expanded
    }

    pub fn is_multiple_selection(&self) -> bool {
        self.multiple_selection
    }

    pub fn is_tracking_depth(&self) -> bool {
        self.track_depth
    }

    pub fn is_keyboard_navigation(&self) -> bool {
        self.keyboard_navigation
    }

    pub fn is_drag_and_drop(&self) -> bool {
        self.drag_and_drop
    }

    pub fn get_hold_delay(&self) -> Duration {
        self.hold_delay
    }

    pub fn get_drag_throttle(&self) -> Duration {
        self.drag_throttle
    }
}
