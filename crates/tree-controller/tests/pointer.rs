mod common;

use std::time::{Duration, Instant};

use common::*;
use pretty_assertions::assert_eq;
use tree_controller::prelude::*;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn expanded_sample() -> TestTree {
    let mut tree = sample_tree();
    tree.expand_all();
    tree
}

fn mouse_down(tree: &mut TestTree, id: u64, at: Instant) {
    tree.handle_input(InputEvent::MouseDown {
        id: NodeId(id),
        button: MouseButton::Primary,
        at,
    });
}

#[test]
fn test_hold_commits_selection() {
    let t0 = Instant::now();
    let mut tree = expanded_sample();
    mouse_down(&mut tree, 2, t0);
    assert_eq!(tree.next_deadline(), Some(t0 + ms(1000)));

    tree.tick(t0 + ms(500));
    assert!(tree.selected_ids().is_empty());
    tree.tick(t0 + ms(1000));
    assert_eq!(selected(&tree), vec![2]);
    assert_eq!(tree.next_deadline(), None);
}

#[test]
fn test_enter_while_pressed_selects_range() {
    let t0 = Instant::now();
    let mut tree = expanded_sample();
    mouse_down(&mut tree, 1, t0);
    tree.handle_input(InputEvent::MouseEnter {
        id: NodeId(3),
        at: t0 + ms(200),
    });
    assert_eq!(selected(&tree), vec![1, 2, 4, 3]);

    // The hold timer was cancelled by the range gesture
    tree.tick(t0 + ms(5000));
    assert_eq!(selected(&tree), vec![1, 2, 4, 3]);

    // Dragging is refused for the rest of the gesture
    assert!(!tree.drag_start(NodeId(1)));
    tree.handle_input(InputEvent::MouseUp { at: t0 + ms(5100) });
    assert!(tree.drag_start(NodeId(1)));
}

#[test]
fn test_enter_without_press_does_nothing() {
    let t0 = Instant::now();
    let mut tree = expanded_sample();
    tree.handle_input(InputEvent::MouseEnter {
        id: NodeId(3),
        at: t0,
    });
    assert!(tree.selected_ids().is_empty());
}

#[test]
fn test_release_cancels_hold() {
    let t0 = Instant::now();
    let mut tree = expanded_sample();
    mouse_down(&mut tree, 2, t0);
    tree.handle_input(InputEvent::MouseUp { at: t0 + ms(100) });
    tree.tick(t0 + ms(2000));
    assert!(tree.selected_ids().is_empty());
}

#[test]
fn test_hold_on_removed_node_is_ignored() {
    let t0 = Instant::now();
    let mut tree = expanded_sample();
    mouse_down(&mut tree, 4, t0);
    tree.remove_node(NodeId(4));
    tree.tick(t0 + ms(1000));
    assert!(tree.selected_ids().is_empty());
}

#[test]
fn test_single_selection_ignores_range_gesture() {
    let t0 = Instant::now();
    let mut tree = tree_of(TreeConfig::menu_tree(), &[(1, 0), (2, 0)]);
    mouse_down(&mut tree, 1, t0);
    tree.handle_input(InputEvent::MouseEnter {
        id: NodeId(2),
        at: t0 + ms(10),
    });
    assert!(tree.selected_ids().is_empty());
    tree.tick(t0 + ms(1000));
    assert_eq!(selected(&tree), vec![1]);
}

fn drag_tree() -> TestTree {
    let mut tree = new_tree(TreeConfig::file_tree().start_expanded(true));
    tree.add_node(NodeData::container(1, 0, "src", ())).unwrap();
    tree.add_node(NodeData::leaf(2, 1, "lib.rs", ())).unwrap();
    tree.add_node(NodeData::leaf(3, 1, "main.rs", ())).unwrap();
    tree
}

#[test]
fn test_drag_hover_is_throttled() {
    let t0 = Instant::now();
    let mut tree = drag_tree();
    let folder = MountTarget::Node(tree.node_view(NodeId(1)).unwrap().instance());
    let lib = MountTarget::Node(tree.node_view(NodeId(2)).unwrap().instance());
    let main = MountTarget::Node(tree.node_view(NodeId(3)).unwrap().instance());

    assert!(tree.drag_start(NodeId(2)));
    tree.handle_input(InputEvent::DragEnter {
        id: NodeId(1),
        at: t0,
    });
    assert!(tree.view().highlighted.contains(&folder));

    // Inside the window: only the latest change survives
    tree.handle_input(InputEvent::DragEnter {
        id: NodeId(2),
        at: t0 + ms(20),
    });
    tree.handle_input(InputEvent::DragEnter {
        id: NodeId(3),
        at: t0 + ms(40),
    });
    assert!(!tree.view().highlighted.contains(&main));
    assert_eq!(tree.next_deadline(), Some(t0 + ms(100)));

    tree.tick(t0 + ms(100));
    assert!(tree.view().highlighted.contains(&main));
    assert!(!tree.view().highlighted.contains(&lib));
    // Hovering a leaf also marks the list it would be dropped into
    assert!(tree
        .view()
        .highlighted
        .contains(&MountTarget::List(NodeId(1))));
}

#[test]
fn test_drag_end_clears_everything() {
    let t0 = Instant::now();
    let mut tree = drag_tree();
    tree.drag_start(NodeId(2));
    tree.drag_enter(NodeId(1), t0);
    tree.drag_enter(NodeId(3), t0 + ms(150));
    tree.drag_enter(NodeId(2), t0 + ms(170));
    assert!(!tree.view().highlighted.is_empty());

    assert!(tree.is_dragging());
    tree.handle_input(InputEvent::Drop { id: NodeId(1) });
    assert!(!tree.is_dragging());
    assert!(tree.view().highlighted.is_empty());
    assert_eq!(tree.next_deadline(), None);

    // A waiting change does not resurface after the sweep
    tree.tick(t0 + ms(1000));
    assert!(tree.view().highlighted.is_empty());
}

#[test]
fn test_drag_leave_removes_highlight() {
    let t0 = Instant::now();
    let mut tree = drag_tree();
    tree.drag_start(NodeId(2));
    tree.drag_enter(NodeId(3), t0);
    tree.drag_leave(NodeId(3), t0 + ms(100));
    assert!(tree.view().highlighted.is_empty());
}

#[test]
fn test_drag_feedback_leaves_state_alone() {
    let t0 = Instant::now();
    let mut tree = drag_tree();
    tree.select_node(NodeId(2));
    let before = tree.ordered_ids().to_vec();
    tree.drag_start(NodeId(2));
    tree.drag_enter(NodeId(3), t0);
    tree.drag_end();
    assert_eq!(tree.ordered_ids(), before.as_slice());
    assert_eq!(selected(&tree), vec![2]);
}

#[test]
fn test_drag_disabled() {
    let t0 = Instant::now();
    let mut tree = tree_of(TreeConfig::menu_tree(), &[(1, 0)]);
    assert!(!tree.drag_start(NodeId(1)));
    tree.drag_enter(NodeId(1), t0);
    assert!(tree.view().highlighted.is_empty());
}
