use super::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ui::{ChildLists, UIError, UIText};

/// Check the list invariants of one container
fn check_lists(ui: &UISystem, lists: &ChildLists, parent: Option<ElementId>) {
    let active: Vec<ElementId> =
        lists.children().iter().copied().filter(|id| ui.get(*id).unwrap().is_active()).collect();
    assert_eq!(lists.active(), active.as_slice());

    let non_passive: Vec<ElementId> =
        active.iter().copied().filter(|id| !ui.get(*id).unwrap().is_passive()).collect();
    assert_eq!(lists.non_passive(), non_passive.as_slice());

    if let Some(index) = lists.mouse_over_index() {
        assert!(index < non_passive.len());
    }
    for &child in lists.children() {
        assert_eq!(ui.get(child).unwrap().parent(), parent);
    }
}

fn check_invariants(ui: &UISystem) {
    check_lists(ui, ui.roots(), None);

    let mut seen = ui.roots().children().len();
    for &root in ui.roots().children() {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = ui.get(id).unwrap();
            check_lists(ui, node.lists(), Some(id));
            assert_eq!(
                node.is_passive(),
                node.widget().is_intrinsically_passive() && node.lists().non_passive().is_empty()
            );
            if node.has_mouse_over() {
                let owner = node.parent().map_or(ui.roots(), |p| ui.get(p).unwrap().lists());
                assert_eq!(owner.mouse_over(), Some(id));
            }
            seen += node.children().len();
            stack.extend(node.children().iter().copied());
        }
    }
    // Every live element is reachable from the roots.
    assert_eq!(seen, ui.len());
}

#[test]
fn test_list_invariants_under_random_operations() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut ui = UISystem::new(800.0, 600.0);
    let mut live: Vec<ElementId> = Vec::new();

    for _ in 0..600 {
        live.retain(|id| ui.contains(*id));
        let pick = |rng: &mut StdRng, live: &[ElementId]| -> Option<ElementId> {
            (!live.is_empty()).then(|| live[rng.gen_range(0..live.len())])
        };

        match rng.gen_range(0..7) {
            0 | 1 => {
                let parent = if rng.gen_bool(0.3) { None } else { pick(&mut rng, &live) };
                let widget = if rng.gen_bool(0.4) {
                    Widget::Button(UIButton::default())
                } else {
                    Widget::Container
                };
                if let Ok(id) = ui.create_element(widget, parent) {
                    let size = Vec2::new(rng.gen_range(10.0..300.0), rng.gen_range(10.0..300.0));
                    ui.set_size(id, size).unwrap();
                    live.push(id);
                }
            }
            2 => {
                if let Some(id) = pick(&mut rng, &live) {
                    ui.destroy(id).unwrap();
                }
            }
            3 => {
                if let Some(id) = pick(&mut rng, &live) {
                    ui.set_active(id, rng.gen_bool(0.5)).unwrap();
                }
            }
            4 => {
                if let Some(id) = pick(&mut rng, &live) {
                    let parent = if rng.gen_bool(0.2) { None } else { pick(&mut rng, &live) };
                    let _ = ui.set_parent(id, parent);
                }
            }
            5 => {
                if let Some(parent) = pick(&mut rng, &live) {
                    let count = ui.child_count(parent).unwrap();
                    if count > 0 {
                        ui.move_child(parent, rng.gen_range(0..count), rng.gen_range(0..count + 2)).unwrap();
                    }
                }
            }
            _ => {
                if rng.gen_bool(0.1) {
                    ui.mouse_out();
                } else {
                    ui.mouse_move(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
                }
            }
        }
        check_invariants(&ui);
    }
}

#[test]
fn test_destroy_removes_subtree() {
    let mut ui = UISystem::new(800.0, 600.0);
    let root = ui.create_element(Widget::Container, None).unwrap();
    let child = ui.create_element(Widget::Container, Some(root)).unwrap();
    let grandchild = ui.create_button(Some(child)).unwrap();
    assert_eq!(ui.len(), 4);

    ui.remove_child(root, 0).unwrap();
    assert_eq!(ui.len(), 1);
    assert!(!ui.contains(child) && !ui.contains(grandchild));
    assert!(ui.get(root).unwrap().is_passive());
    assert_eq!(ui.set_active(child, true), Err(UIError::UnknownElement(child)));

    ui.remove_element(0).unwrap();
    assert!(ui.is_empty());
    assert_eq!(ui.remove_element(0), Err(UIError::IndexOutOfRange { index: 0, len: 0 }));
}

#[test]
fn test_set_parent_rejections_leave_tree_untouched() {
    let mut ui = UISystem::new(800.0, 600.0);
    let root = ui.create_element(Widget::Container, None).unwrap();
    let child = ui.create_element(Widget::Container, Some(root)).unwrap();
    let label = ui.create_element(UIText::new("label"), None).unwrap();

    assert_eq!(ui.set_parent(root, Some(root)), Err(UIError::CyclicParent { child: root, parent: root }));
    assert_eq!(ui.set_parent(root, Some(child)), Err(UIError::CyclicParent { child: root, parent: child }));
    assert_eq!(ui.set_parent(child, Some(root)), Err(UIError::AlreadyAttached(child)));
    assert_eq!(ui.add_element(root), Err(UIError::AlreadyAttached(root)));
    assert_eq!(ui.set_parent(child, Some(label)), Err(UIError::ChildrenNotAllowed(label)));
    assert_eq!(ui.create_element(Widget::Container, Some(label)), Err(UIError::ChildrenNotAllowed(label)));

    assert_eq!(ui.parent(child).unwrap(), Some(root));
    assert_eq!(ui.child_index(root, child).unwrap(), Some(0));
    assert_eq!(ui.element_count(), 2);
    assert_eq!(ui.len(), 3);
}

#[test]
fn test_add_element_promotes_child_to_root() {
    let mut ui = UISystem::new(800.0, 600.0);
    let root = ui.create_element(Widget::Container, None).unwrap();
    let child = ui.create_button(Some(root)).unwrap();
    assert!(!ui.get(root).unwrap().is_passive());

    ui.add_element(child).unwrap();
    assert_eq!(ui.parent(child).unwrap(), None);
    assert_eq!(ui.element_index(child), Some(1));
    assert_eq!(ui.element(1).unwrap(), child);
    assert_eq!(ui.child_count(root).unwrap(), 0);
    assert!(ui.get(root).unwrap().is_passive());
    assert_eq!(ui.roots().non_passive(), &[child]);
}

#[test]
fn test_move_clamps_destination() {
    let mut ui = UISystem::new(800.0, 600.0);
    let ids: Vec<ElementId> = (0..3).map(|_| ui.create_element(Widget::Container, None).unwrap()).collect();

    ui.move_element(0, 10).unwrap();
    assert_eq!(ui.roots().children(), &[ids[1], ids[2], ids[0]]);
    assert_eq!(ui.move_element(3, 0), Err(UIError::IndexOutOfRange { index: 3, len: 3 }));
}
