//! UI Input Processing
//!
//! Pointer routing walks down from the roots one level at a time. At each
//! level the non-passive list is scanned back to front (last added is drawn
//! on top, so it wins overlaps) and the first element whose local rectangle
//! contains the pointer takes the level's hover index. A previous owner that
//! lost the pointer has its hover chain cleared deepest first before the new
//! owner receives its mouse-over.

use log::trace;

use crate::events::EventType;
use crate::foundation::math::{affine, Vec2};
use crate::ui::element::{ChildLists, Container};
use crate::ui::system::UISystem;
use crate::ui::widgets::Widget;
use crate::ui::ElementId;

use super::{KeyCode, MouseButton, MouseButtons, UIInput};

impl UISystem {
    /// Pointer moved to window pixel `(x, y)`
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        self.pointer = Some(position);
        self.route_pointer(position);
    }

    /// Pointer left the window; the whole hovered chain receives mouse-out
    pub fn mouse_out(&mut self) {
        self.pointer = None;
        if let Some(root) = self.roots.mouse_over() {
            self.clear_hover_chain(root);
        }
        self.roots.mouse_over = None;
    }

    /// Mouse button pressed, returns how many elements received it
    pub fn mouse_button_down(&mut self, button: MouseButton) -> usize {
        self.held_buttons.insert(button.flag());
        self.dispatch_input(UIInput::ButtonDown(button))
    }

    /// Mouse button released, returns how many elements received it
    pub fn mouse_button_up(&mut self, button: MouseButton) -> usize {
        self.held_buttons.remove(button.flag());
        self.dispatch_input(UIInput::ButtonUp(button))
    }

    /// Horizontal scroll
    pub fn h_scroll(&mut self, delta: f32) -> usize {
        self.dispatch_input(UIInput::HScroll(delta))
    }

    /// Vertical scroll
    pub fn v_scroll(&mut self, delta: f32) -> usize {
        self.dispatch_input(UIInput::VScroll(delta))
    }

    /// Key pressed
    pub fn key_pressed(&mut self, key: KeyCode) -> usize {
        self.dispatch_input(UIInput::KeyPressed(key))
    }

    /// Key released
    pub fn key_released(&mut self, key: KeyCode) -> usize {
        self.dispatch_input(UIInput::KeyReleased(key))
    }

    /// Character typed
    pub fn char_typed(&mut self, character: char) -> usize {
        self.dispatch_input(UIInput::CharTyped(character))
    }

    /// Mouse buttons currently held
    pub fn held_buttons(&self) -> MouseButtons {
        self.held_buttons
    }

    /// Last pointer position, `None` while outside the window
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Deliver `input` to every element reachable through the non-passive
    /// lists, parents before children
    pub fn dispatch_input(&mut self, input: UIInput) -> usize {
        let recipients = self.preorder(ChildLists::non_passive);
        trace!("Broadcasting {:?} to {} elements", input, recipients.len());

        for &id in &recipients {
            let Some(node) = self.elements.get_mut(id) else { continue };
            let (hovered, focused) = (node.has_mouse_over, node.has_focus);
            let Widget::Button(button) = &mut node.widget else { continue };

            let response = match input {
                UIInput::ButtonDown(mouse) => button.on_button_down(mouse, hovered),
                UIInput::ButtonUp(mouse) => button.on_button_up(mouse, hovered),
                UIInput::KeyPressed(key) => button.on_key_pressed(key, focused),
                UIInput::KeyReleased(_) | UIInput::HScroll(_) | UIInput::VScroll(_) | UIInput::CharTyped(_) => {
                    continue
                }
            };
            self.apply_button_response(id, response);
        }
        recipients.len()
    }

    /// Re-run routing at the last known pointer position
    pub(crate) fn replay_pointer(&mut self) {
        if let Some(position) = self.pointer {
            self.route_pointer(position);
        }
    }

    pub(crate) fn route_pointer(&mut self, position: Vec2) {
        let mut container = Container::Root;
        let mut point = position;

        loop {
            let Some(lists) = self.lists(container) else { break };
            let previous = lists.mouse_over();
            let winner = lists.non_passive.iter().rev().find_map(|&id| self.hit_test(id, point));

            if let Some(previous) = previous {
                if winner.map(|(id, _)| id) != Some(previous) {
                    self.clear_hover_chain(previous);
                }
            }

            let Some((id, local)) = winner else {
                if let Some(lists) = self.lists_mut(container) {
                    lists.mouse_over = None;
                }
                break;
            };
            if let Some(lists) = self.lists_mut(container) {
                lists.mouse_over = lists.non_passive.iter().position(|child| *child == id);
            }
            let entered = self.elements.get_mut(id).is_some_and(|node| !std::mem::replace(&mut node.has_mouse_over, true));
            if entered {
                self.fire_mouse_over(id);
            }

            container = Container::Element(id);
            point = local;
        }
    }

    /// Pointer in `id`'s local space if it lies inside the element
    fn hit_test(&self, id: ElementId, point: Vec2) -> Option<(ElementId, Vec2)> {
        let node = self.elements.get(id)?;
        if !node.active || node.passive {
            return None;
        }
        let local = affine::transform_point(&node.parent_to_local, point);
        node.geometry.contains_local(node.layout.size, local).then_some((id, local))
    }

    /// Fire mouse-out along the hover chain starting at `id`, deepest first,
    /// and clear the hover indices below `id`. The index pointing at `id`
    /// belongs to its container and is left to the caller.
    pub(crate) fn clear_hover_chain(&mut self, id: ElementId) {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(next) = self.elements.get(current).and_then(|node| node.lists.mouse_over()) {
            chain.push(next);
            current = next;
        }

        for &node_id in chain.iter().rev() {
            let Some(node) = self.elements.get_mut(node_id) else { continue };
            node.lists.mouse_over = None;
            if std::mem::replace(&mut node.has_mouse_over, false) {
                self.fire_mouse_out(node_id);
            }
        }
    }

    fn fire_mouse_over(&mut self, id: ElementId) {
        trace!("Mouse over {:?}", id);
        self.emit(EventType::MouseOver, id);
        if let Some(Widget::Button(button)) = self.elements.get_mut(id).map(|node| &mut node.widget) {
            let response = button.on_mouse_over();
            self.apply_button_response(id, response);
        }
    }

    fn fire_mouse_out(&mut self, id: ElementId) {
        trace!("Mouse out {:?}", id);
        self.emit(EventType::MouseOut, id);
        if let Some(Widget::Button(button)) = self.elements.get_mut(id).map(|node| &mut node.widget) {
            let response = button.on_mouse_out();
            self.apply_button_response(id, response);
        }
    }
}
