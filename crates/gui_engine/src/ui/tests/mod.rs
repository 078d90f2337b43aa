//! Scenario tests driving a whole [`UISystem`]

mod structure;
mod widgets;

use approx::assert_relative_eq;

use crate::core::config::ButtonStyle;
use crate::events::EventType;
use crate::foundation::math::Vec2;
use crate::ui::{ElementId, UIButton, UISystem, Widget};

/// Fixed element whose unscaled rectangle starts at `min` in the parent's
/// frame (window pixels for roots, parent's top-left corner otherwise)
fn place(ui: &mut UISystem, widget: impl Into<Widget>, parent: Option<ElementId>, min: (f32, f32), size: (f32, f32)) -> ElementId {
    let id = ui.create_element(widget, parent).unwrap();
    ui.set_anchors(id, Vec2::zeros(), Vec2::zeros()).unwrap();
    ui.set_size(id, Vec2::new(size.0, size.1)).unwrap();
    ui.set_position(id, Vec2::new(min.0 + size.0 * 0.5, min.1 + size.1 * 0.5)).unwrap();
    id
}

fn container(ui: &mut UISystem, parent: Option<ElementId>, min: (f32, f32), size: (f32, f32)) -> ElementId {
    place(ui, Widget::Container, parent, min, size)
}

/// Button without a fade, so state colors apply immediately
fn instant_button(ui: &mut UISystem, parent: Option<ElementId>, min: (f32, f32), size: (f32, f32)) -> ElementId {
    let button = UIButton::from_style(&ButtonStyle::default().with_fade_duration(0.0));
    place(ui, button, parent, min, size)
}

/// Elements named by queued events of `event_type`, oldest first
fn events_of(ui: &UISystem, event_type: EventType) -> Vec<ElementId> {
    ui.events()
        .pending()
        .iter()
        .filter(|event| event.event_type == event_type)
        .filter_map(|event| event.element())
        .collect()
}

fn assert_vec(actual: Vec2, expected: Vec2) {
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-3);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-3);
}
