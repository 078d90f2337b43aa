use std::cell::Cell;
use std::rc::Rc;

use super::*;

use crate::core::config::UIConfig;
use crate::foundation::math::Vec4;
use crate::ui::{ButtonState, CommandRecorder, KeyCode, MouseButton, UIError, UIImage, UIRenderCommand, UIText};

fn config_without_fade() -> UIConfig {
    let mut config = UIConfig::default();
    config.button = ButtonStyle::default().with_fade_duration(0.0);
    config
}

fn target_color(ui: &UISystem, button: ElementId) -> Vec4 {
    let target = ui.get(button).unwrap().widget().as_button().unwrap().target().unwrap();
    ui.get(target).unwrap().widget().as_image().unwrap().color
}

fn state(ui: &UISystem, button: ElementId) -> ButtonState {
    ui.get(button).unwrap().widget().as_button().unwrap().state()
}

#[test]
fn test_button_click_fires_once() {
    let config = config_without_fade();
    let mut ui = UISystem::from_config(&config);
    let button = ui.create_button(None).unwrap();
    ui.set_size(button, Vec2::new(100.0, 40.0)).unwrap();

    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    ui.button_mut(button).unwrap().clicked.subscribe(move |_| counter.set(counter.get() + 1));

    ui.mouse_move(400.0, 300.0);
    assert_eq!(state(&ui, button), ButtonState::Highlighted);
    assert_eq!(target_color(&ui, button), config.button.highlighted_color);

    ui.mouse_button_down(MouseButton::Left);
    assert_eq!(state(&ui, button), ButtonState::Pressed);
    assert!(ui.get(button).unwrap().has_focus());

    ui.mouse_button_up(MouseButton::Left);
    assert_eq!(state(&ui, button), ButtonState::Selected);
    assert_eq!(clicks.get(), 1);
    assert_eq!(events_of(&ui, EventType::ButtonClicked), vec![button]);
    assert_eq!(target_color(&ui, button), config.button.selected_color);
}

#[test]
fn test_release_outside_selects_without_click() {
    let mut ui = UISystem::from_config(&config_without_fade());
    let button = ui.create_button(None).unwrap();
    ui.set_size(button, Vec2::new(100.0, 40.0)).unwrap();

    ui.mouse_move(400.0, 300.0);
    ui.mouse_button_down(MouseButton::Left);
    ui.mouse_move(10.0, 10.0);
    assert_eq!(state(&ui, button), ButtonState::Pressed);

    ui.mouse_button_up(MouseButton::Left);
    assert_eq!(state(&ui, button), ButtonState::Selected);
    assert!(events_of(&ui, EventType::ButtonClicked).is_empty());
}

#[test]
fn test_keyboard_confirm_clicks_focused_button() {
    let mut ui = UISystem::from_config(&config_without_fade());
    let button = ui.create_button(None).unwrap();
    ui.set_size(button, Vec2::new(100.0, 40.0)).unwrap();

    ui.key_pressed(KeyCode::Enter);
    assert!(events_of(&ui, EventType::ButtonClicked).is_empty());

    ui.mouse_move(400.0, 300.0);
    ui.mouse_button_down(MouseButton::Left);
    ui.mouse_button_up(MouseButton::Left);
    ui.events_mut().clear();

    ui.key_pressed(KeyCode::Space);
    assert_eq!(events_of(&ui, EventType::ButtonClicked), vec![button]);
    assert_eq!(state(&ui, button), ButtonState::Pressed);
    ui.update(0.016);
    assert_eq!(state(&ui, button), ButtonState::Selected);

    // Pressing elsewhere drops focus.
    ui.mouse_move(10.0, 10.0);
    ui.mouse_button_down(MouseButton::Left);
    assert!(!ui.get(button).unwrap().has_focus());
    assert_eq!(state(&ui, button), ButtonState::Normal);
    let focus = ui.events().pending().iter().rev().find(|e| e.event_type == EventType::FocusChanged);
    assert_eq!(focus.and_then(|e| e.flag("focused")), Some(false));
}

#[test]
fn test_disabled_button_ignores_pointer() {
    let config = config_without_fade();
    let mut ui = UISystem::from_config(&config);
    let button = ui.create_button(None).unwrap();
    ui.set_size(button, Vec2::new(100.0, 40.0)).unwrap();

    ui.set_button_interactable(button, false).unwrap();
    assert_eq!(state(&ui, button), ButtonState::Disabled);
    assert_eq!(target_color(&ui, button), config.button.disabled_color);

    ui.mouse_move(400.0, 300.0);
    ui.mouse_button_down(MouseButton::Left);
    assert_eq!(state(&ui, button), ButtonState::Disabled);

    ui.set_button_interactable(button, true).unwrap();
    assert_eq!(state(&ui, button), ButtonState::Normal);
}

#[test]
fn test_fade_drives_target_image() {
    let mut ui = UISystem::new(800.0, 600.0);
    let button = ui.create_button(None).unwrap();
    ui.set_size(button, Vec2::new(100.0, 40.0)).unwrap();
    {
        let widget = ui.button_mut(button).unwrap();
        widget.fade_duration = 0.2;
        widget.colors.normal = Vec4::new(1.0, 1.0, 1.0, 1.0);
        widget.colors.highlighted = Vec4::new(0.0, 0.0, 0.0, 1.0);
    }

    ui.mouse_move(400.0, 300.0);
    ui.update(0.1);
    assert_relative_eq!(target_color(&ui, button).x, 0.5, epsilon = 1e-4);
    ui.update(0.1);
    assert_relative_eq!(target_color(&ui, button).x, 0.0, epsilon = 1e-4);
    assert!(!ui.get(button).unwrap().widget().as_button().unwrap().is_fading());
}

#[test]
fn test_button_target_must_be_image() {
    let mut ui = UISystem::new(800.0, 600.0);
    let button = ui.create_button(None).unwrap();
    let other = ui.create_element(Widget::Container, None).unwrap();
    assert_eq!(
        ui.set_button_target(button, Some(other)),
        Err(UIError::WrongWidget { element: other, expected: "image" })
    );
    assert_eq!(ui.image_mut(other).err(), Some(UIError::WrongWidget { element: other, expected: "image" }));
}

#[test]
fn test_render_walks_active_elements_in_order() {
    let mut ui = UISystem::new(800.0, 600.0);
    let back = ui.create_element(UIImage::new().with_color(Vec4::new(1.0, 0.0, 0.0, 1.0)), None).unwrap();
    let front = ui.create_element(UIImage::new().with_color(Vec4::new(0.0, 1.0, 0.0, 1.0)), Some(back)).unwrap();
    ui.create_element(Widget::Container, None).unwrap();

    let mut recorder = CommandRecorder::new();
    ui.render(&mut recorder).unwrap();
    assert_eq!(recorder.draw_count(), 2);
    let reds: Vec<f32> = recorder.materials().map(|m| m.color.x).collect();
    assert_eq!(reds, vec![1.0, 0.0]);
    assert!(matches!(recorder.commands()[0], UIRenderCommand::SetTransform(_)));

    ui.set_active(front, false).unwrap();
    let mut recorder = CommandRecorder::new();
    ui.render(&mut recorder).unwrap();
    assert_eq!(recorder.draw_count(), 1);

    // The overlay outlines every active element, drawn or not.
    ui.set_debug_wireframe(true);
    let mut recorder = CommandRecorder::new();
    ui.render(&mut recorder).unwrap();
    assert_eq!(recorder.draw_count(), 1 + 2);
}

#[test]
fn test_text_regenerates_on_resize() {
    let mut ui = UISystem::new(800.0, 600.0);
    let label = ui.create_element(UIText::new("hello"), None).unwrap();
    ui.set_size(label, Vec2::new(200.0, 20.0)).unwrap();

    let text = ui.get(label).unwrap().widget().as_text().unwrap();
    assert_eq!(text.generated().glyph_count(), 5);
    assert_eq!(text.generated().lines.len(), 1);

    // 16px lines at half-height advance: 3 glyphs fit in 24px.
    ui.set_size(label, Vec2::new(24.0, 40.0)).unwrap();
    let text = ui.get(label).unwrap().widget().as_text().unwrap();
    assert_eq!(text.generated().lines.len(), 2);

    ui.set_text(label, "hi").unwrap();
    let text = ui.get(label).unwrap().widget().as_text().unwrap();
    assert_eq!(text.generated().glyph_count(), 2);
    assert!(ui.get(label).unwrap().is_passive());
}
