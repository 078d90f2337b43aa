//! Headless UI demo
//!
//! Builds a small menu, plays a scripted pointer and keyboard session through
//! it and logs what the UI reports. Rendering goes to a command recorder so
//! the demo runs without a window.
//!
//! Usage: `ui_demo [config.toml|config.ron]`

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use gui_engine::foundation::logging;
use gui_engine::prelude::*;
use gui_engine::ui::{Align, RenderError, UIText};

const DEFAULT_CONFIG: &str = "ui_demo.toml";
const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("ui: {0}")]
    Ui(#[from] UIError),

    #[error("render: {0}")]
    Render(RenderError),
}

/// Logs every event it sees and lets other handlers run
struct EventLogger;

impl EventHandler for EventLogger {
    fn on_event(&mut self, event: &Event) -> bool {
        log::info!("{:?} {:?} at {:.3}s", event.event_type, event.element(), event.timestamp);
        false
    }
}

struct Menu {
    panel: ElementId,
    buttons: Vec<ElementId>,
}

fn load_config() -> Result<UIConfig, DemoError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = if Path::new(&path).exists() {
        UIConfig::load_from_file(&path)?
    } else {
        UIConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn build_menu(ui: &mut UISystem) -> Result<Menu, DemoError> {
    let panel = ui.create_element(UIImage::new().with_color(Vec4::new(0.1, 0.1, 0.15, 0.9)), None)?;
    ui.set_anchors(panel, Vec2::new(0.3, 0.2), Vec2::new(0.7, 0.8))?;
    ui.set_offsets(panel, Vec2::zeros(), Vec2::zeros())?;

    let title = ui.create_element(
        UIText::new("Main Menu").with_style(TextStyle { vertical: Align::Start, ..TextStyle::default() }),
        Some(panel),
    )?;
    ui.set_anchors(title, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.2))?;
    ui.set_offsets(title, Vec2::new(8.0, 8.0), Vec2::new(-8.0, 0.0))?;

    let mut buttons = Vec::new();
    for (row, label) in ["Play", "Options", "Quit"].into_iter().enumerate() {
        let button = ui.create_button(Some(panel))?;
        let top = 0.3 + 0.2 * row as f32;
        ui.set_anchors(button, Vec2::new(0.1, top), Vec2::new(0.9, top + 0.15))?;
        ui.set_offsets(button, Vec2::zeros(), Vec2::zeros())?;

        let caption = ui.create_element(UIText::new(label), Some(button))?;
        ui.set_anchors(caption, Vec2::zeros(), Vec2::new(1.0, 1.0))?;
        ui.set_offsets(caption, Vec2::zeros(), Vec2::zeros())?;
        buttons.push(button);
    }
    Ok(Menu { panel, buttons })
}

fn centre_of(ui: &UISystem, id: ElementId) -> Result<(f32, f32), DemoError> {
    let node = ui.get(id).ok_or(UIError::UnknownElement(id))?;
    let centre = gui_engine::foundation::math::affine::transform_point(node.local_to_world(), Vec2::zeros());
    Ok((centre.x, centre.y))
}

fn render_frame(ui: &mut UISystem, recorder: &mut CommandRecorder) -> Result<(), DemoError> {
    ui.update(FRAME_TIME);
    ui.dispatch_events();
    ui.render(recorder).map_err(DemoError::Render)?;
    log::debug!("Frame: {} draws", recorder.draw_count());
    recorder.take();
    Ok(())
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    if let Err(e) = logging::init_with_level(&config.log_level) {
        eprintln!("Logger already initialised: {e}");
    }
    log::info!("Starting UI demo at {}x{}", config.window.width, config.window.height);

    let mut ui = UISystem::from_config(&config);
    for event_type in [EventType::ButtonClicked, EventType::FocusChanged, EventType::WindowResized] {
        ui.events_mut().register_handler(event_type, Box::new(EventLogger));
    }

    let menu = build_menu(&mut ui)?;
    let quit_requested = Rc::new(Cell::new(false));
    let quit = Rc::clone(&quit_requested);
    ui.button_mut(menu.buttons[2])?.clicked.subscribe(move |_| quit.set(true));
    ui.set_button_interactable(menu.buttons[1], false)?;

    let mut recorder = CommandRecorder::new();
    render_frame(&mut ui, &mut recorder)?;

    // Sweep over every button, then click Play with the mouse.
    for &button in &menu.buttons {
        let (x, y) = centre_of(&ui, button)?;
        ui.mouse_move(x, y);
        render_frame(&mut ui, &mut recorder)?;
    }
    let (x, y) = centre_of(&ui, menu.buttons[0])?;
    ui.mouse_move(x, y);
    ui.mouse_button_down(MouseButton::Left);
    render_frame(&mut ui, &mut recorder)?;
    ui.mouse_button_up(MouseButton::Left);
    render_frame(&mut ui, &mut recorder)?;

    // Layout follows the window.
    ui.set_window_size(1024.0, 768.0);
    let panel_size = ui.get(menu.panel).map(UIElement::size).unwrap_or_default();
    log::info!("Panel is now {}x{}", panel_size.x, panel_size.y);

    // Quit: focus with the mouse, confirm with the keyboard.
    let (x, y) = centre_of(&ui, menu.buttons[2])?;
    ui.mouse_move(x, y);
    ui.mouse_button_down(MouseButton::Left);
    ui.mouse_button_up(MouseButton::Left);
    ui.key_pressed(KeyCode::Enter);
    render_frame(&mut ui, &mut recorder)?;

    ui.mouse_out();
    render_frame(&mut ui, &mut recorder)?;
    log::info!("Session finished, quit requested: {}", quit_requested.get());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("UI demo failed: {e}");
        eprintln!("ui_demo: {e}");
        std::process::exit(1);
    }
}
