//! # GUI Engine
//!
//! Retained-mode UI layout and input routing for game engines.
//!
//! ## Features
//!
//! - **Anchor layout**: fixed or stretched placement against the parent
//! - **Pointer routing**: topmost-wins hit testing with mouse-over/out cascades
//! - **Widgets**: images (nine-slice), text, five-state buttons with fades
//! - **Backend agnostic**: rendering goes through a three-call backend trait
//!
//! ## Quick Start
//!
//! ```rust
//! use gui_engine::prelude::*;
//!
//! let mut ui = UISystem::new(800.0, 600.0);
//! let button = ui.create_button(None).unwrap();
//! ui.set_size(button, Vec2::new(200.0, 50.0)).unwrap();
//!
//! ui.mouse_move(400.0, 300.0);
//! ui.mouse_button_down(MouseButton::Left);
//! ui.mouse_button_up(MouseButton::Left);
//!
//! let mut recorder = CommandRecorder::new();
//! ui.render(&mut recorder).unwrap();
//! assert_eq!(recorder.draw_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod ui;

/// Common imports for UI users
pub mod prelude {
    pub use crate::{
        core::{ButtonStyle, Config, ConfigError, UIConfig, WindowConfig},
        events::{Event, EventArg, EventHandler, EventSystem, EventType, Signal},
        foundation::math::{Mat4, Vec2, Vec4},
        ui::{
            Anchors, ButtonState, CommandRecorder, ElementId, KeyCode, MouseButton, Placement, PlacementMode,
            TextStyle, UIButton, UIElement, UIError, UIImage, UIRenderBackend, UIResult, UISystem, UIText, Widget,
        },
    };
}
