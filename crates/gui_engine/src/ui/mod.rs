//! UI System Module
//!
//! Retained-mode UI tree with anchor based layout and pointer routing,
//! separated from the rendering backend.
//!
//! Architecture:
//! - UISystem: owns the element arena, root lists, window and pointer state
//! - geometry/layout: placement description and top-down relayout
//! - eligibility: active / non-passive child lists
//! - input/: hit testing, hover cascade and input broadcast
//! - widgets/: Image, Text and Button payloads
//! - rendering/: meshes and a recording backend

pub mod backend;
pub mod element;
pub mod error;
pub mod geometry;
pub mod input;
pub mod rendering;
pub mod system;
pub mod widgets;

mod eligibility;
mod layout;

#[cfg(test)]
mod tests;

slotmap::new_key_type! {
    /// Handle to an element in a [`UISystem`]
    pub struct ElementId;
}

pub use backend::{ElementTransform, Filtering, Material, RenderError, TextureHandle, UIRenderBackend};
pub use element::{ChildLists, UIElement};
pub use error::{UIError, UIResult};
pub use geometry::{Anchors, Placement, PlacementMode};
pub use input::{KeyCode, MouseButton, MouseButtons, UIInput};
pub use rendering::{CommandRecorder, Mesh, Topology, UIRenderCommand, UIVertex};
pub use system::UISystem;
pub use widgets::{
    Align, ButtonState, FixedAdvanceLayout, GeneratedText, NineSlice, ResponseType, StateColors, StateSprites,
    TextLayouter, TextStyle, UIButton, UIImage, UIText, Widget,
};

// Re-export events
pub use crate::events::EventSystem;
