//! UI Render Backend Trait
//!
//! Defines the interface between the UI system and rendering backends.
//! Keeps the UI system independent of any graphics API: for every drawable
//! element the system sets a transform, sets a material, then draws a mesh.

use crate::foundation::math::{Mat4, Vec2, Vec4};
use crate::ui::rendering::Mesh;

/// Error type returned by backends
pub type RenderError = Box<dyn std::error::Error>;

/// Opaque reference to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Backend-assigned identifier
    pub id: u64,
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
}

impl TextureHandle {
    /// Create a handle
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Texture sampling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filtering {
    /// Nearest texel
    Point,
    /// Bilinear
    #[default]
    Linear,
}

/// Per-draw transform data
///
/// Mesh vertices span `0..size`; the backend subtracts `pivot * size`
/// before applying `local_to_world` and then `world_to_screen`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementTransform {
    /// Element local space to window pixels
    pub local_to_world: Mat4,
    /// Window pixels to clip space
    pub world_to_screen: Mat4,
    /// Element pivot
    pub pivot: Vec2,
    /// Element size
    pub size: Vec2,
}

/// Per-draw material data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Tint multiplied with vertex colors
    pub color: Vec4,
    /// Optional texture
    pub texture: Option<TextureHandle>,
    /// Sampler for `texture`
    pub filtering: Filtering,
}

impl Material {
    /// Untextured material
    pub fn solid(color: Vec4) -> Self {
        Self { color, texture: None, filtering: Filtering::Linear }
    }
}

/// Backend-agnostic UI rendering interface
pub trait UIRenderBackend {
    /// Upload the transform used by subsequent draws
    fn set_transform(&mut self, transform: &ElementTransform) -> Result<(), RenderError>;

    /// Upload the material used by subsequent draws
    fn set_material(&mut self, material: &Material) -> Result<(), RenderError>;

    /// Draw a mesh with the current transform and material
    fn draw(&mut self, mesh: &Mesh) -> Result<(), RenderError>;
}
