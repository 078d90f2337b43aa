//! Image widget - colored or textured rectangles with optional nine-slice

use crate::foundation::math::{Vec2, Vec4};
use crate::ui::backend::{Filtering, Material, TextureHandle};
use crate::ui::rendering::{Mesh, Topology, UIVertex};

/// Border widths in texels that stay unstretched when an image is resized
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NineSlice {
    /// Top border
    pub top: f32,
    /// Bottom border
    pub bottom: f32,
    /// Left border
    pub left: f32,
    /// Right border
    pub right: f32,
}

impl NineSlice {
    /// Create splits, clamping negative values to zero
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top: top.max(0.0),
            bottom: bottom.max(0.0),
            left: left.max(0.0),
            right: right.max(0.0),
        }
    }

    /// Same border on every side
    pub fn uniform(border: f32) -> Self {
        Self::new(border, border, border, border)
    }

    /// True if any border is set
    pub fn is_sliced(&self) -> bool {
        self.top > 0.0 || self.bottom > 0.0 || self.left > 0.0 || self.right > 0.0
    }
}

/// Rectangle filled with a color, optionally textured
#[derive(Debug, Clone)]
pub struct UIImage {
    /// Tint color
    pub color: Vec4,
    texture: Option<TextureHandle>,
    filtering: Filtering,
    splits: NineSlice,
    size: Vec2,
    mesh: Mesh,
}

impl Default for UIImage {
    fn default() -> Self {
        Self::new()
    }
}

impl UIImage {
    /// White untextured image
    pub fn new() -> Self {
        let size = Vec2::new(10.0, 10.0);
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            texture: None,
            filtering: Filtering::Linear,
            splits: NineSlice::default(),
            size,
            mesh: Mesh::quad(size.x, size.y),
        }
    }

    /// Set tint color (builder)
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Set texture (builder)
    pub fn with_texture(mut self, texture: TextureHandle, filtering: Filtering) -> Self {
        self.set_texture(Some(texture), filtering);
        self
    }

    /// Set nine-slice borders (builder)
    pub fn with_splits(mut self, splits: NineSlice) -> Self {
        self.set_splits(splits);
        self
    }

    /// Current texture
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// Current sampling mode
    pub fn filtering(&self) -> Filtering {
        self.filtering
    }

    /// Current nine-slice borders
    pub fn splits(&self) -> NineSlice {
        self.splits
    }

    /// Mesh for the current size, texture and borders
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replace the texture. The mesh is rebuilt only if the texture changed.
    pub fn set_texture(&mut self, texture: Option<TextureHandle>, filtering: Filtering) {
        let changed = self.texture != texture;
        self.texture = texture;
        self.filtering = filtering;
        if changed {
            self.regenerate();
        }
    }

    /// Replace the nine-slice borders (negative values clamp to zero)
    pub fn set_splits(&mut self, splits: NineSlice) {
        self.splits = NineSlice::new(splits.top, splits.bottom, splits.left, splits.right);
        self.regenerate();
    }

    /// Material for drawing
    pub fn material(&self) -> Material {
        Material {
            color: self.color,
            texture: self.texture,
            filtering: self.filtering,
        }
    }

    pub(crate) fn resize(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.regenerate();
        }
    }

    fn regenerate(&mut self) {
        self.mesh = match self.texture {
            Some(texture) if self.splits.is_sliced() => sliced_mesh(self.size, &self.splits, texture),
            _ => Mesh::quad(self.size.x, self.size.y),
        };
    }
}

/// 4x4 vertex grid, nine quads
fn sliced_mesh(size: Vec2, splits: &NineSlice, texture: TextureHandle) -> Mesh {
    let tex_w = texture.width.max(1) as f32;
    let tex_h = texture.height.max(1) as f32;

    let xs = [0.0, splits.left, size.x - splits.right, size.x];
    let ys = [0.0, splits.top, size.y - splits.bottom, size.y];
    let us = [0.0, splits.left / tex_w, 1.0 - splits.right / tex_w, 1.0];
    let vs = [0.0, splits.top / tex_h, 1.0 - splits.bottom / tex_h, 1.0];

    let mut vertices = Vec::with_capacity(16);
    for row in 0..4 {
        for col in 0..4 {
            vertices.push(UIVertex::new([xs[col], ys[row]], [us[col], vs[row]]));
        }
    }

    let mut indices = Vec::with_capacity(54);
    for row in 0..3u32 {
        for col in 0..3u32 {
            let top_left = row * 4 + col;
            let bottom_left = top_left + 4;
            indices.extend_from_slice(&[
                top_left,
                top_left + 1,
                bottom_left + 1,
                top_left,
                bottom_left + 1,
                bottom_left,
            ]);
        }
    }

    Mesh { vertices, indices, topology: Topology::TriangleList }
}
