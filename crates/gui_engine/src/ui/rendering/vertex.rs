//! Vertex and mesh types for UI rendering

use bytemuck::{Pod, Zeroable};

/// Vertex in element-local pixels (0..size), pivot not yet subtracted
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UIVertex {
    /// Position in pixels from the element's top-left corner
    pub position: [f32; 2],
    /// Vertex color, multiplied with the material color
    pub color: [f32; 4],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl UIVertex {
    /// White vertex at `position` with texture coordinate `uv`
    pub fn new(position: [f32; 2], uv: [f32; 2]) -> Self {
        Self { position, color: [1.0; 4], uv }
    }
}

/// How indices are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form a triangle
    TriangleList,
    /// Every two indices form a line segment
    LineList,
}

/// Indexed geometry uploaded by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<UIVertex>,
    /// Index data
    pub indices: Vec<u32>,
    /// Primitive assembly
    pub topology: Topology,
}

impl Mesh {
    /// Empty triangle list
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology: Topology::TriangleList,
        }
    }

    /// Two triangles covering `0..size`
    pub fn quad(width: f32, height: f32) -> Self {
        Self {
            vertices: vec![
                UIVertex::new([0.0, 0.0], [0.0, 0.0]),
                UIVertex::new([width, 0.0], [1.0, 0.0]),
                UIVertex::new([0.0, height], [0.0, 1.0]),
                UIVertex::new([width, height], [1.0, 1.0]),
            ],
            indices: vec![0, 1, 3, 0, 3, 2],
            topology: Topology::TriangleList,
        }
    }

    /// Closed rectangle outline covering `0..size`
    pub fn outline(width: f32, height: f32) -> Self {
        let mut mesh = Self::quad(width, height);
        mesh.indices = vec![0, 1, 1, 3, 3, 2, 2, 0];
        mesh.topology = Topology::LineList;
        mesh
    }

    /// Number of indices to draw
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Raw vertex bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<UIVertex>(), 32);
        let mesh = Mesh::quad(4.0, 2.0);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 32);
    }

    #[test]
    fn test_outline_is_line_list() {
        let mesh = Mesh::outline(10.0, 10.0);
        assert_eq!(mesh.topology, Topology::LineList);
        assert_eq!(mesh.index_count(), 8);
    }
}
