//! Recorded render commands
//!
//! [`CommandRecorder`] is a [`UIRenderBackend`] that stores what it is asked
//! to do. Headless hosts and tests use it to inspect a frame.

use super::vertex::Topology;
use crate::ui::backend::{ElementTransform, Material, RenderError, UIRenderBackend};
use crate::ui::rendering::Mesh;

/// One backend call
#[derive(Debug, Clone, PartialEq)]
pub enum UIRenderCommand {
    /// `set_transform` call
    SetTransform(ElementTransform),
    /// `set_material` call
    SetMaterial(Material),
    /// `draw` call
    Draw {
        /// Vertices in the mesh
        vertex_count: usize,
        /// Indices drawn
        index_count: usize,
        /// Primitive assembly
        topology: Topology,
    },
}

/// Backend that records every call
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<UIRenderCommand>,
}

impl CommandRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[UIRenderCommand] {
        &self.commands
    }

    /// Number of draw calls recorded
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, UIRenderCommand::Draw { .. }))
            .count()
    }

    /// Materials in the order they were set
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.commands.iter().filter_map(|command| match command {
            UIRenderCommand::SetMaterial(material) => Some(material),
            _ => None,
        })
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take(&mut self) -> Vec<UIRenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl UIRenderBackend for CommandRecorder {
    fn set_transform(&mut self, transform: &ElementTransform) -> Result<(), RenderError> {
        self.commands.push(UIRenderCommand::SetTransform(*transform));
        Ok(())
    }

    fn set_material(&mut self, material: &Material) -> Result<(), RenderError> {
        self.commands.push(UIRenderCommand::SetMaterial(*material));
        Ok(())
    }

    fn draw(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        self.commands.push(UIRenderCommand::Draw {
            vertex_count: mesh.vertices.len(),
            index_count: mesh.index_count(),
            topology: mesh.topology,
        });
        Ok(())
    }
}
