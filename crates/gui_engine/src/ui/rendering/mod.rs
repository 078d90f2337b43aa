//! UI rendering module
//!
//! Backend-agnostic rendering data: meshes produced by widgets and a
//! recording backend for headless use.

pub mod commands;
pub mod vertex;

pub use commands::{CommandRecorder, UIRenderCommand};
pub use vertex::{Mesh, Topology, UIVertex};
