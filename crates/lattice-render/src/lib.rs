// crates/lattice-render/src/lib.rs

use glam::{Vec2, Vec4};
use lattice_core::{NodeId, Sides};

pub mod events;
pub mod frame;
pub mod hit;
pub mod paint;
pub mod recorder;

pub use events::*;
pub use frame::*;
pub use hit::*;
pub use paint::*;
pub use recorder::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render operation failed: {0}")]
    RenderFailed(String),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Drawing operations produced from laid-out widgets, in root coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    DrawRect {
        node: NodeId,
        /// Border box origin.
        position: Vec2,
        size: Vec2,
        color: Vec4,
        border_width: Sides<f32>,
        border_color: Vec4,
    },
    DrawImage {
        node: NodeId,
        /// Content box origin.
        position: Vec2,
        size: Vec2,
        source: String,
    },
}

impl RenderCommand {
    pub fn node(&self) -> NodeId {
        match self {
            RenderCommand::DrawRect { node, .. } | RenderCommand::DrawImage { node, .. } => *node,
        }
    }
}

/// A surface that can execute render commands.
pub trait Canvas {
    /// Begin a new frame
    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<()>;

    /// Execute a batch of render commands in order
    fn execute_commands(&mut self, commands: &[RenderCommand]) -> RenderResult<()>;

    /// End the current frame and present it
    fn end_frame(&mut self) -> RenderResult<()>;

    /// Handle window resize
    fn resize(&mut self, new_size: Vec2) -> RenderResult<()>;

    /// Get current viewport size
    fn viewport_size(&self) -> Vec2;
}
