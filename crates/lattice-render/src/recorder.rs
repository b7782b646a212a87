// crates/lattice-render/src/recorder.rs

use crate::{Canvas, RenderCommand, RenderError, RenderResult};
use glam::{Vec2, Vec4};

/// One finished frame as seen by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub clear_color: Vec4,
    pub commands: Vec<RenderCommand>,
}

/// Canvas that keeps every command instead of drawing it. Used by the debug
/// CLI and tests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    viewport: Vec2,
    current: Option<RecordedFrame>,
    frames: Vec<RecordedFrame>,
}

impl RecordingCanvas {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            current: None,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl Canvas for RecordingCanvas {
    fn begin_frame(&mut self, clear_color: Vec4) -> RenderResult<()> {
        if self.current.is_some() {
            return Err(RenderError::RenderFailed(
                "begin_frame called twice without end_frame".to_string(),
            ));
        }
        self.current = Some(RecordedFrame {
            clear_color,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn execute_commands(&mut self, commands: &[RenderCommand]) -> RenderResult<()> {
        let frame = self
            .current
            .as_mut()
            .ok_or_else(|| RenderError::RenderFailed("no frame in progress".to_string()))?;
        frame.commands.extend_from_slice(commands);
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        let frame = self
            .current
            .take()
            .ok_or_else(|| RenderError::RenderFailed("no frame in progress".to_string()))?;
        self.frames.push(frame);
        Ok(())
    }

    fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        if new_size.x < 0.0 || new_size.y < 0.0 {
            return Err(RenderError::UnsupportedOperation(format!(
                "negative viewport {:?}",
                new_size
            )));
        }
        self.viewport = new_size;
        Ok(())
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}
