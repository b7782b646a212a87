// crates/lattice-render/src/frame.rs
//! One frame: reflow, paint, then finalize trashed widgets.
//!
//! `trash_clear` runs only after both traversals have returned, which is
//! the single point where widget memory is actually released. It runs even
//! when the canvas fails.

use crate::{build_commands, hit_test, Canvas, InputEvent, RenderCommand, RenderResult};
use glam::{Vec2, Vec4};
use lattice_core::{Event, EventData, EventKind, WidgetTree};
use lattice_layout::{LayoutEngine, ReflowEngine, ReflowStats};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub reflow: ReflowStats,
    pub commands: usize,
    /// Trash queue entries finalized at the end of the frame.
    pub finalized: usize,
}

pub struct FrameDriver<C: Canvas> {
    canvas: C,
    engine: ReflowEngine,
    clear_color: Vec4,
    debug: bool,
}

impl<C: Canvas> FrameDriver<C> {
    pub fn new(canvas: C, engine: ReflowEngine) -> Self {
        info!("Frame driver ready, viewport {:?}", canvas.viewport_size());
        Self {
            canvas,
            engine,
            clear_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            debug: false,
        }
    }

    pub fn with_clear_color(mut self, clear_color: Vec4) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn render_frame(&mut self, tree: &mut WidgetTree) -> RenderResult<FrameStats> {
        let viewport = self.canvas.viewport_size();
        let reflow = self.engine.reflow_root(tree, viewport);
        let commands = build_commands(tree, self.engine.metrics());

        let presented = self.present(&commands);
        let finalized = tree.trash_clear();
        if let Err(err) = presented {
            warn!("Frame failed after finalizing {} widgets: {}", finalized, err);
            return Err(err);
        }

        let stats = FrameStats {
            reflow,
            commands: commands.len(),
            finalized,
        };
        if self.debug {
            debug!("Frame done: {:?}", stats);
        }
        Ok(stats)
    }

    fn present(&mut self, commands: &[RenderCommand]) -> RenderResult<()> {
        self.canvas.begin_frame(self.clear_color)?;
        self.canvas.execute_commands(commands)?;
        self.canvas.end_frame()
    }

    /// Routes platform input into the tree. Returns the number of event
    /// handlers invoked.
    ///
    /// A press dispatches `MouseDown` and then `Click` to the widget under
    /// the pointer.
    pub fn handle_input(&mut self, tree: &mut WidgetTree, input: &InputEvent) -> RenderResult<usize> {
        let (kinds, position, button) = match input {
            InputEvent::MousePress { position, button } => {
                (&[EventKind::MouseDown, EventKind::Click][..], *position, button.code())
            }
            InputEvent::MouseRelease { position, button } => (&[EventKind::MouseUp][..], *position, button.code()),
            InputEvent::MouseMove { position } => (&[EventKind::MouseMove][..], *position, 0),
            InputEvent::Resize { size } => {
                self.resize(*size)?;
                return Ok(0);
            }
            InputEvent::Scroll { .. } => return Ok(0),
        };

        let Some(target) = hit_test(tree, position, self.engine.metrics()) else {
            return Ok(0);
        };
        let mut invoked = 0;
        for &kind in kinds {
            // A MouseDown handler may have removed the target.
            if !tree.is_live(target) {
                break;
            }
            let event = Event::new(kind, target).with_data(EventData::Mouse { position, button });
            invoked += tree.dispatch_event(&event);
        }
        Ok(invoked)
    }

    pub fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        debug!("Viewport resized to {:?}", new_size);
        self.canvas.resize(new_size)
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn engine(&self) -> &ReflowEngine {
        &self.engine
    }
}
