// crates/lattice-core/src/events.rs
use crate::{LatticeError, NodeId, Result, WidgetTree};
use glam::Vec2;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseDown,
    MouseUp,
    MouseMove,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    Mouse { position: Vec2, button: u8 },
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Widget the event was dispatched to.
    pub target: NodeId,
    pub data: EventData,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            data: EventData::None,
        }
    }

    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Receives the tree, the widget currently handling the event, and the event.
pub type EventHandler = Box<dyn FnMut(&mut WidgetTree, NodeId, &Event) -> Propagation>;

/// Finalization callback, run once before the widget's slot is released.
pub type DestroyHook = Box<dyn FnOnce(&mut WidgetTree, NodeId)>;

pub(crate) struct HandlerSlot {
    kind: EventKind,
    // Empty while the handler is running.
    handler: Option<EventHandler>,
}

impl WidgetTree {
    pub fn add_event_handler(
        &mut self,
        id: NodeId,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<()> {
        let node = self.get_mut(id).ok_or(LatticeError::NodeNotFound(id))?;
        node.handlers.push(HandlerSlot {
            kind,
            handler: Some(handler),
        });
        Ok(())
    }

    /// Delivers `event` to its target and then to each ancestor.
    ///
    /// The bubbling path is fixed before the first handler runs. Widgets on
    /// it that get trashed along the way are skipped, but their memory stays
    /// valid until the next [`WidgetTree::trash_clear`]. Returns the number
    /// of handlers invoked.
    pub fn dispatch_event(&mut self, event: &Event) -> usize {
        let mut path = Vec::new();
        let mut cursor = Some(event.target).filter(|id| self.is_live(*id));
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.parent(id);
        }

        self.traverse(|tree| {
            let mut invoked = 0;
            for id in path {
                if !tree.is_live(id) {
                    trace!("Skipping dead widget {} while bubbling {:?}", id, event.kind);
                    continue;
                }
                let mut stop = false;
                let count = tree.get(id).map_or(0, |node| node.handlers.len());
                for index in 0..count {
                    let Some(mut handler) = tree.take_handler(id, index, event.kind) else {
                        continue;
                    };
                    invoked += 1;
                    if handler(tree, id, event) == Propagation::Stop {
                        stop = true;
                    }
                    tree.restore_handler(id, index, handler);
                }
                if stop {
                    break;
                }
            }
            invoked
        })
    }

    fn take_handler(&mut self, id: NodeId, index: usize, kind: EventKind) -> Option<EventHandler> {
        let slot = self.get_mut(id)?.handlers.get_mut(index)?;
        if slot.kind != kind {
            return None;
        }
        slot.handler.take()
    }

    fn restore_handler(&mut self, id: NodeId, index: usize, handler: EventHandler) {
        // Trashed widgets still own their slot until finalization.
        if let Some(slot) = self
            .node_any_mut(id)
            .and_then(|node| node.handlers.get_mut(index))
        {
            slot.handler = Some(handler);
        }
    }
}
