// crates/lattice-core/src/tree.rs
//! The widget tree: an arena of generational slots.
//!
//! Parents own their children through the `children` list; the `parent`
//! handle is only used to walk upwards (dirty propagation, absolute
//! coordinates) and never keeps anything alive.

use crate::{
    BoxModel, DestroyHook, DirtyFlags, LatticeError, LayoutState, NodeId, NodeState, PropertyId,
    Result, StyleError, StyleValue, TrashQueue, WidgetKind, WidgetNode,
};
use glam::Vec2;
use tracing::trace;

struct Slot {
    generation: u32,
    node: Option<WidgetNode>,
    next_free: Option<u32>,
}

pub struct WidgetTree {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    len: usize,
    root: NodeId,
    pub(crate) trash: TrashQueue,
    traversal_depth: usize,
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("root", &self.root)
            .field("len", &self.len)
            .field("trash", &self.trash.len())
            .field("traversal_depth", &self.traversal_depth)
            .finish()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Creates a tree holding only the root widget.
    pub fn new() -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
            root: NodeId { index: 0, generation: 0 },
            trash: TrashQueue::default(),
            traversal_depth: 0,
        };
        tree.root = tree.create(WidgetKind::Root);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of allocated slots, trashed-but-not-finalized nodes included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates an unattached widget.
    pub fn create(&mut self, kind: WidgetKind) -> NodeId {
        let id = match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                self.free_head = slot.next_free.take();
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                    next_free: None,
                });
                NodeId { index, generation: 0 }
            }
        };
        self.slots[id.index as usize].node = Some(WidgetNode::new(id, kind));
        self.len += 1;
        trace!("Created {} {}", kind.name(), id);
        id
    }

    /// Frees a slot and bumps its generation so old handles stop resolving.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<WidgetNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.next_free = self.free_head;
        self.free_head = Some(id.index);
        self.len -= 1;
        Some(node)
    }

    /// Any node still occupying its slot, trashed ones included.
    pub(crate) fn node_any(&self, id: NodeId) -> Option<&WidgetNode> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub(crate) fn node_any_mut(&mut self, id: NodeId) -> Option<&mut WidgetNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn get(&self, id: NodeId) -> Option<&WidgetNode> {
        self.node_any(id).filter(|node| node.state == NodeState::Live)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut WidgetNode> {
        self.node_any_mut(id)
            .filter(|node| node.state == NodeState::Live)
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn live(&self, id: NodeId) -> Result<&WidgetNode> {
        self.get(id).ok_or(LatticeError::NodeNotFound(id))
    }

    fn live_mut(&mut self, id: NodeId) -> Result<&mut WidgetNode> {
        self.get_mut(id).ok_or(LatticeError::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children in document order; empty for dead handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.live(parent)?.children.len();
        // Re-appending to the same parent moves the child to the end.
        let index = if self.parent(child) == Some(parent) {
            index - 1
        } else {
            index
        };
        self.insert(parent, index, child)
    }

    pub fn prepend(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert(parent, 0, child)
    }

    /// Inserts `child` at `index` among `parent`'s children, unlinking it
    /// from its current parent first. `index` is interpreted after that
    /// unlink.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.live(parent)?;
        self.live(child)?;

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(LatticeError::CyclicInsert { parent, child });
            }
            cursor = self.node_any(ancestor).and_then(|node| node.parent);
        }

        let old_parent = self.live(child)?.parent;
        let len_after_unlink = match old_parent {
            Some(old) if old == parent => self.live(parent)?.children.len() - 1,
            _ => self.live(parent)?.children.len(),
        };
        if index > len_after_unlink {
            return Err(LatticeError::InvalidIndex {
                index,
                len: len_after_unlink,
            });
        }

        if let Some(old) = self.unlink(child) {
            if old != parent {
                self.mark_dirty(old, DirtyFlags::REFLOW);
            }
        }
        self.live_mut(parent)?.children.insert(index, child);
        self.live_mut(child)?.parent = Some(parent);
        self.mark_dirty(child, DirtyFlags::REFLOW | DirtyFlags::REPAINT);
        self.mark_dirty(parent, DirtyFlags::REFLOW);
        Ok(())
    }

    /// Removes the parent/child link without destroying anything.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.node_any_mut(id)?.parent.take()?;
        if let Some(parent_node) = self.node_any_mut(parent) {
            parent_node.children.retain(|child| *child != id);
        }
        Some(parent)
    }

    /// Unlinks `id` and hands it to the trash queue.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(LatticeError::RootRemoval);
        }
        self.live(id)?;
        self.trash_add(id);
        Ok(())
    }

    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId> {
        let len = self.live(parent)?.children.len();
        let child = self
            .child_at(parent, index)
            .ok_or(LatticeError::InvalidIndex { index, len })?;
        self.detach(child)?;
        Ok(child)
    }

    /// Trashes every child of `id` and returns how many there were.
    pub fn empty(&mut self, id: NodeId) -> Result<usize> {
        let children = self.live(id)?.children.clone();
        for child in &children {
            self.trash_add(*child);
        }
        Ok(children.len())
    }

    /// Validates and stores a style value, marking the widget dirty.
    pub fn set_style(&mut self, id: NodeId, property: PropertyId, value: StyleValue) -> Result<()> {
        property.validate(&value)?;
        let node = self.live_mut(id)?;
        if node.style.get(property) == value {
            return Ok(());
        }
        node.style.set(property, value);
        self.mark_style_dirty(id, property);
        Ok(())
    }

    /// Parses `text` for the property called `name` and stores it. On any
    /// error the previous value stays in place.
    pub fn set_style_str(&mut self, id: NodeId, name: &str, text: &str) -> Result<()> {
        let property = PropertyId::from_name(name)
            .ok_or_else(|| StyleError::UnknownProperty(name.to_string()))?;
        let value = property.parse_value(text)?;
        self.set_style(id, property, value)
    }

    pub fn style(&self, id: NodeId, property: PropertyId) -> Option<StyleValue> {
        Some(self.get(id)?.style.get(property))
    }

    pub fn clear_style(&mut self, id: NodeId, property: PropertyId) -> Result<Option<StyleValue>> {
        let previous = self.live_mut(id)?.style.remove(property);
        if previous.is_some() {
            self.mark_style_dirty(id, property);
        }
        Ok(previous)
    }

    fn mark_style_dirty(&mut self, id: NodeId, property: PropertyId) {
        let flags = if property.affects_layout() {
            DirtyFlags::REFLOW | DirtyFlags::REPAINT
        } else {
            DirtyFlags::REPAINT
        };
        self.mark_dirty(id, flags);
    }

    /// Sets dirty bits. `REFLOW` also flags every ancestor with
    /// `CHILD_REFLOW` up to the root. Returns false for dead handles.
    pub fn mark_dirty(&mut self, id: NodeId, flags: DirtyFlags) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.dirty |= flags;
        if !flags.contains(DirtyFlags::REFLOW) {
            return true;
        }
        node.layout_state = LayoutState::DirtyLayout;

        let mut cursor = node.parent;
        while let Some(ancestor) = cursor {
            let Some(node) = self.node_any_mut(ancestor) else {
                break;
            };
            node.dirty |= DirtyFlags::CHILD_REFLOW;
            cursor = node.parent;
        }
        true
    }

    pub fn computed_box(&self, id: NodeId) -> Option<BoxModel> {
        Some(self.get(id)?.layout)
    }

    /// The widget's boxes in root coordinates.
    pub fn absolute_box(&self, id: NodeId) -> Option<BoxModel> {
        let node = self.get(id)?;
        let mut offset = Vec2::ZERO;
        let mut cursor = node.parent;
        while let Some(ancestor) = cursor {
            let ancestor = self.get(ancestor)?;
            offset += ancestor.layout.content.position();
            cursor = ancestor.parent;
        }
        Some(node.layout.translate(offset))
    }

    /// Points a replaced widget at a resource key.
    pub fn set_resource(&mut self, id: NodeId, key: impl Into<String>) -> Result<()> {
        let node = self.live_mut(id)?;
        node.resource = Some(key.into());
        node.intrinsic_size = None;
        self.mark_dirty(id, DirtyFlags::REFLOW | DirtyFlags::REPAINT);
        Ok(())
    }

    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        self.live_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Runs once when the widget is finalized by [`WidgetTree::trash_clear`].
    pub fn set_destroy_hook(&mut self, id: NodeId, hook: DestroyHook) -> Result<()> {
        self.live_mut(id)?.destroy_hook = Some(hook);
        Ok(())
    }

    /// All live descendants of `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !self.is_live(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Runs `f` with the tree flagged as mid-traversal. While flagged,
    /// [`WidgetTree::trash_clear`] refuses to free anything.
    pub fn traverse<R>(&mut self, f: impl FnOnce(&mut WidgetTree) -> R) -> R {
        self.traversal_depth += 1;
        let result = f(self);
        self.traversal_depth -= 1;
        result
    }

    pub fn is_traversing(&self) -> bool {
        self.traversal_depth > 0
    }
}
