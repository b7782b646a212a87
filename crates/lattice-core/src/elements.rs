// crates/lattice-core/src/elements.rs
use crate::events::HandlerSlot;
use crate::{BoxModel, ContainingBlock, DestroyHook, StyleTable};
use bitflags::bitflags;
use glam::Vec2;
use std::fmt;

/// Generational handle to a widget slot in a [`crate::WidgetTree`].
///
/// A handle outlives the widget it names; once the slot is reused the
/// generation differs and every lookup through the old handle fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WidgetKind {
    Root = 0x00,
    Container = 0x01,
    Image = 0x03,
    Button = 0x10,
    Custom(u8),
}

impl From<u8> for WidgetKind {
    fn from(value: u8) -> Self {
        match value {
            0x00 => WidgetKind::Root,
            0x01 => WidgetKind::Container,
            0x03 => WidgetKind::Image,
            0x10 => WidgetKind::Button,
            other => WidgetKind::Custom(other),
        }
    }
}

impl WidgetKind {
    pub fn from_name(name: &str) -> Option<WidgetKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "root" => Some(WidgetKind::Root),
            "container" | "div" | "widget" => Some(WidgetKind::Container),
            "image" | "img" => Some(WidgetKind::Image),
            "button" => Some(WidgetKind::Button),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            WidgetKind::Root => "root".to_string(),
            WidgetKind::Container => "container".to_string(),
            WidgetKind::Image => "image".to_string(),
            WidgetKind::Button => "button".to_string(),
            WidgetKind::Custom(tag) => format!("custom-{:#04x}", tag),
        }
    }

    /// Sizing strategy used when the style leaves a dimension unset.
    pub fn default_resizer(&self) -> Resizer {
        match self {
            WidgetKind::Root => Resizer::Stretch,
            WidgetKind::Image => Resizer::Replaced,
            _ => Resizer::ContentFit,
        }
    }
}

/// How a widget derives its size along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resizer {
    /// The style gives an explicit length or percentage.
    Fixed,
    /// Shrink-wrap the children's accumulated margin boxes.
    #[default]
    ContentFit,
    /// Fill whatever the containing block has left.
    Stretch,
    /// Size of an external resource such as a bitmap.
    Replaced,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirtyFlags: u8 {
        /// The widget's own box must be recomputed.
        const REFLOW = 1 << 0;
        /// Some descendant needs reflow.
        const CHILD_REFLOW = 1 << 1;
        const REPAINT = 1 << 2;
    }
}

impl DirtyFlags {
    pub fn needs_layout(&self) -> bool {
        self.intersects(DirtyFlags::REFLOW | DirtyFlags::CHILD_REFLOW)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutState {
    Clean,
    #[default]
    DirtyLayout,
    ResolvingWidth,
    ResolvingHeight,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Live,
    /// Queued for finalization; invisible to lookups.
    Trashed,
}

pub struct WidgetNode {
    pub id: NodeId,
    pub name: Option<String>,
    pub kind: WidgetKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) style: StyleTable,
    pub(crate) state: NodeState,

    // Written by the reflow engine
    pub layout: BoxModel,
    pub intrinsic_size: Option<Vec2>,
    pub dirty: DirtyFlags,
    pub resizer: Resizer,
    pub layout_state: LayoutState,
    pub cached_block: Option<ContainingBlock>,

    pub resource: Option<String>,
    pub(crate) handlers: Vec<HandlerSlot>,
    pub(crate) destroy_hook: Option<DestroyHook>,
}

impl WidgetNode {
    pub(crate) fn new(id: NodeId, kind: WidgetKind) -> Self {
        Self {
            id,
            name: None,
            kind,
            parent: None,
            children: Vec::new(),
            style: StyleTable::new(),
            state: NodeState::Live,
            layout: BoxModel::default(),
            intrinsic_size: None,
            dirty: DirtyFlags::REFLOW | DirtyFlags::REPAINT,
            resizer: kind.default_resizer(),
            layout_state: LayoutState::DirtyLayout,
            cached_block: None,
            resource: None,
            handlers: Vec::new(),
            destroy_hook: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn style(&self) -> &StyleTable {
        &self.style
    }

    pub fn is_live(&self) -> bool {
        self.state == NodeState::Live
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} \"{}\"", self.kind.name(), name),
            None => self.kind.name(),
        }
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("state", &self.state)
            .field("layout", &self.layout)
            .field("dirty", &self.dirty)
            .field("layout_state", &self.layout_state)
            .field("handlers", &self.handlers.len())
            .field("destroy_hook", &self.destroy_hook.is_some())
            .finish_non_exhaustive()
    }
}
