// crates/lattice-layout/src/lib.rs

use glam::Vec2;
use lattice_core::{ContainingBlock, NodeId, WidgetTree};

pub mod constraints;
pub mod engine;
pub mod flex;
pub mod flow;
pub mod resizer;

pub use constraints::*;
pub use engine::*;
pub use flex::*;
pub use flow::*;
pub use resizer::*;

/// Counters from one reflow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReflowStats {
    /// Widgets whose boxes were recomputed.
    pub resolved: usize,
    /// Clean subtrees left untouched.
    pub skipped: usize,
}

pub trait LayoutEngine {
    /// Lays out `node` and its dirty descendants against `block`.
    fn reflow(&mut self, tree: &mut WidgetTree, node: NodeId, block: ContainingBlock)
        -> ReflowStats;

    /// Lays out the whole tree against a viewport of `viewport` pixels.
    fn reflow_root(&mut self, tree: &mut WidgetTree, viewport: Vec2) -> ReflowStats {
        let root = tree.root();
        self.reflow(tree, root, ContainingBlock::viewport(viewport))
    }
}
