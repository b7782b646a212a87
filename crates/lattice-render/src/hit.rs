// crates/lattice-render/src/hit.rs

use glam::Vec2;
use lattice_core::{ComputedStyle, Display, Metrics, NodeId, WidgetTree};

/// Finds the topmost widget whose border box contains `point`.
///
/// Later widgets in document order paint over earlier ones, so the last
/// match wins. Hidden widgets are not hit but their children can be.
pub fn hit_test(tree: &WidgetTree, point: Vec2, metrics: &Metrics) -> Option<NodeId> {
    let mut hit = None;
    let mut stack = vec![(tree.root(), Vec2::ZERO)];
    while let Some((id, offset)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let style = ComputedStyle::compute(node.style(), metrics);
        if style.display == Display::None {
            continue;
        }
        let boxes = node.layout.translate(offset);
        if style.visible && boxes.border.contains_point(point) {
            hit = Some(id);
        }
        let child_offset = boxes.content.position();
        stack.extend(node.children().iter().rev().map(|child| (*child, child_offset)));
    }
    hit
}
