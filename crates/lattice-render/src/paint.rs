// crates/lattice-render/src/paint.rs

use crate::RenderCommand;
use glam::Vec2;
use lattice_core::{
    BoxModel, ComputedStyle, DirtyFlags, Display, Metrics, NodeId, WidgetKind, WidgetTree,
};

/// Converts the laid-out tree into draw commands in document order and
/// clears every painted widget's `REPAINT` bit.
///
/// `display: none` subtrees are skipped entirely; `visibility: hidden`
/// widgets are skipped but their children still paint.
pub fn build_commands(tree: &mut WidgetTree, metrics: &Metrics) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    let root = tree.root();
    tree.traverse(|tree| paint_node(tree, root, Vec2::ZERO, metrics, &mut commands));
    commands
}

fn paint_node(
    tree: &mut WidgetTree,
    id: NodeId,
    offset: Vec2,
    metrics: &Metrics,
    commands: &mut Vec<RenderCommand>,
) {
    let Some(node) = tree.get_mut(id) else {
        return;
    };
    node.dirty.remove(DirtyFlags::REPAINT);
    let style = ComputedStyle::compute(node.style(), metrics);
    if style.display == Display::None {
        return;
    }

    let boxes = node.layout.translate(offset);
    if style.visible {
        widget_commands(id, node.kind, node.resource.as_deref(), &style, &boxes, commands);
    }

    let children = node.children().to_vec();
    let child_offset = boxes.content.position();
    for child in children {
        paint_node(tree, child, child_offset, metrics, commands);
    }
}

fn widget_commands(
    id: NodeId,
    kind: WidgetKind,
    resource: Option<&str>,
    style: &ComputedStyle,
    boxes: &BoxModel,
    commands: &mut Vec<RenderCommand>,
) {
    let border_width = boxes.border_widths();
    let has_border = !style.border_color.is_transparent()
        && (border_width.horizontal() > 0.0 || border_width.vertical() > 0.0);

    if !style.background_color.is_transparent() || has_border {
        commands.push(RenderCommand::DrawRect {
            node: id,
            position: boxes.border.position(),
            size: boxes.border.size(),
            color: style.background_color.to_vec4(),
            border_width,
            border_color: style.border_color.to_vec4(),
        });
    }

    if let (WidgetKind::Image, Some(source)) = (kind, resource) {
        commands.push(RenderCommand::DrawImage {
            node: id,
            position: boxes.content.position(),
            size: boxes.content.size(),
            source: source.to_string(),
        });
    }
}
