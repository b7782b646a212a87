// src/report.rs
//! Text and JSON dumps of a laid-out tree.

use lattice_core::{BoxModel, NodeId, WidgetTree};
use lattice_render::RenderCommand;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub id: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub boxes: BoxModel,
    pub children: Vec<NodeReport>,
}

impl NodeReport {
    pub fn collect(tree: &WidgetTree, id: NodeId) -> Option<NodeReport> {
        let node = tree.get(id)?;
        Some(NodeReport {
            id: id.to_string(),
            kind: node.kind.name(),
            name: node.name.clone(),
            boxes: tree.absolute_box(id)?,
            children: node
                .children()
                .iter()
                .filter_map(|child| NodeReport::collect(tree, *child))
                .collect(),
        })
    }
}

/// Indented tree with each widget's border box in root coordinates.
pub fn tree_text(tree: &WidgetTree) -> String {
    let mut output = String::new();
    write_tree(&mut output, tree, tree.root(), "", true, true);
    output
}

fn write_tree(
    output: &mut String,
    tree: &WidgetTree,
    id: NodeId,
    prefix: &str,
    is_last: bool,
    is_root: bool,
) {
    let (Some(node), Some(boxes)) = (tree.get(id), tree.absolute_box(id)) else {
        return;
    };
    let branch = match (is_root, is_last) {
        (true, _) => "",
        (false, true) => "└── ",
        (false, false) => "├── ",
    };
    let border = boxes.border;
    output.push_str(&format!(
        "{}{}{} pos:({:.1},{:.1}) size:({:.1},{:.1})\n",
        prefix,
        branch,
        node.label(),
        border.x,
        border.y,
        border.width,
        border.height
    ));

    let child_prefix = match (is_root, is_last) {
        (true, _) => String::new(),
        (false, true) => format!("{}    ", prefix),
        (false, false) => format!("{}│   ", prefix),
    };
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        write_tree(output, tree, *child, &child_prefix, i == children.len() - 1, false);
    }
}

pub fn tree_json(tree: &WidgetTree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&NodeReport::collect(tree, tree.root()))
}

/// One line per command, in execution order.
pub fn commands_text(commands: &[RenderCommand]) -> String {
    let mut output = String::new();
    for command in commands {
        let line = match command {
            RenderCommand::DrawRect {
                node,
                position,
                size,
                color,
                border_width,
                ..
            } => format!(
                "rect {} pos:({:.1},{:.1}) size:({:.1},{:.1}) color:({:.3},{:.3},{:.3},{:.3}) border:({},{},{},{})",
                node,
                position.x,
                position.y,
                size.x,
                size.y,
                color.x,
                color.y,
                color.z,
                color.w,
                border_width.top,
                border_width.right,
                border_width.bottom,
                border_width.left
            ),
            RenderCommand::DrawImage {
                node,
                position,
                size,
                source,
            } => format!(
                "image {} pos:({:.1},{:.1}) size:({:.1},{:.1}) source:{}",
                node, position.x, position.y, size.x, size.y, source
            ),
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}
