// src/scene.rs
//! JSON scene files: a widget tree with inline styles plus image sizes.
//!
//! ```json
//! {
//!   "viewport": [320, 240],
//!   "resources": [{ "id": "logo", "path": "logo.png", "width": 64, "height": 32 }],
//!   "root": {
//!     "style": { "background-color": "#202020" },
//!     "children": [
//!       { "kind": "image", "resource": "logo", "style": { "width": "50%" } }
//!     ]
//!   }
//! }
//! ```

use glam::Vec2;
use lattice_core::{LatticeError, NodeId, ResourceManager, WidgetKind, WidgetTree};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown widget kind: {0:?}")]
    UnknownKind(String),
    #[error(transparent)]
    Tree(#[from] LatticeError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub viewport: Option<[f32; 2]>,
    #[serde(default)]
    pub dpi: Option<f32>,
    #[serde(default)]
    pub resources: Vec<SceneResource>,
    pub root: SceneNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneNode {
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Property name to value text, parsed with the regular style parser.
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneResource {
    pub id: String,
    #[serde(default)]
    pub path: String,
    pub width: f32,
    pub height: f32,
}

fn default_kind() -> String {
    "container".to_string()
}

/// A loaded scene, ready for reflow.
#[derive(Debug)]
pub struct Scene {
    pub tree: WidgetTree,
    pub resources: ResourceManager,
    pub viewport: Option<Vec2>,
    pub dpi: Option<f32>,
    /// Style declarations that failed to parse. The affected widgets keep
    /// their default values.
    pub warnings: Vec<String>,
}

pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scene(&text)
}

pub fn parse_scene(text: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = serde_json::from_str(text)?;
    build_scene(file)
}

pub fn build_scene(file: SceneFile) -> Result<Scene, SceneError> {
    let mut resources = ResourceManager::new();
    for resource in &file.resources {
        resources.add_image(
            resource.id.clone(),
            resource.path.clone(),
            Vec2::new(resource.width, resource.height),
        );
    }

    let mut scene = Scene {
        tree: WidgetTree::new(),
        resources,
        viewport: file.viewport.map(Vec2::from_array),
        dpi: file.dpi,
        warnings: Vec::new(),
    };
    let root = scene.tree.root();
    apply_node(&mut scene, root, &file.root)?;

    // Explicit stack keeps deep scenes off the call stack.
    let mut pending: Vec<(NodeId, &SceneNode)> = file
        .root
        .children
        .iter()
        .rev()
        .map(|child| (root, child))
        .collect();
    while let Some((parent, node)) = pending.pop() {
        let kind = WidgetKind::from_name(&node.kind)
            .filter(|kind| *kind != WidgetKind::Root)
            .ok_or_else(|| SceneError::UnknownKind(node.kind.clone()))?;
        let id = scene.tree.create(kind);
        scene.tree.append(parent, id)?;
        apply_node(&mut scene, id, node)?;
        pending.extend(node.children.iter().rev().map(|child| (id, child)));
    }

    debug!(
        "Loaded scene with {} widgets, {} warnings",
        scene.tree.len(),
        scene.warnings.len()
    );
    Ok(scene)
}

fn apply_node(scene: &mut Scene, id: NodeId, node: &SceneNode) -> Result<(), SceneError> {
    if let Some(name) = &node.name {
        scene.tree.set_name(id, name.clone())?;
    }
    if let Some(resource) = &node.resource {
        scene.tree.set_resource(id, resource.clone())?;
    }
    for (property, value) in &node.style {
        match scene.tree.set_style_str(id, property, value) {
            Ok(()) => {}
            Err(LatticeError::Style(error)) => {
                let label = scene.tree.get(id).map(|w| w.label()).unwrap_or_default();
                warn!("Ignoring {}: {} on {}: {}", property, value, label, error);
                scene
                    .warnings
                    .push(format!("{}: {} on {}: {}", property, value, label, error));
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(())
}
