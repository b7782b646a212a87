// crates/lattice-core/src/resources.rs
use glam::Vec2;
use std::collections::HashMap;

/// Supplies natural sizes for replaced content such as bitmaps.
pub trait IntrinsicSize {
    fn intrinsic_size(&self, key: &str) -> Option<Vec2>;
}

#[derive(Debug, Clone, Default)]
pub struct ResourceManager {
    pub resources: HashMap<String, ResourceEntry>,
}

/// An image registered with the loader.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    pub id: String,
    pub path: String,
    /// Decoded size in pixels; `None` until the loader has decoded it.
    pub natural_size: Option<Vec2>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resource(&mut self, entry: ResourceEntry) {
        self.resources.insert(entry.id.clone(), entry);
    }

    pub fn add_image(&mut self, id: impl Into<String>, path: impl Into<String>, size: Vec2) {
        let id = id.into();
        self.add_resource(ResourceEntry {
            id: id.clone(),
            path: path.into(),
            natural_size: Some(size),
        });
    }

    pub fn get_resource(&self, id: &str) -> Option<&ResourceEntry> {
        self.resources.get(id)
    }
}

impl IntrinsicSize for ResourceManager {
    fn intrinsic_size(&self, key: &str) -> Option<Vec2> {
        self.get_resource(key).and_then(|entry| entry.natural_size)
    }
}

/// A loader that knows no resources; every replaced widget measures `(0, 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl IntrinsicSize for NoResources {
    fn intrinsic_size(&self, _key: &str) -> Option<Vec2> {
        None
    }
}
