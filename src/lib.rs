// src/lib.rs
pub mod report;
pub mod scene;

pub use lattice_core;
pub use lattice_layout;
pub use lattice_render;

pub use scene::{load_scene, parse_scene, Scene, SceneError};
