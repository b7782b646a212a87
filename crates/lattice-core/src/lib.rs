// crates/lattice-core/src/lib.rs
pub mod elements;
pub mod events;
pub mod geometry;
pub mod layout_units;
pub mod metrics;
pub mod parse;
pub mod properties;
pub mod resources;
pub mod style;
pub mod trash;
pub mod tree;
pub mod value;

pub use elements::*;
pub use events::*;
pub use geometry::*;
pub use layout_units::*;
pub use metrics::*;
pub use parse::*;
pub use properties::*;
pub use resources::*;
pub use style::*;
pub use trash::*;
pub use tree::*;
pub use value::*;

#[derive(Debug, thiserror::Error)]
pub enum LatticeError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("Node not found or no longer live: {0}")]
    NodeNotFound(NodeId),

    #[error("Cannot insert {child} into its own subtree (parent {parent})")]
    CyclicInsert { parent: NodeId, child: NodeId },

    #[error("Child index {index} out of range for {len} children")]
    InvalidIndex { index: usize, len: usize },

    #[error("The root widget cannot be detached")]
    RootRemoval,
}

pub type Result<T> = std::result::Result<T, LatticeError>;
