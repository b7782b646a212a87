// crates/lattice-layout/src/resizer.rs
//! Per-axis sizing rules.
//!
//! A resizer only looks at the values handed to it in [`MeasureInput`]. The
//! engine guarantees that `content_extent` is filled from children that are
//! already resolved before a `ContentFit` measurement is requested.

use lattice_core::{LayoutDimension, Resizer};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn main(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    pub fn cross(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.y,
            Axis::Vertical => v.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureInput {
    /// Style length already resolved to pixels, `None` for keywords and
    /// percentages of an indefinite size.
    pub specified: Option<f32>,
    /// Space the containing block offers along this axis.
    pub available: Option<f32>,
    /// Margins along this axis.
    pub margin: f32,
    /// Padding plus border along this axis.
    pub frame: f32,
    /// `specified` is a border-box size.
    pub border_box: bool,
    /// Extent of the children's margin boxes, once they are laid out.
    pub content_extent: Option<f32>,
    /// Natural size of replaced content.
    pub intrinsic: Vec2,
    /// Fixed content size on the other axis, used to keep aspect ratios.
    pub cross_fixed: Option<f32>,
}

/// Content-box size along one axis.
pub trait Measure {
    /// `None` means the strategy cannot decide with the given input and the
    /// caller should fall back to fitting the content.
    fn measure(&self, axis: Axis, input: &MeasureInput) -> Option<f32>;
}

impl Measure for Resizer {
    fn measure(&self, axis: Axis, input: &MeasureInput) -> Option<f32> {
        let size = match self {
            Resizer::Fixed => input.specified.map(|specified| {
                if input.border_box {
                    specified - input.frame
                } else {
                    specified
                }
            }),
            Resizer::Stretch => input
                .available
                .map(|available| available - input.margin - input.frame),
            Resizer::ContentFit => input.content_extent,
            Resizer::Replaced => {
                let main = axis.main(input.intrinsic);
                let cross = axis.cross(input.intrinsic);
                match input.cross_fixed {
                    Some(fixed) if cross > 0.0 => Some(fixed * main / cross),
                    _ => Some(main),
                }
            }
        };
        size.map(|size| size.max(0.0))
    }
}

/// Picks the strategy for one axis from the style and the widget's tag.
pub fn effective_resizer(tag: Resizer, dimension: &LayoutDimension) -> Resizer {
    match dimension {
        LayoutDimension::Pixels(_) | LayoutDimension::Percentage(_) => Resizer::Fixed,
        LayoutDimension::Stretch => Resizer::Stretch,
        LayoutDimension::FitContent if tag != Resizer::Replaced => Resizer::ContentFit,
        _ => tag,
    }
}
