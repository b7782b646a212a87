// crates/lattice-core/src/layout_units.rs
use crate::{Keyword, Metrics, StyleValue};
use glam::Vec2;

/// A length after unit conversion, still relative where the style was.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutDimension {
    /// Fixed pixel value
    Pixels(f32),
    /// Fraction of the containing block (0.5 for 50%)
    Percentage(f32),
    /// Unset or `auto`: the widget's own sizing rule decides
    #[default]
    Auto,
    /// Fill the space left in the containing block
    Stretch,
    /// Shrink to the children's extent
    FitContent,
    /// `none`, only meaningful for max limits
    None,
}

impl LayoutDimension {
    /// Converts a style value, turning `pt`/`dp`/`sp` into pixels.
    pub fn from_style(value: &StyleValue, metrics: &Metrics) -> Self {
        match value {
            StyleValue::Percentage(p) => LayoutDimension::Percentage(*p),
            StyleValue::Keyword(Keyword::Stretch) => LayoutDimension::Stretch,
            StyleValue::Keyword(Keyword::FitContent) => LayoutDimension::FitContent,
            StyleValue::Keyword(Keyword::None) => LayoutDimension::None,
            other => metrics
                .to_pixels(other)
                .map(LayoutDimension::Pixels)
                .unwrap_or(LayoutDimension::Auto),
        }
    }

    /// Convert to pixels given a parent size. Percentages of an unknown
    /// parent size and every keyword have no pixel value.
    pub fn to_pixels(&self, parent_size: Option<f32>) -> Option<f32> {
        match self {
            LayoutDimension::Pixels(px) => Some(*px),
            LayoutDimension::Percentage(pct) => parent_size.map(|size| pct * size),
            _ => None,
        }
    }

    /// Same as [`Self::to_pixels`] but treats anything unresolvable as zero,
    /// which is how margins, paddings and borders behave.
    pub fn to_pixels_or_zero(&self, parent_size: f32) -> f32 {
        self.to_pixels(Some(parent_size)).unwrap_or(0.0)
    }
}

/// The box against which a widget's percentages and stretch sizes resolve.
///
/// Created per reflow call and passed down by value; a child always receives
/// a fresh copy derived from its parent's content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainingBlock {
    pub width: f32,
    pub height: f32,
    /// False while the parent's height still depends on its children.
    pub definite_height: bool,
    /// Height left for a stretching child below the previous siblings.
    pub available_height: f32,
    /// `auto` inline margins share the width left next to the widget.
    /// Off while a parent measures its children and inside flex lines.
    pub auto_margins: bool,
    /// An `auto` width fills `width`, as flex items do under
    /// `align-items: stretch` in a column.
    pub stretch_width: bool,
    /// An `auto` height fills `height`, the row counterpart.
    pub stretch_height: bool,
}

impl ContainingBlock {
    /// Block for the root widget: the whole viewport, fully definite.
    pub fn viewport(size: Vec2) -> Self {
        Self {
            width: size.x.max(0.0),
            height: size.y.max(0.0),
            definite_height: true,
            available_height: size.y.max(0.0),
            auto_margins: true,
            stretch_width: false,
            stretch_height: false,
        }
    }

    pub fn new(width: f32, height: Option<f32>) -> Self {
        Self {
            width: width.max(0.0),
            height: height.unwrap_or(0.0).max(0.0),
            definite_height: height.is_some(),
            available_height: height.unwrap_or(0.0).max(0.0),
            auto_margins: true,
            stretch_width: false,
            stretch_height: false,
        }
    }

    pub fn definite_height(&self) -> Option<f32> {
        self.definite_height.then_some(self.height)
    }

    pub fn available_height(&self) -> Option<f32> {
        self.definite_height.then_some(self.available_height)
    }

    pub fn with_available_height(self, available_height: f32) -> Self {
        Self {
            available_height: available_height.max(0.0),
            ..self
        }
    }

    pub fn without_auto_margins(self) -> Self {
        Self {
            auto_margins: false,
            ..self
        }
    }

    pub fn stretched(self, width: bool, height: bool) -> Self {
        Self {
            stretch_width: width,
            stretch_height: height,
            ..self
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
