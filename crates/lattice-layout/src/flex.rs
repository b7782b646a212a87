// crates/lattice-layout/src/flex.rs
//! Line breaking and free-space distribution for `display: flex`.
//!
//! Sizes here are along the container's main axis (`main`) and the axis
//! across it (`cross`). The engine maps them back to x/y.

use crate::flow::WRAP_EPSILON;
use lattice_core::{AlignItems, JustifyContent};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlexLine {
    /// Item indices in document order.
    pub items: Vec<usize>,
    /// Sum of the items' main-axis margin boxes.
    pub main: f32,
    /// Largest cross-axis margin box.
    pub cross: f32,
}

/// Collects items into lines, starting a new line when `wrap` is set and
/// the next item would overflow `limit`.
#[derive(Debug, Clone)]
pub struct FlexLines {
    limit: Option<f32>,
    wrap: bool,
    lines: Vec<FlexLine>,
}

impl FlexLines {
    pub fn new(limit: Option<f32>, wrap: bool) -> Self {
        Self {
            limit,
            wrap,
            lines: vec![FlexLine::default()],
        }
    }

    pub fn push(&mut self, index: usize, main: f32, cross: f32) {
        let overflows = match (self.limit, self.lines.last()) {
            (Some(limit), Some(line)) => {
                self.wrap && !line.items.is_empty() && line.main + main > limit + WRAP_EPSILON
            }
            _ => false,
        };
        if overflows {
            self.lines.push(FlexLine::default());
        }
        if let Some(line) = self.lines.last_mut() {
            line.items.push(index);
            line.main += main;
            line.cross = line.cross.max(cross);
        }
    }

    pub fn lines(&self) -> &[FlexLine] {
        &self.lines
    }

    /// Longest line.
    pub fn main_extent(&self) -> f32 {
        self.lines.iter().map(|line| line.main).fold(0.0, f32::max)
    }

    /// Lines stacked across the main axis.
    pub fn cross_extent(&self) -> f32 {
        self.lines.iter().map(|line| line.cross).sum()
    }
}

/// Leading offset and gap between items for `free` main-axis space.
///
/// Overflowing lines (negative `free`) start at the main-start edge.
pub fn justify(justify: JustifyContent, free: f32, count: usize) -> (f32, f32) {
    let free = free.max(0.0);
    if count == 0 {
        return (0.0, 0.0);
    }
    let n = count as f32;
    match justify {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (free, 0.0),
        JustifyContent::Center => (free / 2.0, 0.0),
        JustifyContent::SpaceBetween if count > 1 => (0.0, free / (n - 1.0)),
        JustifyContent::SpaceBetween => (0.0, 0.0),
        JustifyContent::SpaceAround => (free / n / 2.0, free / n),
        JustifyContent::SpaceEvenly => (free / (n + 1.0), free / (n + 1.0)),
    }
}

/// Cross-axis offset of an item inside its line.
pub fn align_offset(align: AlignItems, line_cross: f32, item_cross: f32) -> f32 {
    match align {
        AlignItems::FlexStart | AlignItems::Stretch => 0.0,
        AlignItems::FlexEnd => line_cross - item_cross,
        AlignItems::Center => (line_cross - item_cross) / 2.0,
    }
}
