// crates/lattice-layout/src/flow.rs

use glam::Vec2;

// Slack for float error when deciding whether an inline box still fits.
pub(crate) const WRAP_EPSILON: f32 = 0.01;

/// Running position while placing in-flow children of one container.
///
/// Block boxes stack vertically. Consecutive inline-block boxes share a row
/// until the next one would overflow `limit`.
#[derive(Debug, Clone)]
pub struct FlowCursor {
    limit: f32,
    offset: f32,
    row_x: f32,
    row_height: f32,
    in_row: bool,
    extent: Vec2,
}

impl FlowCursor {
    pub fn new(limit: f32) -> Self {
        Self {
            limit,
            offset: 0.0,
            row_x: 0.0,
            row_height: 0.0,
            in_row: false,
            extent: Vec2::ZERO,
        }
    }

    /// Top of the current row, or of the next block box.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(if self.in_row { self.row_x } else { 0.0 }, self.offset)
    }

    /// Returns the margin-box origin for a block child of `size`.
    pub fn place_block(&mut self, size: Vec2) -> Vec2 {
        self.flush_row();
        let origin = Vec2::new(0.0, self.offset);
        self.offset += size.y;
        self.extent = self.extent.max(Vec2::new(size.x, self.offset));
        origin
    }

    /// Returns the margin-box origin for an inline-block child of `size`,
    /// starting a new row first if it does not fit.
    pub fn place_inline(&mut self, size: Vec2) -> Vec2 {
        if self.in_row && self.row_x + size.x > self.limit + WRAP_EPSILON {
            self.flush_row();
        }
        let origin = Vec2::new(self.row_x, self.offset);
        self.row_x += size.x;
        self.row_height = self.row_height.max(size.y);
        self.in_row = true;
        self.extent = self
            .extent
            .max(Vec2::new(self.row_x, self.offset + self.row_height));
        origin
    }

    pub fn flush_row(&mut self) {
        if self.in_row {
            self.offset += self.row_height;
            self.row_x = 0.0;
            self.row_height = 0.0;
            self.in_row = false;
        }
    }

    /// Union of every placed margin box.
    pub fn finish(mut self) -> Vec2 {
        self.flush_row();
        self.extent
    }
}
