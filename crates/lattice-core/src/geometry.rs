// crates/lattice-core/src/geometry.rs
use glam::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn translate(&self, delta: Vec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Shrinks the rect by `sides`; the result never has a negative size.
    pub fn inset(&self, sides: Sides<f32>) -> Rect {
        Rect::new(
            self.x + sides.left,
            self.y + sides.top,
            (self.width - sides.horizontal()).max(0.0),
            (self.height - sides.vertical()).max(0.0),
        )
    }
}

/// Per-side values in CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Sides<T> {
    pub fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sides<U> {
        Sides {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl Sides<f32> {
    pub const ZERO: Sides<f32> = Sides {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl std::ops::Add for Sides<f32> {
    type Output = Sides<f32>;

    fn add(self, rhs: Self) -> Self::Output {
        Sides {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

/// The four nested boxes of a laid-out widget.
///
/// Rects are expressed in the coordinate space of the parent's content box
/// (the root's are in viewport space). `margin` contains `border`, which
/// contains `padding`, which contains `content`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoxModel {
    pub content: Rect,
    pub padding: Rect,
    pub border: Rect,
    pub margin: Rect,
}

impl BoxModel {
    /// Builds the boxes outwards from a content size, with the margin box at
    /// the origin.
    pub fn from_content(
        content_size: Vec2,
        padding: Sides<f32>,
        border: Sides<f32>,
        margin: Sides<f32>,
    ) -> Self {
        let outer = Vec2::new(
            content_size.x + padding.horizontal() + border.horizontal() + margin.horizontal(),
            content_size.y + padding.vertical() + border.vertical() + margin.vertical(),
        );
        let margin_rect = Rect::from_position_size(Vec2::ZERO, outer.max(Vec2::ZERO));
        let border_rect = margin_rect.inset(margin);
        let padding_rect = border_rect.inset(border);
        let content_rect = padding_rect.inset(padding);
        Self {
            content: content_rect,
            padding: padding_rect,
            border: border_rect,
            margin: margin_rect,
        }
    }

    pub fn translate(&self, delta: Vec2) -> BoxModel {
        BoxModel {
            content: self.content.translate(delta),
            padding: self.padding.translate(delta),
            border: self.border.translate(delta),
            margin: self.margin.translate(delta),
        }
    }

    /// Moves every box so the margin box starts at `origin`.
    pub fn moved_to(&self, origin: Vec2) -> BoxModel {
        self.translate(origin - self.margin.position())
    }

    pub fn margins(&self) -> Sides<f32> {
        Sides {
            top: self.border.y - self.margin.y,
            right: self.margin.right() - self.border.right(),
            bottom: self.margin.bottom() - self.border.bottom(),
            left: self.border.x - self.margin.x,
        }
    }

    /// Replaces the margins, keeping the margin box origin and the border
    /// box size.
    pub fn with_margins(&self, margin: Sides<f32>) -> BoxModel {
        let origin = self.margin.position();
        let delta = origin + Vec2::new(margin.left, margin.top) - self.border.position();
        let border = self.border.translate(delta);
        BoxModel {
            content: self.content.translate(delta),
            padding: self.padding.translate(delta),
            border,
            margin: Rect::from_position_size(
                origin,
                border.size() + Vec2::new(margin.horizontal(), margin.vertical()),
            ),
        }
    }

    pub fn border_widths(&self) -> Sides<f32> {
        Sides {
            top: self.padding.y - self.border.y,
            right: self.border.right() - self.padding.right(),
            bottom: self.border.bottom() - self.padding.bottom(),
            left: self.padding.x - self.border.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_model_nesting() {
        let boxes = BoxModel::from_content(
            Vec2::new(100.0, 50.0),
            Sides::all(5.0),
            Sides::all(1.0),
            Sides {
                top: 10.0,
                right: 0.0,
                bottom: 10.0,
                left: 20.0,
            },
        );
        assert_eq!(boxes.margin, Rect::new(0.0, 0.0, 132.0, 82.0));
        assert_eq!(boxes.border, Rect::new(20.0, 10.0, 112.0, 62.0));
        assert_eq!(boxes.padding, Rect::new(21.0, 11.0, 110.0, 60.0));
        assert_eq!(boxes.content, Rect::new(26.0, 16.0, 100.0, 50.0));
        assert_eq!(boxes.border_widths(), Sides::all(1.0));
    }

    #[test]
    fn test_moved_to() {
        let boxes = BoxModel::from_content(Vec2::new(10.0, 10.0), Sides::ZERO, Sides::ZERO, Sides::all(2.0));
        let moved = boxes.moved_to(Vec2::new(5.0, 7.0));
        assert_eq!(moved.margin.position(), Vec2::new(5.0, 7.0));
        assert_eq!(moved.content.position(), Vec2::new(7.0, 9.0));
    }

    #[test]
    fn test_with_margins_keeps_border_size() {
        let boxes = BoxModel::from_content(Vec2::new(10.0, 10.0), Sides::all(1.0), Sides::ZERO, Sides::all(2.0))
            .moved_to(Vec2::new(4.0, 0.0));
        assert_eq!(boxes.margins(), Sides::all(2.0));

        let wider = boxes.with_margins(Sides {
            left: 10.0,
            ..Sides::ZERO
        });
        assert_eq!(wider.margin, Rect::new(4.0, 0.0, 22.0, 12.0));
        assert_eq!(wider.border, Rect::new(14.0, 0.0, 12.0, 12.0));
        assert_eq!(wider.content, Rect::new(15.0, 1.0, 10.0, 10.0));
    }

    #[test]
    fn test_inset_never_negative() {
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0).inset(Sides::all(3.0));
        assert_eq!(rect.size(), Vec2::ZERO);
    }
}
