// crates/lattice-layout/src/constraints.rs

use lattice_core::LayoutDimension;

/// `min-*`/`max-*` limits for one axis, in content-box pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraint {
    pub min: f32,
    pub max: f32,
}

impl Default for SizeConstraint {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f32::INFINITY,
        }
    }
}

impl SizeConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves style limits against `basis`. With `border_box`, the limits
    /// are given for the border box and `frame` (padding + border) is
    /// subtracted to get content limits.
    pub fn resolve(
        min: LayoutDimension,
        max: LayoutDimension,
        basis: Option<f32>,
        frame: f32,
        border_box: bool,
    ) -> Self {
        let to_content = |v: f32| if border_box { (v - frame).max(0.0) } else { v.max(0.0) };
        Self {
            min: min.to_pixels(basis).map(to_content).unwrap_or(0.0),
            max: max.to_pixels(basis).map(to_content).unwrap_or(f32::INFINITY),
        }
    }

    /// Clamps to the limits. `min` wins over `max`, and the result is never
    /// negative.
    pub fn constrain(&self, size: f32) -> f32 {
        size.min(self.max).max(self.min).max(0.0)
    }

    pub fn is_constrained(&self) -> bool {
        self.min > 0.0 || self.max != f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_limits_do_nothing() {
        let limits = SizeConstraint::resolve(
            LayoutDimension::Auto,
            LayoutDimension::None,
            Some(100.0),
            0.0,
            false,
        );
        assert!(!limits.is_constrained());
        assert_eq!(limits.constrain(1e6), 1e6);
        assert_eq!(limits.constrain(-4.0), 0.0);
    }

    #[test]
    fn test_min_beats_max() {
        let limits = SizeConstraint::resolve(
            LayoutDimension::Pixels(50.0),
            LayoutDimension::Pixels(20.0),
            None,
            0.0,
            false,
        );
        assert_eq!(limits.constrain(10.0), 50.0);
        assert_eq!(limits.constrain(100.0), 50.0);
    }

    #[test]
    fn test_border_box_limits_subtract_frame() {
        let limits = SizeConstraint::resolve(
            LayoutDimension::Auto,
            LayoutDimension::Percentage(0.5),
            Some(200.0),
            20.0,
            true,
        );
        assert_eq!(limits.max, 80.0);
    }
}
