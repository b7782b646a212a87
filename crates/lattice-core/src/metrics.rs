// crates/lattice-core/src/metrics.rs
use crate::StyleValue;

/// Screen density presets, relative to `dpi / 96`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensityLevel {
    Small,
    #[default]
    Normal,
    Large,
    Big,
}

impl DensityLevel {
    fn factor(self) -> f32 {
        match self {
            DensityLevel::Small => 0.75,
            DensityLevel::Normal => 1.0,
            DensityLevel::Large => 1.25,
            DensityLevel::Big => 1.5,
        }
    }
}

/// Unit conversion settings used when resolving absolute lengths to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub dpi: f32,
    /// Multiplier for `dp` values.
    pub density: f32,
    /// Multiplier for `sp` values.
    pub scaled_density: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::with_dpi(96.0)
    }
}

impl Metrics {
    pub fn with_dpi(dpi: f32) -> Self {
        let mut metrics = Self {
            dpi,
            density: 1.0,
            scaled_density: 1.0,
        };
        metrics.set_dpi(dpi);
        metrics
    }

    /// Changes the DPI and resets both densities to [`DensityLevel::Normal`].
    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
        self.set_density_level(DensityLevel::Normal);
        self.set_scaled_density_level(DensityLevel::Normal);
    }

    pub fn set_density_level(&mut self, level: DensityLevel) {
        self.density = self.density_for(level);
    }

    pub fn set_scaled_density_level(&mut self, level: DensityLevel) {
        self.scaled_density = self.density_for(level);
    }

    pub fn density_for(&self, level: DensityLevel) -> f32 {
        self.dpi / 96.0 * level.factor()
    }

    /// Converts an absolute length to pixels. Percentages, keywords and
    /// colors have no absolute size and yield `None`.
    pub fn to_pixels(&self, value: &StyleValue) -> Option<f32> {
        match *value {
            StyleValue::Pixels(v) => Some(v),
            StyleValue::Points(v) => Some(v * self.dpi / 72.0),
            StyleValue::Dips(v) => Some(v * self.density),
            StyleValue::ScaledPixels(v) => Some(v * self.scaled_density),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_follow_dpi() {
        let metrics = Metrics::default();
        assert_eq!(metrics.to_pixels(&StyleValue::Points(72.0)), Some(96.0));

        let metrics = Metrics::with_dpi(144.0);
        assert_eq!(metrics.to_pixels(&StyleValue::Points(36.0)), Some(72.0));
        assert_eq!(metrics.to_pixels(&StyleValue::Dips(10.0)), Some(15.0));
    }

    #[test]
    fn test_density_levels() {
        let mut metrics = Metrics::default();
        metrics.set_density_level(DensityLevel::Big);
        metrics.set_scaled_density_level(DensityLevel::Small);
        assert_eq!(metrics.to_pixels(&StyleValue::Dips(10.0)), Some(15.0));
        assert_eq!(metrics.to_pixels(&StyleValue::ScaledPixels(8.0)), Some(6.0));

        metrics.set_dpi(96.0);
        assert_eq!(metrics.density, 1.0);
        assert_eq!(metrics.scaled_density, 1.0);
    }

    #[test]
    fn test_relative_values_have_no_pixels() {
        let metrics = Metrics::default();
        assert_eq!(metrics.to_pixels(&StyleValue::Percentage(0.5)), None);
        assert_eq!(metrics.to_pixels(&StyleValue::Unset), None);
    }
}
