// crates/lattice-core/src/value.rs
use glam::Vec4;
use serde::Serialize;
use std::fmt;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Normalized color as consumed by render backends.
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Auto,
    None,
    Block,
    InlineBlock,
    Static,
    Relative,
    Absolute,
    ContentBox,
    BorderBox,
    Stretch,
    FitContent,
    Visible,
    Hidden,
    Flex,
    Row,
    Column,
    Nowrap,
    Wrap,
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Keyword {
    pub const ALL: [Keyword; 24] = [
        Keyword::Auto,
        Keyword::None,
        Keyword::Block,
        Keyword::InlineBlock,
        Keyword::Static,
        Keyword::Relative,
        Keyword::Absolute,
        Keyword::ContentBox,
        Keyword::BorderBox,
        Keyword::Stretch,
        Keyword::FitContent,
        Keyword::Visible,
        Keyword::Hidden,
        Keyword::Flex,
        Keyword::Row,
        Keyword::Column,
        Keyword::Nowrap,
        Keyword::Wrap,
        Keyword::FlexStart,
        Keyword::FlexEnd,
        Keyword::Center,
        Keyword::SpaceBetween,
        Keyword::SpaceAround,
        Keyword::SpaceEvenly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Auto => "auto",
            Keyword::None => "none",
            Keyword::Block => "block",
            Keyword::InlineBlock => "inline-block",
            Keyword::Static => "static",
            Keyword::Relative => "relative",
            Keyword::Absolute => "absolute",
            Keyword::ContentBox => "content-box",
            Keyword::BorderBox => "border-box",
            Keyword::Stretch => "stretch",
            Keyword::FitContent => "fit-content",
            Keyword::Visible => "visible",
            Keyword::Hidden => "hidden",
            Keyword::Flex => "flex",
            Keyword::Row => "row",
            Keyword::Column => "column",
            Keyword::Nowrap => "nowrap",
            Keyword::Wrap => "wrap",
            Keyword::FlexStart => "flex-start",
            Keyword::FlexEnd => "flex-end",
            Keyword::Center => "center",
            Keyword::SpaceBetween => "space-between",
            Keyword::SpaceAround => "space-around",
            Keyword::SpaceEvenly => "space-evenly",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed style property value.
///
/// Percentages are stored as fractions of the containing block (`50%` is
/// `Percentage(0.5)`) and resolved during reflow. Absolute units other than
/// pixels are converted through [`crate::Metrics`] at reflow time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StyleValue {
    #[default]
    Unset,
    Pixels(f32),
    Points(f32),
    /// Density-independent pixels (`dp`).
    Dips(f32),
    /// Font-scaled pixels (`sp`).
    ScaledPixels(f32),
    Percentage(f32),
    Keyword(Keyword),
    Color(Color),
}

impl StyleValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, StyleValue::Unset)
    }

    /// True for every numeric kind, percentages included.
    pub fn is_length(&self) -> bool {
        matches!(
            self,
            StyleValue::Pixels(_)
                | StyleValue::Points(_)
                | StyleValue::Dips(_)
                | StyleValue::ScaledPixels(_)
                | StyleValue::Percentage(_)
        )
    }

    pub fn as_keyword(&self) -> Option<Keyword> {
        match self {
            StyleValue::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_percentage(&self) -> Option<f32> {
        match self {
            StyleValue::Percentage(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Unset => f.write_str("unset"),
            StyleValue::Pixels(v) => write!(f, "{}px", v),
            StyleValue::Points(v) => write!(f, "{}pt", v),
            StyleValue::Dips(v) => write!(f, "{}dp", v),
            StyleValue::ScaledPixels(v) => write!(f, "{}sp", v),
            StyleValue::Percentage(v) => write!(f, "{}%", v * 100.0),
            StyleValue::Keyword(k) => write!(f, "{}", k),
            StyleValue::Color(c) => write!(f, "{}", c),
        }
    }
}
