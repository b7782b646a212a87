// crates/lattice-core/src/properties.rs

use crate::{parse_color, parse_keyword, parse_number, Keyword, StyleError, StyleValue};

/// Style properties understood by the layout and paint passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyId {
    // Size
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,

    // Box model
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    BoxSizing,

    // Positioning
    Display,
    Position,
    Left,
    Top,

    // Flex containers
    FlexDirection,
    FlexWrap,
    JustifyContent,
    AlignItems,

    // Paint only
    Visibility,
    BackgroundColor,
    BorderColor,
}

/// What kind of text a property's value is parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A number with optional unit, or one of the listed keywords.
    Length(&'static [Keyword]),
    Color,
    Keyword(&'static [Keyword]),
}

const SIZE_KEYWORDS: &[Keyword] = &[Keyword::Auto, Keyword::Stretch, Keyword::FitContent];
const LIMIT_KEYWORDS: &[Keyword] = &[Keyword::Auto, Keyword::None];
const AUTO_ONLY: &[Keyword] = &[Keyword::Auto];
const NO_KEYWORDS: &[Keyword] = &[];

impl PropertyId {
    pub const ALL: [PropertyId; 30] = [
        PropertyId::Width,
        PropertyId::Height,
        PropertyId::MinWidth,
        PropertyId::MinHeight,
        PropertyId::MaxWidth,
        PropertyId::MaxHeight,
        PropertyId::MarginTop,
        PropertyId::MarginRight,
        PropertyId::MarginBottom,
        PropertyId::MarginLeft,
        PropertyId::PaddingTop,
        PropertyId::PaddingRight,
        PropertyId::PaddingBottom,
        PropertyId::PaddingLeft,
        PropertyId::BorderTopWidth,
        PropertyId::BorderRightWidth,
        PropertyId::BorderBottomWidth,
        PropertyId::BorderLeftWidth,
        PropertyId::BoxSizing,
        PropertyId::Display,
        PropertyId::Position,
        PropertyId::Left,
        PropertyId::Top,
        PropertyId::FlexDirection,
        PropertyId::FlexWrap,
        PropertyId::JustifyContent,
        PropertyId::AlignItems,
        PropertyId::Visibility,
        PropertyId::BackgroundColor,
        PropertyId::BorderColor,
    ];

    /// CSS-style name of the property.
    pub fn name(self) -> &'static str {
        match self {
            PropertyId::Width => "width",
            PropertyId::Height => "height",
            PropertyId::MinWidth => "min-width",
            PropertyId::MinHeight => "min-height",
            PropertyId::MaxWidth => "max-width",
            PropertyId::MaxHeight => "max-height",
            PropertyId::MarginTop => "margin-top",
            PropertyId::MarginRight => "margin-right",
            PropertyId::MarginBottom => "margin-bottom",
            PropertyId::MarginLeft => "margin-left",
            PropertyId::PaddingTop => "padding-top",
            PropertyId::PaddingRight => "padding-right",
            PropertyId::PaddingBottom => "padding-bottom",
            PropertyId::PaddingLeft => "padding-left",
            PropertyId::BorderTopWidth => "border-top-width",
            PropertyId::BorderRightWidth => "border-right-width",
            PropertyId::BorderBottomWidth => "border-bottom-width",
            PropertyId::BorderLeftWidth => "border-left-width",
            PropertyId::BoxSizing => "box-sizing",
            PropertyId::Display => "display",
            PropertyId::Position => "position",
            PropertyId::Left => "left",
            PropertyId::Top => "top",
            PropertyId::FlexDirection => "flex-direction",
            PropertyId::FlexWrap => "flex-wrap",
            PropertyId::JustifyContent => "justify-content",
            PropertyId::AlignItems => "align-items",
            PropertyId::Visibility => "visibility",
            PropertyId::BackgroundColor => "background-color",
            PropertyId::BorderColor => "border-color",
        }
    }

    pub fn from_name(name: &str) -> Option<PropertyId> {
        let name = name.trim();
        PropertyId::ALL
            .into_iter()
            .find(|property| property.name().eq_ignore_ascii_case(name))
    }

    pub fn kind(self) -> PropertyKind {
        match self {
            PropertyId::Width | PropertyId::Height => PropertyKind::Length(SIZE_KEYWORDS),
            PropertyId::MinWidth
            | PropertyId::MinHeight
            | PropertyId::MaxWidth
            | PropertyId::MaxHeight => PropertyKind::Length(LIMIT_KEYWORDS),
            PropertyId::MarginTop
            | PropertyId::MarginRight
            | PropertyId::MarginBottom
            | PropertyId::MarginLeft
            | PropertyId::Left
            | PropertyId::Top => PropertyKind::Length(AUTO_ONLY),
            PropertyId::PaddingTop
            | PropertyId::PaddingRight
            | PropertyId::PaddingBottom
            | PropertyId::PaddingLeft
            | PropertyId::BorderTopWidth
            | PropertyId::BorderRightWidth
            | PropertyId::BorderBottomWidth
            | PropertyId::BorderLeftWidth => PropertyKind::Length(NO_KEYWORDS),
            PropertyId::BoxSizing => {
                PropertyKind::Keyword(&[Keyword::ContentBox, Keyword::BorderBox])
            }
            PropertyId::Display => {
                PropertyKind::Keyword(&[Keyword::Block, Keyword::InlineBlock, Keyword::Flex, Keyword::None])
            }
            PropertyId::Position => {
                PropertyKind::Keyword(&[Keyword::Static, Keyword::Relative, Keyword::Absolute])
            }
            PropertyId::FlexDirection => PropertyKind::Keyword(&[Keyword::Row, Keyword::Column]),
            PropertyId::FlexWrap => PropertyKind::Keyword(&[Keyword::Nowrap, Keyword::Wrap]),
            PropertyId::JustifyContent => PropertyKind::Keyword(&[
                Keyword::FlexStart,
                Keyword::FlexEnd,
                Keyword::Center,
                Keyword::SpaceBetween,
                Keyword::SpaceAround,
                Keyword::SpaceEvenly,
            ]),
            PropertyId::AlignItems => PropertyKind::Keyword(&[
                Keyword::FlexStart,
                Keyword::FlexEnd,
                Keyword::Center,
                Keyword::Stretch,
            ]),
            PropertyId::Visibility => PropertyKind::Keyword(&[Keyword::Visible, Keyword::Hidden]),
            PropertyId::BackgroundColor | PropertyId::BorderColor => PropertyKind::Color,
        }
    }

    /// Whether a change to this property can move or resize boxes.
    pub fn affects_layout(self) -> bool {
        !matches!(
            self,
            PropertyId::Visibility
                | PropertyId::BackgroundColor
                | PropertyId::BorderColor
        )
    }

    /// Parses `text` according to this property's value grammar.
    pub fn parse_value(self, text: &str) -> Result<StyleValue, StyleError> {
        match self.kind() {
            PropertyKind::Color => parse_color(text),
            PropertyKind::Length(keywords) => match parse_number(text) {
                Ok(value) => Ok(value),
                Err(number_error) => match parse_keyword(text) {
                    Ok(keyword) if keywords.contains(&keyword) => Ok(StyleValue::Keyword(keyword)),
                    Ok(_) => Err(self.unexpected(text)),
                    Err(_) => Err(number_error),
                },
            },
            PropertyKind::Keyword(keywords) => {
                let keyword = parse_keyword(text)?;
                if keywords.contains(&keyword) {
                    Ok(StyleValue::Keyword(keyword))
                } else {
                    Err(self.unexpected(text))
                }
            }
        }
    }

    /// Checks that an already-typed value fits this property.
    pub fn validate(self, value: &StyleValue) -> Result<(), StyleError> {
        let accepted = match (self.kind(), value) {
            (_, StyleValue::Unset) => true,
            (PropertyKind::Color, StyleValue::Color(_)) => true,
            (PropertyKind::Length(_), v) if v.is_length() => true,
            (PropertyKind::Length(keywords), StyleValue::Keyword(k))
            | (PropertyKind::Keyword(keywords), StyleValue::Keyword(k)) => keywords.contains(k),
            _ => false,
        };
        if accepted {
            Ok(())
        } else {
            Err(self.unexpected(&value.to_string()))
        }
    }

    fn unexpected(self, text: &str) -> StyleError {
        StyleError::UnexpectedValue {
            property: self.name(),
            value: text.to_string(),
        }
    }
}
