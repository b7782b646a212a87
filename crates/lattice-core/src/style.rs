// crates/lattice-core/src/style.rs

use crate::{Color, Keyword, LayoutDimension, Metrics, PropertyId, Sides, StyleValue};
use std::collections::BTreeMap;

/// The final per-widget style values, as delivered by the cascade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTable {
    properties: BTreeMap<PropertyId, StyleValue>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing properties read as [`StyleValue::Unset`].
    pub fn get(&self, property: PropertyId) -> StyleValue {
        self.properties.get(&property).copied().unwrap_or_default()
    }

    pub fn set(&mut self, property: PropertyId, value: StyleValue) -> Option<StyleValue> {
        if value.is_unset() {
            self.properties.remove(&property)
        } else {
            self.properties.insert(property, value)
        }
    }

    pub fn remove(&mut self, property: PropertyId) -> Option<StyleValue> {
        self.properties.remove(&property)
    }

    pub fn keyword(&self, property: PropertyId) -> Option<Keyword> {
        self.get(property).as_keyword()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, StyleValue)> + '_ {
        self.properties.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    InlineBlock,
    /// Block-level box whose children are placed in flex lines.
    Flex,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    #[default]
    Stretch,
}

/// Child placement settings of a `display: flex` widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlexStyle {
    pub direction: FlexDirection,
    pub wrap: bool,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
}

impl StyleTable {
    pub fn display(&self) -> Display {
        match self.keyword(PropertyId::Display) {
            Some(Keyword::InlineBlock) => Display::InlineBlock,
            Some(Keyword::Flex) => Display::Flex,
            Some(Keyword::None) => Display::None,
            _ => Display::Block,
        }
    }

    pub fn position(&self) -> Position {
        match self.keyword(PropertyId::Position) {
            Some(Keyword::Absolute) => Position::Absolute,
            Some(Keyword::Relative) => Position::Relative,
            _ => Position::Static,
        }
    }

    pub fn box_sizing(&self) -> BoxSizing {
        match self.keyword(PropertyId::BoxSizing) {
            Some(Keyword::BorderBox) => BoxSizing::BorderBox,
            _ => BoxSizing::ContentBox,
        }
    }

    pub fn visible(&self) -> bool {
        self.keyword(PropertyId::Visibility) != Some(Keyword::Hidden)
    }

    pub fn flex(&self) -> FlexStyle {
        FlexStyle {
            direction: match self.keyword(PropertyId::FlexDirection) {
                Some(Keyword::Column) => FlexDirection::Column,
                _ => FlexDirection::Row,
            },
            wrap: self.keyword(PropertyId::FlexWrap) == Some(Keyword::Wrap),
            justify_content: match self.keyword(PropertyId::JustifyContent) {
                Some(Keyword::FlexEnd) => JustifyContent::FlexEnd,
                Some(Keyword::Center) => JustifyContent::Center,
                Some(Keyword::SpaceBetween) => JustifyContent::SpaceBetween,
                Some(Keyword::SpaceAround) => JustifyContent::SpaceAround,
                Some(Keyword::SpaceEvenly) => JustifyContent::SpaceEvenly,
                _ => JustifyContent::FlexStart,
            },
            align_items: match self.keyword(PropertyId::AlignItems) {
                Some(Keyword::FlexStart) => AlignItems::FlexStart,
                Some(Keyword::FlexEnd) => AlignItems::FlexEnd,
                Some(Keyword::Center) => AlignItems::Center,
                _ => AlignItems::Stretch,
            },
        }
    }
}

/// Style values resolved to layout units for one widget.
///
/// Lengths are still relative (percentages, keywords); the reflow engine
/// resolves them against the containing block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub width: LayoutDimension,
    pub height: LayoutDimension,
    pub min_width: LayoutDimension,
    pub min_height: LayoutDimension,
    pub max_width: LayoutDimension,
    pub max_height: LayoutDimension,
    pub margin: Sides<LayoutDimension>,
    pub padding: Sides<LayoutDimension>,
    pub border_width: Sides<LayoutDimension>,
    pub left: LayoutDimension,
    pub top: LayoutDimension,
    pub display: Display,
    pub flex: FlexStyle,
    pub position: Position,
    pub box_sizing: BoxSizing,
    pub visible: bool,
    pub background_color: Color,
    pub border_color: Color,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::compute(&StyleTable::default(), &Metrics::default())
    }
}

impl ComputedStyle {
    pub fn compute(table: &StyleTable, metrics: &Metrics) -> Self {
        let dim = |property| LayoutDimension::from_style(&table.get(property), metrics);
        // Unset edges are zero; only an explicit `auto` margin is auto.
        let edge = |property| match table.get(property) {
            StyleValue::Unset => LayoutDimension::Pixels(0.0),
            value => LayoutDimension::from_style(&value, metrics),
        };
        Self {
            width: dim(PropertyId::Width),
            height: dim(PropertyId::Height),
            min_width: dim(PropertyId::MinWidth),
            min_height: dim(PropertyId::MinHeight),
            max_width: dim(PropertyId::MaxWidth),
            max_height: dim(PropertyId::MaxHeight),
            margin: Sides {
                top: edge(PropertyId::MarginTop),
                right: edge(PropertyId::MarginRight),
                bottom: edge(PropertyId::MarginBottom),
                left: edge(PropertyId::MarginLeft),
            },
            padding: Sides {
                top: edge(PropertyId::PaddingTop),
                right: edge(PropertyId::PaddingRight),
                bottom: edge(PropertyId::PaddingBottom),
                left: edge(PropertyId::PaddingLeft),
            },
            border_width: Sides {
                top: edge(PropertyId::BorderTopWidth),
                right: edge(PropertyId::BorderRightWidth),
                bottom: edge(PropertyId::BorderBottomWidth),
                left: edge(PropertyId::BorderLeftWidth),
            },
            left: dim(PropertyId::Left),
            top: dim(PropertyId::Top),
            display: table.display(),
            flex: table.flex(),
            position: table.position(),
            box_sizing: table.box_sizing(),
            visible: table.visible(),
            background_color: table
                .get(PropertyId::BackgroundColor)
                .as_color()
                .unwrap_or(Color::TRANSPARENT),
            border_color: table
                .get(PropertyId::BorderColor)
                .as_color()
                .unwrap_or(Color::TRANSPARENT),
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }

    /// Margins with `auto` sides marked, in left/right order.
    pub fn auto_inline_margins(&self) -> (bool, bool) {
        (
            self.margin.left == LayoutDimension::Auto,
            self.margin.right == LayoutDimension::Auto,
        )
    }

    /// Same as [`Self::auto_inline_margins`] for top/bottom.
    pub fn auto_block_margins(&self) -> (bool, bool) {
        (
            self.margin.top == LayoutDimension::Auto,
            self.margin.bottom == LayoutDimension::Auto,
        )
    }
}
