// crates/lattice-core/src/parse.rs
//! Text to [`StyleValue`] conversion.
//!
//! Every parser here is total: it either returns a fully formed value or a
//! [`StyleError`], so a caller that only writes on `Ok` never ends up with a
//! half-written property.

use crate::{Color, Keyword, StyleValue};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Unknown keyword: {0:?}")]
    UnknownKeyword(String),

    #[error("Unknown property: {0:?}")]
    UnknownProperty(String),

    #[error("Property {property} does not accept {value:?}")]
    UnexpectedValue { property: &'static str, value: String },
}

/// Parses a length such as `12`, `-3.5px`, `10pt`, `50%`, `4dp` or `2sp`.
///
/// A missing unit means pixels. Units are case-insensitive.
pub fn parse_number(raw: &str) -> Result<StyleValue, StyleError> {
    let invalid = || StyleError::InvalidNumber(raw.to_string());
    let text = raw.trim();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0;
    let mut has_point = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !has_point => has_point = true,
            b'.' => return Err(invalid()),
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return Err(invalid());
    }

    let magnitude: f32 = text[..end].parse().map_err(|_| invalid())?;
    let unit = text[end..].to_ascii_lowercase();
    let value = match unit.as_str() {
        "" | "px" => StyleValue::Pixels(magnitude),
        "pt" => StyleValue::Points(magnitude),
        "%" => StyleValue::Percentage(magnitude / 100.0),
        "dp" | "dip" => StyleValue::Dips(magnitude),
        "sp" => StyleValue::ScaledPixels(magnitude),
        _ => return Err(invalid()),
    };
    Ok(value)
}

/// Parses `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgba(r,g,b,a)` or `transparent`.
///
/// Channels are clamped to 0..=255. The alpha of `rgba` is a fraction in
/// 0.0..=1.0 when written with a decimal point and a plain byte otherwise.
/// Fractions are scaled with `round(a * 255)`, so `0.5` becomes 128.
pub fn parse_color(raw: &str) -> Result<StyleValue, StyleError> {
    let invalid = || StyleError::InvalidColor(raw.to_string());
    let text = raw.trim();

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).map(StyleValue::Color).ok_or_else(invalid);
    }

    let lower = text.to_ascii_lowercase();
    if lower == "transparent" {
        return Ok(StyleValue::Color(Color::TRANSPARENT));
    }

    let (name, args) = split_function(&lower).ok_or_else(invalid)?;
    let tokens: Vec<&str> = args.split(',').map(str::trim).collect();
    let color = match (name, tokens.as_slice()) {
        ("rgb", [r, g, b]) => Color::rgb(
            parse_channel(r).ok_or_else(invalid)?,
            parse_channel(g).ok_or_else(invalid)?,
            parse_channel(b).ok_or_else(invalid)?,
        ),
        ("rgba", [r, g, b, a]) => Color::rgba(
            parse_channel(r).ok_or_else(invalid)?,
            parse_channel(g).ok_or_else(invalid)?,
            parse_channel(b).ok_or_else(invalid)?,
            parse_alpha(a).ok_or_else(invalid)?,
        ),
        _ => return Err(invalid()),
    };
    Ok(StyleValue::Color(color))
}

pub fn parse_keyword(raw: &str) -> Result<Keyword, StyleError> {
    let text = raw.trim();
    Keyword::ALL
        .into_iter()
        .find(|keyword| keyword.as_str().eq_ignore_ascii_case(text))
        .ok_or_else(|| StyleError::UnknownKeyword(raw.to_string()))
}

fn split_function(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let inner = text[open + 1..].strip_suffix(')')?;
    Some((text[..open].trim(), inner))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let component = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(
            component(0..1)? * 17,
            component(1..2)? * 17,
            component(2..3)? * 17,
        )),
        6 => Some(Color::rgb(
            component(0..2)?,
            component(2..4)?,
            component(4..6)?,
        )),
        _ => None,
    }
}

fn parse_finite(token: &str) -> Option<f64> {
    let value: f64 = token.parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_channel(token: &str) -> Option<u8> {
    let value = parse_finite(token)?;
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(token: &str) -> Option<u8> {
    let value = parse_finite(token)?;
    if token.contains('.') {
        Some((value.clamp(0.0, 1.0) * 255.0).round() as u8)
    } else {
        Some(value.round().clamp(0.0, 255.0) as u8)
    }
}
