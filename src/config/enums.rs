//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a name, a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "black"
///
/// # Hex string
/// yellow_fill = "#FFFBCC"
///
/// # RGB color (0-255 per component)
/// green_fill = [201, 229, 209]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (black, white, red, green, blue, yellow, zone-green) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`].
    ///
    /// Strings starting with `#` are parsed as hex, anything else is looked up
    /// by name. Unparseable values fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) if name.trim_start().starts_with('#') => {
                Color::from_hex(name).unwrap_or_else(|| {
                    warn!("Invalid hex color '{}', using {}", name, fallback.to_hex());
                    fallback
                })
            }
            ColorSpec::Name(name) => name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using {}", name, fallback.to_hex());
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    pub fn to_color(&self) -> Color {
        self.to_color_or(BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_name_and_rgb_forms_resolve() {
        assert_eq!(ColorSpec::Name("#FFFBCC".into()).to_color(), YELLOW_ZONE);
        assert_eq!(ColorSpec::Name("Red".into()).to_color(), RED);
        assert_eq!(ColorSpec::Rgb([201, 229, 209]).to_color(), GREEN_ZONE);
    }

    #[test]
    fn unknown_values_use_fallback() {
        assert_eq!(ColorSpec::Name("mauve".into()).to_color_or(WHITE), WHITE);
        assert_eq!(ColorSpec::Name("#12".into()).to_color_or(WHITE), WHITE);
    }
}
