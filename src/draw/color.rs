//! RGBA color type, hex parsing and the plan palette.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use evacplan::draw::Color;
/// let zone = Color::from_hex("#FFFBCC").unwrap();
/// assert_eq!(zone.a, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Builds an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut expanded = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let nibble = c.to_digit(16)? as u8;
                    expanded[i] = nibble * 17;
                }
                Some(Self::from_rgb8(expanded[0], expanded[1], expanded[2]))
            }
            6 | 8 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let mut color = Self::from_rgb8(r, g, b);
                if digits.len() == 8 {
                    color.a = channel(&digits[6..8])? as f64 / 255.0;
                }
                Some(color)
            }
            _ => None,
        }
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut out = format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        );
        if self.a < 1.0 {
            out.push_str(&format!("{:02x}", to_byte(self.a)));
        }
        out
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Multiplies the alpha channel by `opacity` (clamped to 0..=1).
    pub fn faded(self, opacity: f64) -> Self {
        self.with_alpha(self.a * opacity.clamp(0.0, 1.0))
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

/// Maps a color name (case-insensitive) to a palette color.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW_ZONE),
        "zone-green" => Some(GREEN_ZONE),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Pale yellow used for hazard/assembly zones (#FFFBCC)
pub const YELLOW_ZONE: Color = Color::rgb(1.0, 251.0 / 255.0, 204.0 / 255.0);
/// Pale green used for safe zones (#C9E5D1)
pub const GREEN_ZONE: Color = Color::rgb(201.0 / 255.0, 229.0 / 255.0, 209.0 / 255.0);

/// Selection marquee and highlight color
pub const SELECTION: Color = Color::new(0.2, 0.45, 0.95, 1.0);

// Glyph colors used on exported plans
pub const EXIT_GREEN: Color = Color::rgb(0.0, 0.7, 0.0);
pub const FIRE_RED: Color = Color::rgb(0.8, 0.0, 0.0);
pub const FIRST_AID_BLUE: Color = Color::rgb(0.0, 0.0, 0.8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_short_long_and_alpha_forms() {
        assert_eq!(Color::from_hex("#000"), Some(BLACK));
        assert_eq!(Color::from_hex("FFFBCC"), Some(YELLOW_ZONE));
        assert_eq!(Color::from_hex("#C9E5D1"), Some(GREEN_ZONE));

        let translucent = Color::from_hex("#ff000080").expect("valid hex");
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);

        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn hex_formatting_round_trips_palette() {
        assert_eq!(YELLOW_ZONE.to_hex(), "#fffbcc");
        assert_eq!(TRANSPARENT.to_hex(), "#00000000");
        assert_eq!(Color::from_hex(&GREEN_ZONE.to_hex()), Some(GREEN_ZONE));
    }

    #[test]
    fn fading_scales_alpha() {
        let faded = YELLOW_ZONE.faded(0.5);
        assert_eq!(faded.a, 0.5);
        assert_eq!(faded.r, YELLOW_ZONE.r);
        assert_eq!(RED.faded(3.0).a, 1.0);
    }

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(name_to_color("Black"), Some(BLACK));
        assert_eq!(name_to_color("ZONE-GREEN"), Some(GREEN_ZONE));
        assert_eq!(name_to_color("mauve"), None);
    }
}
