//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::tool::RectangleMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool defaults.
///
/// Controls the colors, widths and text settings new shapes start with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Outline color for lines, rectangles, circles, free lines and text
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Fill for the yellow zone rectangle and polygon tools
    #[serde(default = "default_yellow_fill")]
    pub yellow_fill: ColorSpec,

    /// Fill for the green zone rectangle and polygon tools
    #[serde(default = "default_green_fill")]
    pub green_fill: ColorSpec,

    /// Stroke width in document pixels (valid range: 0.5 - 20.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Opacity multiplied into zone fills (valid range: 0.0 - 1.0)
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,

    /// Font size for text shapes (valid range: 6.0 - 96.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Pango font family for text shapes
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Content of newly placed text shapes
    #[serde(default = "default_text")]
    pub default_text: String,

    /// Screen distance from the first vertex that closes a polygon (valid range: 1.0 - 50.0)
    #[serde(default = "default_polygon_close_distance")]
    pub polygon_close_distance: f64,

    /// Zone rectangle entry: "drag" (press and release) or "click" (two clicks)
    #[serde(default)]
    pub rectangle_mode: RectangleMode,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            yellow_fill: default_yellow_fill(),
            green_fill: default_green_fill(),
            line_width: default_line_width(),
            fill_opacity: default_fill_opacity(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            default_text: default_text(),
            polygon_close_distance: default_polygon_close_distance(),
            rectangle_mode: RectangleMode::default(),
        }
    }
}

/// Wall tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WallConfig {
    /// Wall thickness in document pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_wall_thickness")]
    pub thickness: f64,

    /// Snap wall direction to multiples of 45 degrees
    #[serde(default = "default_true")]
    pub snap_to_angle: bool,

    /// Snap wall points onto nearby wall endpoints
    #[serde(default = "default_true")]
    pub snap_to_walls: bool,

    /// Pull wall chain vertices onto nearby walls and lines
    #[serde(default = "default_true")]
    pub snap_to_lines: bool,

    /// Align wall chain edges with perpendiculars at wall and line ends
    #[serde(default = "default_true")]
    pub snap_to_extensions: bool,

    /// Endpoint snap radius in screen pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_snap_distance")]
    pub snap_distance: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            thickness: default_wall_thickness(),
            snap_to_angle: default_true(),
            snap_to_walls: default_true(),
            snap_to_lines: default_true(),
            snap_to_extensions: default_true(),
            snap_distance: default_snap_distance(),
        }
    }
}

/// Zoom and pan behavior.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    /// Smallest zoom factor; the view is fixed at this scale
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,

    /// Largest zoom factor, must exceed `min_scale`
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,

    /// Scale change per unit of Ctrl+wheel delta
    #[serde(default = "default_sensitivity")]
    pub wheel_sensitivity: f64,

    /// Scale change per pixel of pinch distance
    #[serde(default = "default_sensitivity")]
    pub pinch_sensitivity: f64,

    /// Minimum finger distance change (px) before a pinch zooms
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold: f64,

    /// Hold time (ms) before one finger pans at minimum zoom
    #[serde(default = "default_pan_hold_ms")]
    pub pan_hold_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            wheel_sensitivity: default_sensitivity(),
            pinch_sensitivity: default_sensitivity(),
            pinch_threshold: default_pinch_threshold(),
            pan_hold_ms: default_pan_hold_ms(),
        }
    }
}

/// PDF export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Marker glyph edge length in PDF points (valid range: 4.0 - 100.0)
    #[serde(default = "default_glyph_size")]
    pub glyph_size: f64,

    /// Overlay width the plan was drawn against
    #[serde(default = "default_container_width")]
    pub container_width: f64,

    /// Overlay height the plan was drawn against
    #[serde(default = "default_container_height")]
    pub container_height: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            glyph_size: default_glyph_size(),
            container_width: default_container_width(),
            container_height: default_container_height(),
        }
    }
}

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_yellow_fill() -> ColorSpec {
    ColorSpec::Name("#FFFBCC".to_string())
}

fn default_green_fill() -> ColorSpec {
    ColorSpec::Name("#C9E5D1".to_string())
}

fn default_line_width() -> f64 {
    2.0
}

fn default_fill_opacity() -> f64 {
    0.5
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_text() -> String {
    "Sample Text".to_string()
}

fn default_polygon_close_distance() -> f64 {
    10.0
}

fn default_wall_thickness() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

fn default_snap_distance() -> f64 {
    10.0
}

fn default_min_scale() -> f64 {
    crate::viewport::DEFAULT_MIN_SCALE
}

fn default_max_scale() -> f64 {
    crate::viewport::DEFAULT_MAX_SCALE
}

fn default_sensitivity() -> f64 {
    0.01
}

fn default_pinch_threshold() -> f64 {
    5.0
}

fn default_pan_hold_ms() -> u64 {
    200
}

fn default_glyph_size() -> f64 {
    crate::export::DEFAULT_GLYPH_SIZE
}

fn default_container_width() -> f64 {
    800.0
}

fn default_container_height() -> f64 {
    600.0
}
