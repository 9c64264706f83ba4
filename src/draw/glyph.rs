//! Vector glyphs for evacuation markers.
//!
//! A glyph is a short list of primitives centered on the marker position. The
//! same description feeds the Cairo renderer (y grows down) and the PDF
//! compositor (y grows up); only the triangle apex depends on the axis.

use super::color::{Color, EXIT_GREEN, FIRE_RED, FIRST_AID_BLUE};
use super::symbol::MarkerKind;
use crate::geometry::Point;

const GLYPH_OPACITY: f64 = 0.9;
const EXTINGUISHER_FILL_OPACITY: f64 = 0.3;
const EXTINGUISHER_LINE_WIDTH: f64 = 1.5;

/// Direction of the vertical axis in the target space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    /// Screen/document space
    Down,
    /// PDF user space
    Up,
}

impl YAxis {
    fn up(self) -> f64 {
        match self {
            YAxis::Down => -1.0,
            YAxis::Up => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphPrimitive {
    /// Axis-aligned filled rectangle with its minimum corner at `origin`
    FillRect {
        origin: Point,
        width: f64,
        height: f64,
        color: Color,
    },
    /// Closed stroked outline
    StrokePolygon {
        points: Vec<Point>,
        line_width: f64,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// Builds the glyph for `kind` at `center`.
///
/// Returns an empty list for marker types without a vector glyph; callers
/// decide how to represent those.
pub fn marker_glyph(
    kind: &MarkerKind,
    center: Point,
    size: f64,
    axis: YAxis,
) -> Vec<GlyphPrimitive> {
    let half = size / 2.0;
    let Point { x, y } = center;
    match kind {
        MarkerKind::Exit => vec![GlyphPrimitive::FillRect {
            origin: Point::new(x - half, y - half),
            width: size,
            height: size,
            color: EXIT_GREEN.with_alpha(GLYPH_OPACITY),
        }],
        MarkerKind::FireExtinguisher => {
            let up = axis.up();
            let apex = Point::new(x, y + up * half);
            let left = Point::new(x - half, y - up * half);
            let right = Point::new(x + half, y - up * half);
            vec![
                GlyphPrimitive::FillRect {
                    origin: Point::new(x - half, y - half),
                    width: size,
                    height: size,
                    color: FIRE_RED.with_alpha(EXTINGUISHER_FILL_OPACITY),
                },
                GlyphPrimitive::StrokePolygon {
                    points: vec![apex, left, right],
                    line_width: EXTINGUISHER_LINE_WIDTH,
                    color: FIRE_RED,
                },
            ]
        }
        MarkerKind::FireAlarm => vec![GlyphPrimitive::FillCircle {
            center,
            radius: size,
            color: FIRE_RED.with_alpha(GLYPH_OPACITY),
        }],
        MarkerKind::FirstAid => {
            let color = FIRST_AID_BLUE.with_alpha(GLYPH_OPACITY);
            vec![
                GlyphPrimitive::FillRect {
                    origin: Point::new(x - half, y - size / 6.0),
                    width: size,
                    height: size / 3.0,
                    color,
                },
                GlyphPrimitive::FillRect {
                    origin: Point::new(x - size / 6.0, y - half),
                    width: size / 3.0,
                    height: size,
                    color,
                },
            ]
        }
        _ => Vec::new(),
    }
}
