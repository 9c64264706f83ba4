//! Shape definitions for plan annotations.

use super::color::Color;
use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Average glyph advance relative to font size, used for text bounds.
const TEXT_ADVANCE_RATIO: f64 = 0.6;

/// Stable identity of a committed shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Discriminant of [`ShapeKind`] as it appears in project files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    Line,
    Rectangle,
    Circle,
    FreeLine,
    Text,
    Polygon,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Line => "line",
            ShapeType::Rectangle => "rectangle",
            ShapeType::Circle => "circle",
            ShapeType::FreeLine => "free-line",
            ShapeType::Text => "text",
            ShapeType::Polygon => "polygon",
        }
    }
}

/// Stroke and fill settings shared by every outline shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Outline color
    pub stroke: Color,
    /// Interior color; the renderer multiplies its alpha by the fill opacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    /// Outline width in document units
    pub line_width: f64,
}

impl ShapeStyle {
    pub fn stroked(stroke: Color, line_width: f64) -> Self {
        Self {
            stroke,
            fill: None,
            line_width,
        }
    }

    pub fn with_fill(self, fill: Color) -> Self {
        Self {
            fill: Some(fill),
            ..self
        }
    }
}

/// Geometry of a shape. Each variant carries only the fields it needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Straight segment between two points
    Line {
        start: Point,
        end: Point,
        style: ShapeStyle,
    },
    /// Axis-aligned rectangle spanned by two opposite corners
    Rectangle {
        start: Point,
        end: Point,
        style: ShapeStyle,
    },
    /// Circle centered on `start` passing through `end`
    Circle {
        start: Point,
        end: Point,
        style: ShapeStyle,
    },
    /// Freehand polyline in drawing order
    FreeLine {
        points: Vec<Point>,
        style: ShapeStyle,
    },
    /// Implicitly closed polygon
    Polygon {
        points: Vec<Point>,
        style: ShapeStyle,
    },
    /// Single line of text with its baseline origin at `start`
    Text {
        start: Point,
        text: String,
        font_size: f64,
        color: Color,
    },
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Line { .. } => ShapeType::Line,
            ShapeKind::Rectangle { .. } => ShapeType::Rectangle,
            ShapeKind::Circle { .. } => ShapeType::Circle,
            ShapeKind::FreeLine { .. } => ShapeType::FreeLine,
            ShapeKind::Polygon { .. } => ShapeType::Polygon,
            ShapeKind::Text { .. } => ShapeType::Text,
        }
    }

    pub fn style(&self) -> Option<&ShapeStyle> {
        match self {
            ShapeKind::Line { style, .. }
            | ShapeKind::Rectangle { style, .. }
            | ShapeKind::Circle { style, .. }
            | ShapeKind::FreeLine { style, .. }
            | ShapeKind::Polygon { style, .. } => Some(style),
            ShapeKind::Text { .. } => None,
        }
    }

    /// Radius of a circle, derived from its two points.
    pub fn radius(&self) -> Option<f64> {
        match self {
            ShapeKind::Circle { start, end, .. } => Some(start.distance(*end)),
            _ => None,
        }
    }

    /// Moves the tracking point of an in-progress shape.
    ///
    /// Two-point shapes replace `end`. Free lines append the point unless it
    /// repeats the last one, so replaying a move is harmless. Polygons and
    /// text are left untouched.
    pub fn update(&mut self, point: Point) {
        match self {
            ShapeKind::Line { end, .. }
            | ShapeKind::Rectangle { end, .. }
            | ShapeKind::Circle { end, .. } => *end = point,
            ShapeKind::FreeLine { points, .. } => {
                if points.last() != Some(&point) {
                    points.push(point);
                }
            }
            ShapeKind::Polygon { .. } | ShapeKind::Text { .. } => {}
        }
    }

    /// Whether the renderer would paint anything for this geometry.
    pub fn is_drawable(&self) -> bool {
        match self {
            ShapeKind::FreeLine { points, .. } => points.len() >= 2,
            ShapeKind::Polygon { points, .. } => points.len() >= 3,
            ShapeKind::Text { text, .. } => !text.is_empty(),
            _ => true,
        }
    }

    /// Axis-aligned bounds of the geometry, padded by half the line width.
    pub fn bounds(&self) -> Option<Bounds> {
        let pad = self.style().map_or(0.0, |s| s.line_width / 2.0);
        let raw = match self {
            ShapeKind::Line { start, end, .. } | ShapeKind::Rectangle { start, end, .. } => {
                Bounds::from_corners(*start, *end)
            }
            ShapeKind::Circle { start, end, .. } => {
                let r = start.distance(*end);
                Bounds::from_corners(
                    Point::new(start.x - r, start.y - r),
                    Point::new(start.x + r, start.y + r),
                )
            }
            ShapeKind::FreeLine { points, .. } | ShapeKind::Polygon { points, .. } => {
                Bounds::from_points(points)?
            }
            ShapeKind::Text {
                start,
                text,
                font_size,
                ..
            } => {
                let width = text.chars().count() as f64 * font_size * TEXT_ADVANCE_RATIO;
                Bounds::from_corners(
                    Point::new(start.x, start.y - font_size),
                    Point::new(start.x + width, start.y),
                )
            }
        };
        Some(raw.inflate(pad))
    }

    /// Returns a copy shifted by `delta`.
    pub fn translated(&self, delta: Point) -> ShapeKind {
        let mut moved = self.clone();
        match &mut moved {
            ShapeKind::Line { start, end, .. }
            | ShapeKind::Rectangle { start, end, .. }
            | ShapeKind::Circle { start, end, .. } => {
                *start = *start + delta;
                *end = *end + delta;
            }
            ShapeKind::FreeLine { points, .. } | ShapeKind::Polygon { points, .. } => {
                for p in points.iter_mut() {
                    *p = *p + delta;
                }
            }
            ShapeKind::Text { start, .. } => *start = *start + delta,
        }
        moved
    }
}

/// A committed shape: immutable id plus geometry.
///
/// Edits never mutate a shape in place; they build a replacement with the
/// same id via [`Shape::with_kind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    /// Builds a replacement entry that keeps this shape's id.
    pub fn with_kind(&self, kind: ShapeKind) -> Self {
        Self { id: self.id, kind }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.kind.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, YELLOW_ZONE};

    fn style() -> ShapeStyle {
        ShapeStyle::stroked(BLACK, 2.0)
    }

    #[test]
    fn circle_radius_tracks_end_point() {
        let mut circle = ShapeKind::Circle {
            start: Point::new(10.0, 10.0),
            end: Point::new(10.0, 10.0),
            style: style(),
        };
        assert_eq!(circle.radius(), Some(0.0));
        circle.update(Point::new(13.0, 14.0));
        assert_eq!(circle.radius(), Some(5.0));
    }

    #[test]
    fn free_line_update_skips_repeated_points() {
        let mut line = ShapeKind::FreeLine {
            points: vec![Point::new(0.0, 0.0)],
            style: style(),
        };
        line.update(Point::new(1.0, 1.0));
        line.update(Point::new(1.0, 1.0));
        line.update(Point::new(2.0, 1.0));
        match line {
            ShapeKind::FreeLine { points, .. } => assert_eq!(points.len(), 3),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn text_ignores_updates() {
        let mut text = ShapeKind::Text {
            start: Point::new(5.0, 5.0),
            text: "Exit".into(),
            font_size: 16.0,
            color: BLACK,
        };
        let before = text.clone();
        text.update(Point::new(50.0, 50.0));
        assert_eq!(text, before);
    }

    #[test]
    fn replacement_keeps_identity() {
        let shape = Shape::new(ShapeKind::Rectangle {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 10.0),
            style: style().with_fill(YELLOW_ZONE),
        });
        let moved = shape.with_kind(shape.kind().translated(Point::new(5.0, -5.0)));
        assert_eq!(moved.id(), shape.id());
        match moved.kind() {
            ShapeKind::Rectangle { start, end, .. } => {
                assert_eq!(*start, Point::new(5.0, -5.0));
                assert_eq!(*end, Point::new(15.0, 5.0));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn bounds_include_stroke_padding() {
        let line = ShapeKind::Line {
            start: Point::new(10.0, 0.0),
            end: Point::new(0.0, 10.0),
            style: style(),
        };
        let bounds = line.bounds().expect("line bounds");
        assert_eq!(bounds.min, Point::new(-1.0, -1.0));
        assert_eq!(bounds.max, Point::new(11.0, 11.0));
    }

    #[test]
    fn drawability_follows_point_minimums() {
        let free = ShapeKind::FreeLine {
            points: vec![Point::ORIGIN],
            style: style(),
        };
        assert!(!free.is_drawable());
        let polygon = ShapeKind::Polygon {
            points: vec![Point::ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            style: style(),
        };
        assert!(polygon.is_drawable());
    }

    #[test]
    fn shapes_serialize_with_kebab_case_tags() {
        let shape = Shape::new(ShapeKind::FreeLine {
            points: vec![Point::ORIGIN, Point::new(1.0, 1.0)],
            style: style(),
        });
        let json = serde_json::to_value(&shape).expect("serialize");
        assert_eq!(json["kind"]["type"], "free-line");
        let back: Shape = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, shape);
    }
}
