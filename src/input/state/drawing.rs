//! Per-tool drawing state machine.

use crate::draw::{ShapeKind, ShapeStyle};
use crate::geometry::Point;
use crate::input::tool::{Tool, ToolPalette};
use log::debug;

/// Values copied into new shapes when drawing starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingDefaults {
    pub palette: ToolPalette,
    pub font_size: f64,
    pub text: String,
}

/// Current drawing mode state machine.
///
/// `Idle` -> `Drawing` on pointer-down with a simple tool, back to `Idle` on
/// pointer-up ([`DrawingState::end`]). Polygon tools, including the wall
/// chain tool, enter `Polygon` and collect vertices until
/// [`DrawingState::finish`] succeeds. Any state can be
/// dropped with [`DrawingState::abort`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DrawingState {
    /// Not drawing anything
    #[default]
    Idle,
    /// Dragging out a simple shape
    Drawing {
        tool: Tool,
        /// Where the pointer went down
        start: Point,
        /// Live preview that becomes the committed shape
        shape: ShapeKind,
    },
    /// Collecting polygon vertices
    Polygon {
        tool: Tool,
        style: ShapeStyle,
        /// Committed vertices in click order
        vertices: Vec<Point>,
        /// Rubber-band end following the pointer
        cursor: Option<Point>,
    },
}

impl DrawingState {
    /// Begins a shape for `tool` at `point`.
    ///
    /// Only valid from `Idle` and for shape tools; otherwise nothing happens
    /// and `false` is returned.
    pub fn start(&mut self, tool: Tool, point: Point, defaults: &DrawingDefaults) -> bool {
        if !matches!(self, DrawingState::Idle) || !point.is_finite() {
            return false;
        }
        let style = tool.style(&defaults.palette);
        let shape = match tool {
            Tool::Select | Tool::Wall => return false,
            Tool::WallPolygon | Tool::YellowPolygon | Tool::GreenPolygon => {
                *self = DrawingState::Polygon {
                    tool,
                    style,
                    vertices: vec![point],
                    cursor: None,
                };
                debug!("Polygon started with {tool} at {point:?}");
                return true;
            }
            Tool::Line => ShapeKind::Line {
                start: point,
                end: point,
                style,
            },
            Tool::Rectangle | Tool::YellowRectangle | Tool::GreenRectangle => {
                ShapeKind::Rectangle {
                    start: point,
                    end: point,
                    style,
                }
            }
            Tool::Circle => ShapeKind::Circle {
                start: point,
                end: point,
                style,
            },
            Tool::FreeLine => ShapeKind::FreeLine {
                points: vec![point],
                style,
            },
            Tool::Text => ShapeKind::Text {
                start: point,
                text: defaults.text.clone(),
                font_size: defaults.font_size,
                color: defaults.palette.stroke,
            },
        };
        *self = DrawingState::Drawing {
            tool,
            start: point,
            shape,
        };
        true
    }

    /// Feeds a pointer move into the in-progress shape or polygon preview.
    pub fn update(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            return false;
        }
        match self {
            DrawingState::Idle => false,
            DrawingState::Drawing { shape, .. } => {
                shape.update(point);
                true
            }
            DrawingState::Polygon { cursor, .. } => {
                *cursor = Some(point);
                true
            }
        }
    }

    /// Commits a permanent polygon vertex.
    pub fn add_vertex(&mut self, point: Point) -> bool {
        match self {
            DrawingState::Polygon { vertices, .. } if point.is_finite() => {
                vertices.push(point);
                true
            }
            _ => false,
        }
    }

    /// Whether enough vertices exist for [`DrawingState::finish`] to succeed.
    pub fn can_finish(&self) -> bool {
        match self {
            DrawingState::Polygon { tool, vertices, .. } => vertices.len() >= tool.min_vertices(),
            _ => false,
        }
    }

    /// Completes the vertex collection and returns the shapes to commit.
    ///
    /// Zone polygons close into a single polygon once they have three
    /// vertices. [`Tool::WallPolygon`] needs two and yields an open chain:
    /// one line per consecutive vertex pair, in click order. With too few
    /// vertices nothing is returned and drawing continues.
    pub fn finish(&mut self) -> Vec<ShapeKind> {
        if !self.can_finish() {
            return Vec::new();
        }
        let DrawingState::Polygon {
            tool,
            style,
            vertices,
            ..
        } = std::mem::take(self)
        else {
            return Vec::new();
        };
        if tool == Tool::WallPolygon {
            vertices
                .windows(2)
                .map(|pair| ShapeKind::Line {
                    start: pair[0],
                    end: pair[1],
                    style,
                })
                .collect()
        } else {
            vec![ShapeKind::Polygon {
                points: vertices,
                style,
            }]
        }
    }

    /// Ends a simple shape on pointer-up and hands it back for committing.
    ///
    /// Degenerate shapes (zero-length lines, empty rectangles) are returned
    /// as well. Polygon mode ignores this call.
    pub fn end(&mut self) -> Option<ShapeKind> {
        match std::mem::take(self) {
            DrawingState::Drawing { shape, .. } => Some(shape),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Drops any in-progress work. Returns `true` if something was discarded.
    pub fn abort(&mut self) -> bool {
        let was_active = self.is_active();
        *self = DrawingState::Idle;
        was_active
    }

    /// Whether a simple shape or a polygon is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, DrawingState::Idle)
    }

    /// Whether a simple shape is being dragged out.
    pub fn is_drawing(&self) -> bool {
        matches!(self, DrawingState::Drawing { .. })
    }

    pub fn is_polygon_mode(&self) -> bool {
        matches!(self, DrawingState::Polygon { .. })
    }

    pub fn tool(&self) -> Option<Tool> {
        match self {
            DrawingState::Idle => None,
            DrawingState::Drawing { tool, .. } | DrawingState::Polygon { tool, .. } => Some(*tool),
        }
    }

    pub fn start_point(&self) -> Option<Point> {
        match self {
            DrawingState::Idle => None,
            DrawingState::Drawing { start, .. } => Some(*start),
            DrawingState::Polygon { vertices, .. } => vertices.first().copied(),
        }
    }

    pub fn current_shape(&self) -> Option<&ShapeKind> {
        match self {
            DrawingState::Drawing { shape, .. } => Some(shape),
            _ => None,
        }
    }

    /// Points accumulated by a free line in progress.
    pub fn current_points(&self) -> &[Point] {
        match self {
            DrawingState::Drawing {
                shape: ShapeKind::FreeLine { points, .. },
                ..
            } => points,
            _ => &[],
        }
    }

    pub fn polygon_points(&self) -> &[Point] {
        match self {
            DrawingState::Polygon { vertices, .. } => vertices,
            _ => &[],
        }
    }

    pub fn polygon_style(&self) -> Option<&ShapeStyle> {
        match self {
            DrawingState::Polygon { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn polygon_cursor(&self) -> Option<Point> {
        match self {
            DrawingState::Polygon { cursor, .. } => *cursor,
            _ => None,
        }
    }
}
