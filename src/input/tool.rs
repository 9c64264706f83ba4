//! Drawing tool selection.

use crate::draw::color::{Color, TRANSPARENT};
use crate::draw::{ShapeStyle, ShapeType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection. Exactly one tool is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Select, move and delete shapes and symbols
    #[default]
    Select,
    /// Two-click wall placement
    Wall,
    /// Open chain of thick wall lines drawn vertex by vertex
    WallPolygon,
    YellowRectangle,
    YellowPolygon,
    GreenRectangle,
    GreenPolygon,
    /// Freehand polyline following the pointer
    FreeLine,
    Rectangle,
    Text,
    Line,
    Circle,
}

/// Colors and widths the tools draw with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolPalette {
    pub stroke: Color,
    pub yellow_fill: Color,
    pub green_fill: Color,
    pub line_width: f64,
    /// Line width for wall chains drawn with [`Tool::WallPolygon`]
    pub wall_thickness: f64,
}

/// How the zone rectangle tools take their corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RectangleMode {
    /// Press at one corner, release at the other
    #[default]
    Drag,
    /// First click sets one corner, second click the other
    Click,
}

impl RectangleMode {
    pub fn toggled(self) -> Self {
        match self {
            RectangleMode::Drag => RectangleMode::Click,
            RectangleMode::Click => RectangleMode::Drag,
        }
    }
}

impl Tool {
    pub const ALL: [Tool; 12] = [
        Tool::Select,
        Tool::Wall,
        Tool::WallPolygon,
        Tool::YellowRectangle,
        Tool::YellowPolygon,
        Tool::GreenRectangle,
        Tool::GreenPolygon,
        Tool::FreeLine,
        Tool::Rectangle,
        Tool::Text,
        Tool::Line,
        Tool::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Wall => "wall",
            Tool::WallPolygon => "wall-polygon",
            Tool::YellowRectangle => "yellow-rectangle",
            Tool::YellowPolygon => "yellow-polygon",
            Tool::GreenRectangle => "green-rectangle",
            Tool::GreenPolygon => "green-polygon",
            Tool::FreeLine => "free-line",
            Tool::Rectangle => "rectangle",
            Tool::Text => "text",
            Tool::Line => "line",
            Tool::Circle => "circle",
        }
    }

    /// Kind of shape this tool produces, if it draws shapes at all.
    pub fn shape_type(&self) -> Option<ShapeType> {
        match self {
            Tool::Select | Tool::Wall => None,
            Tool::YellowPolygon | Tool::GreenPolygon => Some(ShapeType::Polygon),
            Tool::YellowRectangle | Tool::GreenRectangle | Tool::Rectangle => {
                Some(ShapeType::Rectangle)
            }
            Tool::FreeLine => Some(ShapeType::FreeLine),
            Tool::Text => Some(ShapeType::Text),
            Tool::WallPolygon | Tool::Line => Some(ShapeType::Line),
            Tool::Circle => Some(ShapeType::Circle),
        }
    }

    /// Polygon tools collect vertices one click at a time.
    pub fn is_polygon(&self) -> bool {
        matches!(self, Tool::WallPolygon | Tool::YellowPolygon | Tool::GreenPolygon)
    }

    /// Zone rectangles honor [`RectangleMode`].
    pub fn is_zone_rectangle(&self) -> bool {
        matches!(self, Tool::YellowRectangle | Tool::GreenRectangle)
    }

    /// Vertices needed before a polygon tool can finish.
    pub fn min_vertices(&self) -> usize {
        if *self == Tool::WallPolygon { 2 } else { 3 }
    }

    /// Zone fill color for this tool.
    pub fn fill(&self, palette: &ToolPalette) -> Option<Color> {
        match self {
            Tool::YellowRectangle | Tool::YellowPolygon => Some(palette.yellow_fill),
            Tool::GreenRectangle | Tool::GreenPolygon => Some(palette.green_fill),
            Tool::Select
            | Tool::Wall
            | Tool::WallPolygon
            | Tool::FreeLine
            | Tool::Rectangle
            | Tool::Text
            | Tool::Line
            | Tool::Circle => None,
        }
    }

    /// Full stroke/fill style for shapes drawn with this tool.
    ///
    /// Zones are fill-only (transparent stroke); wall chains use the wall
    /// thickness as line width.
    pub fn style(&self, palette: &ToolPalette) -> ShapeStyle {
        match self.fill(palette) {
            Some(fill) => ShapeStyle::stroked(TRANSPARENT, palette.line_width).with_fill(fill),
            None if *self == Tool::WallPolygon => {
                ShapeStyle::stroked(palette.stroke, palette.wall_thickness)
            }
            None => ShapeStyle::stroked(palette.stroke, palette.line_width),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}
