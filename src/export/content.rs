//! PDF content-stream builder for the overlay.

use crate::draw::Color;
use crate::draw::glyph::GlyphPrimitive;
use crate::geometry::Point;
use lopdf::content::Operation;
use lopdf::{Dictionary, Object, dictionary};

// Cubic Bezier control distance for a quarter circle
const KAPPA: f64 = 0.552_284_749_8;

pub(super) fn real(value: f64) -> Object {
    Object::Real(value as _)
}

fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

/// Accumulates drawing operations plus the opacity states they reference.
#[derive(Debug, Default)]
pub(super) struct OverlayContent {
    operations: Vec<Operation>,
    opacities: Vec<f64>,
}

impl OverlayContent {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// `ExtGState` entries for every opacity used, keyed by resource name.
    pub fn graphics_states(&self) -> Vec<(String, Dictionary)> {
        self.opacities
            .iter()
            .enumerate()
            .map(|(index, alpha)| {
                (
                    state_name(index),
                    dictionary! {
                        "Type" => "ExtGState",
                        "ca" => real(*alpha),
                        "CA" => real(*alpha),
                    },
                )
            })
            .collect()
    }

    fn set_opacity(&mut self, alpha: f64) {
        if alpha >= 1.0 {
            return;
        }
        let index = match self.opacities.iter().position(|a| (*a - alpha).abs() < 1e-6) {
            Some(index) => index,
            None => {
                self.opacities.push(alpha);
                self.opacities.len() - 1
            }
        };
        self.operations
            .push(op("gs", vec![Object::Name(state_name(index).into_bytes())]));
    }

    fn fill_color(&mut self, color: Color) {
        self.operations.push(op(
            "rg",
            vec![real(color.r), real(color.g), real(color.b)],
        ));
    }

    fn stroke_color(&mut self, color: Color) {
        self.operations.push(op(
            "RG",
            vec![real(color.r), real(color.g), real(color.b)],
        ));
    }

    fn path(&mut self, points: &[Point]) {
        if let Some((first, rest)) = points.split_first() {
            self.operations
                .push(op("m", vec![real(first.x), real(first.y)]));
            for p in rest {
                self.operations.push(op("l", vec![real(p.x), real(p.y)]));
            }
        }
    }

    fn circle(&mut self, center: Point, radius: f64) {
        let k = radius * KAPPA;
        let Point { x, y } = center;
        let curve = |c1: (f64, f64), c2: (f64, f64), end: (f64, f64)| {
            op(
                "c",
                vec![
                    real(c1.0),
                    real(c1.1),
                    real(c2.0),
                    real(c2.1),
                    real(end.0),
                    real(end.1),
                ],
            )
        };
        self.operations
            .push(op("m", vec![real(x + radius), real(y)]));
        self.operations.extend([
            curve((x + radius, y + k), (x + k, y + radius), (x, y + radius)),
            curve((x - k, y + radius), (x - radius, y + k), (x - radius, y)),
            curve((x - radius, y - k), (x - k, y - radius), (x, y - radius)),
            curve((x + k, y - radius), (x + radius, y - k), (x + radius, y)),
        ]);
        self.operations.push(op("h", vec![]));
    }

    /// Appends one glyph primitive, already in page coordinates.
    pub fn primitive(&mut self, primitive: &GlyphPrimitive) {
        self.operations.push(op("q", vec![]));
        match primitive {
            GlyphPrimitive::FillRect {
                origin,
                width,
                height,
                color,
            } => {
                self.set_opacity(color.a);
                self.fill_color(*color);
                self.operations.push(op(
                    "re",
                    vec![real(origin.x), real(origin.y), real(*width), real(*height)],
                ));
                self.operations.push(op("f", vec![]));
            }
            GlyphPrimitive::StrokePolygon {
                points,
                line_width,
                color,
            } => {
                self.set_opacity(color.a);
                self.stroke_color(*color);
                self.operations.push(op("w", vec![real(*line_width)]));
                self.path(points);
                self.operations.push(op("s", vec![]));
            }
            GlyphPrimitive::FillCircle {
                center,
                radius,
                color,
            } => {
                self.set_opacity(color.a);
                self.fill_color(*color);
                self.circle(*center, *radius);
                self.operations.push(op("f", vec![]));
            }
        }
        self.operations.push(op("Q", vec![]));
    }

    /// Strokes a wall segment with square caps.
    pub fn wall(&mut self, start: Point, end: Point, thickness: f64, color: Color) {
        self.operations.push(op("q", vec![]));
        self.set_opacity(color.a);
        self.stroke_color(color);
        self.operations.push(op("w", vec![real(thickness)]));
        self.operations.push(op("J", vec![Object::Integer(2)]));
        self.path(&[start, end]);
        self.operations.push(op("S", vec![]));
        self.operations.push(op("Q", vec![]));
    }
}

fn state_name(index: usize) -> String {
    format!("EvacGS{index}")
}
