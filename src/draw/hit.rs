//! Hit-testing of shapes and symbols against a document-space point.

use super::shape::{Shape, ShapeKind};
use super::symbol::Symbol;
use crate::geometry::{
    Bounds, LINE_HIT_RADIUS, Point, is_point_in_polygon, is_point_in_rect, is_point_near_segment,
};

/// Returns `true` if `point` selects `kind`.
///
/// Lines match within [`LINE_HIT_RADIUS`] of the segment, rectangles by
/// inclusive bounds, polygons by even-odd containment. Circles, free lines
/// and text are not selectable by point.
pub fn shape_contains(kind: &ShapeKind, point: Point) -> bool {
    match kind {
        ShapeKind::Line { start, end, .. } => {
            is_point_near_segment(point, *start, *end, LINE_HIT_RADIUS)
        }
        ShapeKind::Rectangle { start, end, .. } => is_point_in_rect(point, *start, *end),
        ShapeKind::Polygon { points, .. } => is_point_in_polygon(point, points),
        ShapeKind::Circle { .. } | ShapeKind::FreeLine { .. } | ShapeKind::Text { .. } => false,
    }
}

/// Index of the topmost shape under `point`.
pub fn find_shape_at_point(point: Point, shapes: &[Shape]) -> Option<usize> {
    shapes
        .iter()
        .rposition(|shape| shape_contains(shape.kind(), point))
}

/// Index of the topmost symbol under `point`.
///
/// Markers match inside their square footprint; walls match within half
/// their thickness (but at least [`LINE_HIT_RADIUS`]) of the segment.
pub fn find_symbol_at_point(point: Point, symbols: &[Symbol]) -> Option<usize> {
    symbols.iter().rposition(|symbol| match symbol {
        Symbol::Marker(marker) => marker.bounds().contains(point),
        Symbol::Wall(wall) => {
            let radius = (wall.thickness() / 2.0).max(LINE_HIT_RADIUS);
            is_point_near_segment(point, wall.start(), wall.end(), radius)
        }
    })
}

/// Indices of every shape whose bounds intersect `area`, in z-order.
pub fn shapes_in_area(area: &Bounds, shapes: &[Shape]) -> Vec<usize> {
    shapes
        .iter()
        .enumerate()
        .filter(|(_, shape)| shape.bounds().is_some_and(|b| b.intersects(area)))
        .map(|(index, _)| index)
        .collect()
}
