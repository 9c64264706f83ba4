//! Cairo-based rendering functions for shapes and symbols.
//!
//! All functions draw in document coordinates; callers set up the
//! pan/zoom transform on the context beforehand.

use super::color::{BLACK, Color, SELECTION};
use super::glyph::{GlyphPrimitive, YAxis, marker_glyph};
use super::shape::{Shape, ShapeKind, ShapeStyle};
use super::symbol::{MarkerSymbol, Symbol, WallSymbol};
use crate::geometry::{Bounds, Point};
use std::f64::consts::PI;

/// Font size used when a text shape carries a non-positive size.
pub const FALLBACK_FONT_SIZE: f64 = 16.0;

/// Global rendering parameters.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Multiplied into every fill alpha (0.0 - 1.0)
    pub fill_opacity: f64,
    /// Pango family name for text shapes
    pub font_family: String,
    /// Color used for wall segments
    pub wall_color: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fill_opacity: 0.5,
            font_family: "Sans".to_string(),
            wall_color: BLACK,
        }
    }
}

fn set_color(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Clears the whole target to transparent.
pub fn clear_surface(ctx: &cairo::Context) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Paints committed shapes in order, then the in-progress shape on top.
///
/// The caller is expected to have cleared the surface (see [`clear_surface`]).
pub fn render_shapes(
    ctx: &cairo::Context,
    shapes: &[Shape],
    in_progress: Option<&ShapeKind>,
    options: &RenderOptions,
) {
    for shape in shapes {
        render_shape(ctx, shape.kind(), options);
    }
    if let Some(kind) = in_progress {
        render_shape(ctx, kind, options);
    }
}

/// Paints a single shape.
pub fn render_shape(ctx: &cairo::Context, kind: &ShapeKind, options: &RenderOptions) {
    match kind {
        ShapeKind::Line { start, end, style } => {
            ctx.move_to(start.x, start.y);
            ctx.line_to(end.x, end.y);
            stroke_and_fill(ctx, style, options.fill_opacity, false);
        }
        ShapeKind::Rectangle { start, end, style } => {
            let bounds = Bounds::from_corners(*start, *end);
            ctx.rectangle(bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
            stroke_and_fill(ctx, style, options.fill_opacity, true);
        }
        ShapeKind::Circle { start, end, style } => {
            ctx.new_sub_path();
            ctx.arc(start.x, start.y, start.distance(*end), 0.0, 2.0 * PI);
            stroke_and_fill(ctx, style, options.fill_opacity, true);
        }
        ShapeKind::FreeLine { points, style } => {
            if points.len() < 2 {
                return;
            }
            ctx.save().ok();
            trace_polyline(ctx, points);
            ctx.set_line_cap(cairo::LineCap::Round);
            ctx.set_line_join(cairo::LineJoin::Round);
            stroke_and_fill(ctx, style, options.fill_opacity, false);
            ctx.restore().ok();
        }
        ShapeKind::Polygon { points, style } => {
            if points.len() < 3 {
                return;
            }
            trace_polyline(ctx, points);
            ctx.close_path();
            stroke_and_fill(ctx, style, options.fill_opacity, true);
        }
        ShapeKind::Text {
            start,
            text,
            font_size,
            color,
        } => render_text(ctx, *start, text, *font_size, *color, &options.font_family),
    }
}

fn trace_polyline(ctx: &cairo::Context, points: &[Point]) {
    if let Some((first, rest)) = points.split_first() {
        ctx.move_to(first.x, first.y);
        for p in rest {
            ctx.line_to(p.x, p.y);
        }
    }
}

/// Fills (when requested and a fill is set) and strokes the current path.
fn stroke_and_fill(ctx: &cairo::Context, style: &ShapeStyle, fill_opacity: f64, closed: bool) {
    if closed {
        if let Some(fill) = style.fill {
            set_color(ctx, fill.faded(fill_opacity));
            let _ = ctx.fill_preserve();
        }
    }
    if style.stroke.is_transparent() || style.line_width <= 0.0 {
        ctx.new_path();
        return;
    }
    set_color(ctx, style.stroke);
    ctx.set_line_width(style.line_width);
    let _ = ctx.stroke();
}

/// Renders a single line of text with its baseline starting at `origin`.
pub fn render_text(
    ctx: &cairo::Context,
    origin: Point,
    text: &str,
    font_size: f64,
    color: Color,
    font_family: &str,
) {
    if text.is_empty() {
        return;
    }
    let size = if font_size > 0.0 {
        font_size
    } else {
        FALLBACK_FONT_SIZE
    };

    ctx.save().ok();
    let layout = pangocairo::functions::create_layout(ctx);
    let mut font_desc = pango::FontDescription::from_string(font_family);
    font_desc.set_absolute_size(size * pango::SCALE as f64);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    // Pango positions layouts by their top-left corner
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(origin.x, origin.y - baseline);
    set_color(ctx, color);
    pangocairo::functions::show_layout(ctx, &layout);
    ctx.restore().ok();
}

/// Paints walls first, then markers, so markers stay visible on top.
pub fn render_symbols(ctx: &cairo::Context, symbols: &[Symbol], options: &RenderOptions) {
    for wall in symbols.iter().filter_map(Symbol::as_wall) {
        render_wall(ctx, wall, options.wall_color);
    }
    for symbol in symbols {
        if let Symbol::Marker(marker) = symbol {
            render_marker(ctx, marker);
        }
    }
}

/// Strokes a wall as a thick segment with square ends.
pub fn render_wall(ctx: &cairo::Context, wall: &WallSymbol, color: Color) {
    render_wall_segment(ctx, wall.start(), wall.end(), wall.thickness(), color);
}

pub fn render_wall_segment(
    ctx: &cairo::Context,
    start: Point,
    end: Point,
    thickness: f64,
    color: Color,
) {
    ctx.save().ok();
    set_color(ctx, color);
    ctx.set_line_width(thickness);
    ctx.set_line_cap(cairo::LineCap::Square);
    ctx.move_to(start.x, start.y);
    ctx.line_to(end.x, end.y);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Draws a marker glyph; markers without a vector glyph get a plain outline.
pub fn render_marker(ctx: &cairo::Context, marker: &MarkerSymbol) {
    let primitives = marker_glyph(&marker.kind, marker.center(), marker.size, YAxis::Down);
    ctx.save().ok();
    if marker.rotation != 0.0 {
        ctx.translate(marker.x, marker.y);
        ctx.rotate(marker.rotation.to_radians());
        ctx.translate(-marker.x, -marker.y);
    }
    if primitives.is_empty() {
        let bounds = marker.bounds();
        ctx.rectangle(bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
        set_color(ctx, BLACK);
        ctx.set_line_width(1.0);
        let _ = ctx.stroke();
    }
    for primitive in &primitives {
        render_glyph_primitive(ctx, primitive);
    }
    ctx.restore().ok();
}

fn render_glyph_primitive(ctx: &cairo::Context, primitive: &GlyphPrimitive) {
    match primitive {
        GlyphPrimitive::FillRect {
            origin,
            width,
            height,
            color,
        } => {
            ctx.rectangle(origin.x, origin.y, *width, *height);
            set_color(ctx, *color);
            let _ = ctx.fill();
        }
        GlyphPrimitive::StrokePolygon {
            points,
            line_width,
            color,
        } => {
            trace_polyline(ctx, points);
            ctx.close_path();
            set_color(ctx, *color);
            ctx.set_line_width(*line_width);
            let _ = ctx.stroke();
        }
        GlyphPrimitive::FillCircle {
            center,
            radius,
            color,
        } => {
            ctx.new_sub_path();
            ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
            set_color(ctx, *color);
            let _ = ctx.fill();
        }
    }
}

/// Draws the rubber-band preview of an unfinished polygon.
///
/// Committed vertices are joined with solid segments; the segment to the
/// cursor is dashed, and so is the edge back to the first vertex when the
/// outline is `closed`.
pub fn render_polygon_preview(
    ctx: &cairo::Context,
    vertices: &[Point],
    cursor: Option<Point>,
    style: &ShapeStyle,
    closed: bool,
    scale: f64,
) {
    let Some(first) = vertices.first() else {
        return;
    };
    let stroke = if style.stroke.is_transparent() {
        style.fill.map(|f| f.with_alpha(1.0)).unwrap_or(BLACK)
    } else {
        style.stroke
    };
    let width = (style.line_width.max(1.0)) / scale.max(f64::EPSILON);

    ctx.save().ok();
    set_color(ctx, stroke);
    ctx.set_line_width(width);
    trace_polyline(ctx, vertices);
    let _ = ctx.stroke();

    if let Some(cursor) = cursor {
        let last = vertices.last().copied().unwrap_or(*first);
        ctx.set_dash(&[6.0 / scale, 4.0 / scale], 0.0);
        ctx.move_to(last.x, last.y);
        ctx.line_to(cursor.x, cursor.y);
        if closed && vertices.len() >= 2 {
            ctx.line_to(first.x, first.y);
        }
        let _ = ctx.stroke();
    }

    for vertex in vertices {
        ctx.new_sub_path();
        ctx.arc(vertex.x, vertex.y, 3.0 / scale, 0.0, 2.0 * PI);
    }
    let _ = ctx.fill();
    ctx.restore().ok();
}

/// Thin dashed guide from a reference endpoint to a snapped point.
pub fn render_snap_guide(ctx: &cairo::Context, from: Point, to: Point, scale: f64) {
    ctx.save().ok();
    set_color(ctx, SELECTION);
    ctx.set_line_width(1.0 / scale);
    ctx.set_dash(&[2.0 / scale, 3.0 / scale], 0.0);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Outlines `bounds` with a dashed selection frame.
pub fn render_selection_outline(ctx: &cairo::Context, bounds: &Bounds, scale: f64) {
    ctx.save().ok();
    set_color(ctx, SELECTION);
    ctx.set_line_width(1.0 / scale);
    ctx.set_dash(&[4.0 / scale, 3.0 / scale], 0.0);
    ctx.rectangle(bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Paints the marquee rectangle with a translucent fill.
pub fn render_marquee(ctx: &cairo::Context, bounds: &Bounds, scale: f64) {
    ctx.save().ok();
    ctx.rectangle(bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
    set_color(ctx, SELECTION.with_alpha(0.12));
    let _ = ctx.fill_preserve();
    set_color(ctx, SELECTION);
    ctx.set_line_width(1.0 / scale);
    let _ = ctx.stroke();
    ctx.restore().ok();
}
