use crate::draw::render::{
    render_marquee, render_polygon_preview, render_selection_outline, render_snap_guide,
    render_wall_segment,
};
use crate::input::tool::Tool;
use crate::draw::{clear_surface, render_shapes, render_symbols};

use super::EditorSession;

impl EditorSession {
    /// Paints the whole editor overlay into `ctx`.
    ///
    /// Clears the target, applies pan and zoom, then draws the shape layer
    /// (with the in-progress shape last), the symbol layer and the transient
    /// previews: polygon rubber band and snap guide, wall preview, selection
    /// and marquee.
    /// Never mutates the session.
    pub fn render(&self, ctx: &cairo::Context) {
        clear_surface(ctx);

        let scale = self.viewport.scale();
        let pan = self.viewport.pan();
        let options = &self.settings.render;

        ctx.save().ok();
        ctx.translate(pan.x, pan.y);
        ctx.scale(scale, scale);

        render_shapes(ctx, &self.frame.shapes, self.drawing.current_shape(), options);
        render_symbols(ctx, &self.frame.symbols, options);

        if let Some(style) = self.drawing.polygon_style() {
            render_polygon_preview(
                ctx,
                self.drawing.polygon_points(),
                self.drawing.polygon_cursor(),
                style,
                self.tool != Tool::WallPolygon,
                scale,
            );
        }
        if let Some((anchor, point)) = self.snap_guide {
            render_snap_guide(ctx, anchor, point, scale);
        }

        if let Some((start, end)) = self.wall_preview() {
            let color = options.wall_color.with_alpha(0.5);
            render_wall_segment(ctx, start, end, self.settings.walls.thickness, color);
        }

        for id in &self.selection {
            if let Some(bounds) = self.frame.shape(*id).and_then(|s| s.bounds()) {
                render_selection_outline(ctx, &bounds.inflate(2.0 / scale), scale);
            }
        }
        if let Some(bounds) = self
            .selected_symbol
            .as_ref()
            .and_then(|id| self.frame.symbol(id))
            .map(|symbol| symbol.bounds())
        {
            render_selection_outline(ctx, &bounds.inflate(2.0 / scale), scale);
        }

        if let Some(rect) = &self.selection_rect {
            render_marquee(ctx, rect, scale);
        }

        ctx.restore().ok();
    }
}
