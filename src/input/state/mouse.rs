use crate::draw::hit::shapes_in_area;
use crate::draw::{MarkerSymbol, Symbol, find_shape_at_point, find_symbol_at_point};
use crate::geometry::{Bounds, Point, Snapped, snap_point};
use crate::input::events::MouseButton;
use crate::input::tool::{RectangleMode, Tool};
use log::debug;

use super::{DragState, EditorSession};

impl EditorSession {
    /// Processes a pointer press at screen position `screen`.
    ///
    /// Left button priority: wall mode, then an armed marker, then the active
    /// tool. Middle button always pans. Right button cancels whatever is in
    /// progress.
    pub fn on_pointer_down(&mut self, button: MouseButton, screen: Point) {
        if !screen.is_finite() {
            return;
        }
        let point = self.viewport.to_document(screen);
        self.cursor = Some(point);

        match button {
            MouseButton::Middle => {
                self.drag = Some(DragState::Pan { last: screen });
            }
            MouseButton::Right => {
                self.cancel();
            }
            MouseButton::Left => {
                if self.wall.is_active() {
                    self.place_wall_point(point);
                } else if let Some(kind) = self.armed_marker.clone() {
                    let marker = MarkerSymbol::new(kind, point);
                    debug!("Placed {} at {point:?}", marker.kind);
                    self.frame.add_symbol(Symbol::Marker(marker));
                    self.queue_snapshot();
                    self.needs_redraw = true;
                } else if self.tool.is_polygon() {
                    self.polygon_click(point);
                } else if self.tool == Tool::Select {
                    self.select_press(screen, point);
                } else if self.clicks_rectangles() {
                    self.rectangle_click(point);
                } else if self.drawing.start(self.tool, point, &self.settings.drawing) {
                    self.needs_redraw = true;
                }
            }
        }
    }

    /// Processes pointer motion at screen position `screen`.
    pub fn on_pointer_move(&mut self, screen: Point) {
        if !screen.is_finite() {
            return;
        }
        let point = self.viewport.to_document(screen);
        self.cursor = Some(point);

        match self.drag.clone() {
            Some(DragState::Pan { last }) => {
                self.viewport.pan_by(screen - last);
                self.drag = Some(DragState::Pan { last: screen });
                self.needs_redraw = true;
            }
            Some(DragState::Symbol { id, offset }) => {
                if self.frame.move_symbol(&id, point - offset) {
                    self.queue_snapshot();
                    self.needs_redraw = true;
                }
            }
            Some(DragState::Shape { id, origin, last }) => {
                let delta = point - last;
                if let Some(moved) = self.frame.shape(id).map(|s| s.kind().translated(delta)) {
                    self.frame.replace_shape(id, moved);
                    self.needs_redraw = true;
                }
                self.drag = Some(DragState::Shape {
                    id,
                    origin,
                    last: point,
                });
            }
            Some(DragState::Marquee { origin }) => {
                self.selection_rect = Some(Bounds::from_corners(origin, point));
                self.needs_redraw = true;
            }
            None => {
                if self.drawing.is_polygon_mode() {
                    let snapped = self.polygon_point(point);
                    self.snap_guide = snapped.guide;
                    self.drawing.update(snapped.point);
                } else {
                    self.drawing.update(point);
                }
                // Cursor-following previews (shape, polygon, wall) need a repaint.
                if self.drawing.is_active() || self.wall.start_point().is_some() {
                    self.needs_redraw = true;
                }
            }
        }
    }

    /// Processes a pointer release.
    ///
    /// Commits a dragged-out shape, finishes drags and resolves a marquee
    /// into a selection.
    pub fn on_pointer_up(&mut self, button: MouseButton) {
        if let Some(drag) = self.drag.take() {
            match drag {
                DragState::Marquee { .. } => {
                    if let Some(area) = self.selection_rect.take() {
                        self.selection = shapes_in_area(&area, &self.frame.shapes)
                            .into_iter()
                            .map(|index| self.frame.shapes[index].id())
                            .collect();
                        debug!("Marquee selected {} shape(s)", self.selection.len());
                    }
                }
                DragState::Shape { origin, last, .. } if origin != last => {
                    self.queue_snapshot();
                }
                _ => {}
            }
            self.needs_redraw = true;
            return;
        }

        if button != MouseButton::Left || self.clicks_rectangles() {
            return;
        }
        self.commit_drawn_shape();
    }

    /// Pointer leaving the canvas ends everything a release would.
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up(MouseButton::Left);
        self.cursor = None;
    }

    fn place_wall_point(&mut self, point: Point) {
        let scale = self.viewport.scale();
        let wall = self.wall.click(
            point,
            scale,
            self.frame.wall_endpoints(),
            &self.settings.walls,
        );
        if let Some(wall) = wall {
            debug!(
                "Wall {} from {:?} to {:?}",
                wall.id(),
                wall.start(),
                wall.end()
            );
            self.frame.add_symbol(Symbol::Wall(wall));
            self.queue_snapshot();
        }
        self.needs_redraw = true;
    }

    fn commit_drawn_shape(&mut self) {
        if let Some(kind) = self.drawing.end() {
            let id = self.frame.add_shape(kind);
            debug!("Committed shape {id}");
            self.queue_snapshot();
            self.needs_redraw = true;
        }
    }

    fn clicks_rectangles(&self) -> bool {
        self.rectangle_mode == RectangleMode::Click && self.tool.is_zone_rectangle()
    }

    /// Two-click zone rectangle: the first click anchors a corner, the
    /// second places the opposite corner and commits.
    fn rectangle_click(&mut self, point: Point) {
        if self.drawing.is_drawing() {
            self.drawing.update(point);
            self.commit_drawn_shape();
        } else if self.drawing.start(self.tool, point, &self.settings.drawing) {
            self.needs_redraw = true;
        }
    }

    /// Vertex click for the polygon tools.
    ///
    /// Zone polygons close when the click lands near the first vertex. Wall
    /// chains finish when the (snapped) click lands near the last vertex,
    /// which is what a double-click produces.
    fn polygon_click(&mut self, raw: Point) {
        let snapped = self.polygon_point(raw);
        self.snap_guide = None;
        self.needs_redraw = true;
        if !self.drawing.is_polygon_mode() {
            self.drawing.start(self.tool, snapped.point, &self.settings.drawing);
            return;
        }

        let vertices = self.drawing.polygon_points();
        let close_radius = self.settings.polygon_close_distance / self.viewport.scale();
        let near = if self.tool == Tool::WallPolygon {
            vertices.last().is_some_and(|last| last.distance(snapped.point) < close_radius)
        } else {
            vertices.first().is_some_and(|first| first.distance(raw) < close_radius)
        };

        if near && self.drawing.can_finish() {
            self.finish_polygon();
        } else if near && self.tool == Tool::WallPolygon {
            debug!("Ignored repeated wall chain vertex");
        } else {
            self.drawing.add_vertex(snapped.point);
        }
    }

    /// Applies vertex snapping for wall chains.
    ///
    /// Runs the full rule chain against walls and line shapes: perpendicular
    /// extensions or lines, then endpoints, then a small angle correction
    /// relative to the previous vertex. Zone polygons are not snapped.
    pub(super) fn polygon_point(&self, raw: Point) -> Snapped {
        if self.tool != Tool::WallPolygon {
            return Snapped::unguided(raw);
        }
        let rules = self.settings.walls.snap_rules(self.viewport.scale());
        let segments = self.frame.snap_segments();
        let previous = self.drawing.polygon_points().last().copied();
        snap_point(raw, previous, &segments, &rules)
    }

    fn select_press(&mut self, screen: Point, point: Point) {
        if let Some(index) = find_symbol_at_point(point, &self.frame.symbols) {
            let symbol = &self.frame.symbols[index];
            let id = symbol.id().clone();
            let offset = point - symbol.position();
            self.selection.clear();
            self.selected_symbol = Some(id.clone());
            self.drag = Some(DragState::Symbol { id, offset });
        } else if let Some(index) = find_shape_at_point(point, &self.frame.shapes) {
            let id = self.frame.shapes[index].id();
            self.selected_symbol = None;
            if !self.selection.contains(&id) {
                self.selection = vec![id];
            }
            self.drag = Some(DragState::Shape {
                id,
                origin: point,
                last: point,
            });
        } else if self.viewport.is_zoomed() {
            self.clear_selection();
            self.drag = Some(DragState::Pan { last: screen });
        } else {
            self.clear_selection();
            self.drag = Some(DragState::Marquee { origin: point });
            self.selection_rect = Some(Bounds::from_corners(point, point));
        }
        self.needs_redraw = true;
    }
}
