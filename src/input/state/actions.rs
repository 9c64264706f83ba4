use crate::input::events::{Key, Modifiers};
use crate::input::tool::RectangleMode;
use log::{debug, info};

use super::EditorSession;
use super::wall::SnapRule;

impl EditorSession {
    /// Processes a key press.
    ///
    /// - `Escape`: cancel the in-progress shape, polygon, wall start or marker
    /// - `Return`: finish the polygon being drawn
    /// - `Delete` / `Backspace`: remove the selected symbol or shapes
    /// - `Ctrl+Z`: remove the most recently committed shape
    pub fn on_key(&mut self, key: Key, modifiers: Modifiers) {
        match key {
            Key::Escape => self.cancel(),
            Key::Return => {
                self.finish_polygon();
            }
            Key::Delete | Key::Backspace => {
                self.delete_selection();
            }
            Key::Char('z') | Key::Char('Z') if modifiers.ctrl => {
                self.undo();
            }
            _ => {}
        }
    }

    /// Cancels whatever is in progress without touching committed data.
    pub fn cancel(&mut self) {
        let mut changed = self.drawing.abort();
        changed |= self.wall.cancel();
        changed |= self.armed_marker.take().is_some();
        changed |= self.drag.take().is_some();
        changed |= self.selection_rect.take().is_some();
        changed |= self.snap_guide.take().is_some();
        if changed {
            debug!("Cancelled in-progress action");
            self.needs_redraw = true;
        }
    }

    /// Commits the polygon or wall chain in progress once it has enough
    /// vertices. A wall chain lands as several lines under one snapshot.
    pub fn finish_polygon(&mut self) -> bool {
        let shapes = self.drawing.finish();
        if shapes.is_empty() {
            return false;
        }
        for kind in shapes {
            let id = self.frame.add_shape(kind);
            debug!("Committed {id}");
        }
        self.snap_guide = None;
        self.queue_snapshot();
        self.needs_redraw = true;
        true
    }

    /// Removes every shape. Symbols and walls stay.
    ///
    /// Returns how many shapes were removed.
    pub fn clear_shapes(&mut self) -> usize {
        self.drawing.abort();
        self.selection.clear();
        let removed = self.frame.clear_shapes();
        if removed > 0 {
            info!("Cleared {removed} shape(s)");
            self.queue_snapshot();
            self.needs_redraw = true;
        }
        removed
    }

    /// Flips a snapping rule and returns its new state.
    pub fn toggle_snap(&mut self, rule: SnapRule) -> bool {
        let enabled = self.settings.walls.toggle(rule);
        debug!("Snap rule {rule:?} {}", if enabled { "on" } else { "off" });
        self.needs_redraw = true;
        enabled
    }

    /// Switches zone rectangles between drag and two-click entry.
    ///
    /// A half-drawn rectangle is discarded.
    pub fn set_rectangle_mode(&mut self, mode: RectangleMode) {
        if self.rectangle_mode == mode {
            return;
        }
        if self.drawing.is_drawing() && self.tool.is_zone_rectangle() {
            self.drawing.abort();
            self.needs_redraw = true;
        }
        debug!("Rectangle mode {mode:?}");
        self.rectangle_mode = mode;
    }

    pub fn toggle_rectangle_mode(&mut self) -> RectangleMode {
        self.set_rectangle_mode(self.rectangle_mode.toggled());
        self.rectangle_mode
    }

    /// Removes the selected symbol, or else the selected shapes.
    ///
    /// Returns `true` when anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        if let Some(id) = self.selected_symbol.take() {
            if self.frame.remove_symbol(&id).is_some() {
                info!("Deleted symbol {id}");
                self.queue_snapshot();
                self.needs_redraw = true;
                return true;
            }
            return false;
        }

        let mut removed = 0;
        for id in std::mem::take(&mut self.selection) {
            if self.frame.remove_shape(id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            info!("Deleted {removed} shape(s)");
            self.queue_snapshot();
            self.needs_redraw = true;
        }
        removed > 0
    }

    /// Removes the most recently committed shape. Ignored while drawing.
    pub fn undo(&mut self) -> bool {
        if self.drawing.is_active() {
            return false;
        }
        match self.frame.undo() {
            Some(shape) => {
                self.selection.retain(|id| *id != shape.id());
                debug!("Undid {} {}", shape.shape_type().as_str(), shape.id());
                self.queue_snapshot();
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    /// Wheel zoom; only acts while `Ctrl` is held.
    pub fn on_wheel(&mut self, delta_y: f64, modifiers: Modifiers) -> bool {
        let changed =
            self.viewport
                .on_wheel(delta_y, modifiers.ctrl, self.settings.wheel_sensitivity);
        if changed {
            self.needs_redraw = true;
        }
        changed
    }
}
