use crate::geometry::Point;

use super::EditorSession;

impl EditorSession {
    /// Touch contact began. `touches` are screen positions of all fingers.
    pub fn on_touch_start(&mut self, touches: &[Point], timestamp_ms: u64) {
        self.gestures.on_touch_start(touches, timestamp_ms);
    }

    /// Touch contacts moved: pinch with two fingers, pan with one.
    pub fn on_touch_move(&mut self, touches: &[Point], timestamp_ms: u64) -> bool {
        let changed = self
            .gestures
            .on_touch_move(touches, timestamp_ms, &mut self.viewport);
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    pub fn on_touch_end(&mut self) {
        self.gestures.on_touch_end();
    }
}
