//! Touch gesture tracking: two-finger pinch zoom and one-finger pan.
//!
//! Timestamps are passed in by the caller (milliseconds on any monotonic
//! clock) so that replaying the same event stream yields the same result.

use super::Viewport;
use crate::geometry::Point;

/// Tuning values for touch gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Minimum change in finger distance (px) before a pinch adjusts the scale
    pub pinch_threshold: f64,
    /// Scale change per pixel of pinch distance
    pub pinch_sensitivity: f64,
    /// Hold time before a single finger starts panning at minimum zoom
    pub pan_hold_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            pinch_threshold: 5.0,
            pinch_sensitivity: 0.01,
            pan_hold_ms: 200,
        }
    }
}

/// Per-gesture bookkeeping between touch events.
#[derive(Debug, Default, Clone)]
pub struct GestureTracker {
    settings: GestureSettings,
    touch_start_ms: u64,
    last_position: Point,
    last_distance: Option<f64>,
    panning: bool,
}

impl GestureTracker {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn on_touch_start(&mut self, touches: &[Point], timestamp_ms: u64) {
        match touches {
            [a, b, ..] => {
                self.last_distance = Some(a.distance(*b));
            }
            [only] => {
                self.touch_start_ms = timestamp_ms;
                self.last_position = *only;
            }
            [] => {}
        }
    }

    /// Feeds a touch move into the tracker, updating `viewport` in place.
    ///
    /// Returns `true` when the viewport changed.
    pub fn on_touch_move(
        &mut self,
        touches: &[Point],
        timestamp_ms: u64,
        viewport: &mut Viewport,
    ) -> bool {
        match touches {
            [a, b, ..] => {
                let current = a.distance(*b);
                let mut changed = false;
                if let Some(last) = self.last_distance {
                    let delta = current - last;
                    if delta.abs() > self.settings.pinch_threshold {
                        changed = viewport
                            .set_scale(viewport.scale() + delta * self.settings.pinch_sensitivity);
                    }
                }
                self.last_distance = Some(current);
                changed
            }
            [touch] => {
                let held =
                    timestamp_ms.saturating_sub(self.touch_start_ms) > self.settings.pan_hold_ms;
                if held {
                    self.panning = true;
                }
                let mut changed = false;
                if self.panning || viewport.is_zoomed() {
                    changed = viewport.pan_by(*touch - self.last_position);
                }
                self.last_position = *touch;
                changed
            }
            [] => false,
        }
    }

    pub fn on_touch_end(&mut self) {
        self.panning = false;
        self.last_distance = None;
    }
}
