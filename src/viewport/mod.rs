//! Screen <-> document coordinate transform.
//!
//! Every pointer handler and the renderer go through the same pair of
//! functions: `doc = (screen - pan) / scale` and `screen = doc * scale + pan`.

pub mod gestures;

pub use gestures::{GestureSettings, GestureTracker};

use crate::geometry::Point;
use log::debug;

pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 3.0;

/// Converts a screen-space point into document space.
pub fn to_document(p: Point, pan: Point, scale: f64) -> Point {
    (p - pan) / scale
}

/// Converts a document-space point into screen space.
pub fn to_screen(d: Point, pan: Point, scale: f64) -> Point {
    d * scale + pan
}

/// Zoom and pan state of the editing canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    pan: Point,
    min_scale: f64,
    max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

impl Viewport {
    /// Creates a viewport at minimum zoom with no pan offset.
    ///
    /// A degenerate range (`max <= min`) collapses to a fixed scale of `min`.
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        let max_scale = max_scale.max(min_scale);
        Self {
            scale: min_scale,
            pan: Point::ORIGIN,
            min_scale,
            max_scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Returns `true` when zoomed beyond the minimum scale.
    pub fn is_zoomed(&self) -> bool {
        self.scale > self.min_scale
    }

    pub fn to_document(&self, screen: Point) -> Point {
        to_document(screen, self.pan, self.scale)
    }

    pub fn to_screen(&self, doc: Point) -> Point {
        to_screen(doc, self.pan, self.scale)
    }

    /// Sets the zoom level, clamped to `[min_scale, max_scale]`.
    ///
    /// Reaching the minimum scale resets the pan offset to the origin.
    /// Returns `true` if anything changed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        let clamped = scale.clamp(self.min_scale, self.max_scale);
        let before = (self.scale, self.pan);
        self.scale = clamped;
        if clamped <= self.min_scale {
            self.pan = Point::ORIGIN;
        }
        let changed = before != (self.scale, self.pan);
        if changed {
            debug!("Viewport scale -> {:.2}", self.scale);
        }
        changed
    }

    /// Adds `delta` to the current scale (clamped).
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        self.set_scale(self.scale + delta)
    }

    /// Applies a wheel event. Only zooms while `ctrl` is held; a positive
    /// `delta_y` (scrolling down) zooms out.
    pub fn on_wheel(&mut self, delta_y: f64, ctrl: bool, sensitivity: f64) -> bool {
        if !ctrl {
            return false;
        }
        self.zoom_by(-delta_y * sensitivity)
    }

    /// Moves the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) -> bool {
        if !delta.is_finite() || delta == Point::ORIGIN {
            return false;
        }
        self.pan = self.pan + delta;
        true
    }

    /// Restores minimum zoom and zero pan.
    pub fn reset(&mut self) {
        self.scale = self.min_scale;
        self.pan = Point::ORIGIN;
    }
}
