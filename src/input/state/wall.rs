//! Two-click wall placement with endpoint and angle snapping.

use crate::draw::WallSymbol;
use crate::geometry::{Point, SnapRules, find_snap_point, snap_end_point};
use log::debug;

/// Perpendicular extension tolerance in screen pixels.
pub const EXTENSION_SNAP_DISTANCE: f64 = 30.0;

/// Largest angle-snap correction for room outline vertices, in screen pixels.
pub const ANGLE_SNAP_DISTANCE: f64 = 20.0;

/// A snapping rule that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapRule {
    Angle,
    Endpoints,
    Lines,
    Extensions,
}

/// Wall tool parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSettings {
    pub thickness: f64,
    pub snap_to_angle: bool,
    pub snap_to_walls: bool,
    /// Pull room outline vertices onto nearby walls and lines
    pub snap_to_lines: bool,
    /// Align room outline edges with perpendiculars at wall and line ends
    pub snap_to_extensions: bool,
    /// Endpoint snap radius in screen pixels
    pub snap_distance: f64,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            thickness: 5.0,
            snap_to_angle: true,
            snap_to_walls: true,
            snap_to_lines: true,
            snap_to_extensions: true,
            snap_distance: 10.0,
        }
    }
}

impl WallSettings {
    pub fn is_enabled(&self, rule: SnapRule) -> bool {
        match rule {
            SnapRule::Angle => self.snap_to_angle,
            SnapRule::Endpoints => self.snap_to_walls,
            SnapRule::Lines => self.snap_to_lines,
            SnapRule::Extensions => self.snap_to_extensions,
        }
    }

    /// Flips `rule` and returns its new state.
    pub fn toggle(&mut self, rule: SnapRule) -> bool {
        let flag = match rule {
            SnapRule::Angle => &mut self.snap_to_angle,
            SnapRule::Endpoints => &mut self.snap_to_walls,
            SnapRule::Lines => &mut self.snap_to_lines,
            SnapRule::Extensions => &mut self.snap_to_extensions,
        };
        *flag = !*flag;
        *flag
    }

    /// Rules for [`crate::geometry::snap_point`] with screen distances
    /// converted to document units at `scale`.
    pub fn snap_rules(&self, scale: f64) -> SnapRules {
        let scale = scale.max(f64::EPSILON);
        SnapRules {
            angle: self.snap_to_angle,
            endpoints: self.snap_to_walls,
            lines: self.snap_to_lines,
            extensions: self.snap_to_extensions,
            distance: self.snap_distance / scale,
            extension_distance: EXTENSION_SNAP_DISTANCE / scale,
            angle_distance: ANGLE_SNAP_DISTANCE / scale,
        }
    }

    /// Replaces `point` with the nearest wall endpoint inside the snap radius.
    ///
    /// The radius is given in screen pixels, so it shrinks in document space
    /// as the view zooms in.
    pub fn snap_to_endpoint<I>(&self, point: Point, endpoints: I, scale: f64) -> Point
    where
        I: IntoIterator<Item = Point>,
    {
        if !self.snap_to_walls {
            return point;
        }
        find_snap_point(point, endpoints, self.snap_distance / scale).unwrap_or(point)
    }

    /// Full snapping for a wall end: endpoint snap, then angle snap.
    pub fn snap_end<I>(&self, start: Point, raw: Point, endpoints: I, scale: f64) -> Point
    where
        I: IntoIterator<Item = Point>,
    {
        let end = self.snap_to_endpoint(raw, endpoints, scale);
        if self.snap_to_angle {
            snap_end_point(start, end)
        } else {
            end
        }
    }
}

/// Wall drawing mode. Independent of [`super::DrawingState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallSession {
    active: bool,
    start: Option<Point>,
}

impl WallSession {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// First point of the wall being placed.
    pub fn start_point(&self) -> Option<Point> {
        self.start
    }

    /// Enables or disables the mode. Disabling discards a pending start point.
    pub fn toggle(&mut self, enabled: bool) {
        if self.active != enabled {
            debug!("Wall drawing mode {}", if enabled { "on" } else { "off" });
        }
        self.active = enabled;
        if !enabled {
            self.start = None;
        }
    }

    /// Discards the pending start point but stays in wall mode.
    pub fn cancel(&mut self) -> bool {
        self.start.take().is_some()
    }

    /// Handles a click in wall mode.
    ///
    /// The first click records a (snapped) start point. The second click
    /// snaps the end, builds the wall and clears the start point so the next
    /// click begins a new wall.
    pub fn click<I>(
        &mut self,
        point: Point,
        scale: f64,
        endpoints: I,
        settings: &WallSettings,
    ) -> Option<WallSymbol>
    where
        I: IntoIterator<Item = Point>,
    {
        if !self.active || !point.is_finite() {
            return None;
        }
        match self.start.take() {
            None => {
                let start = settings.snap_to_endpoint(point, endpoints, scale);
                debug!("Wall start point set at {start:?}");
                self.start = Some(start);
                None
            }
            Some(start) => {
                let end = settings.snap_end(start, point, endpoints, scale);
                Some(WallSymbol::new(start, end, settings.thickness))
            }
        }
    }

    /// Snapped segment from the pending start point to `cursor`.
    pub fn preview<I>(
        &self,
        cursor: Point,
        scale: f64,
        endpoints: I,
        settings: &WallSettings,
    ) -> Option<(Point, Point)>
    where
        I: IntoIterator<Item = Point>,
    {
        let start = self.start?;
        Some((start, settings.snap_end(start, cursor, endpoints, scale)))
    }
}
