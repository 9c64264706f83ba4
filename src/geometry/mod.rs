//! Document-space geometry: points, angles, distances and containment tests.
//!
//! Everything in here is a pure function of its inputs. Callers are expected
//! to pass coordinates that live in the same space (normally document space,
//! see [`crate::viewport`]).

pub mod snap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub use snap::{
    SNAP_ANGLES, Segment, SnapRules, Snapped, find_nearest_point_on_segments,
    find_perpendicular_extension, find_snap_point, segment_intersection, snap_angle,
    snap_end_point, snap_point,
};

/// Hit radius used for line hit-testing, in the caller's coordinate space.
pub const LINE_HIT_RADIUS: f64 = 5.0;

/// A 2D point (or vector) with floating-point components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns `true` when both components are within `tolerance`.
    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned bounding box in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Normalized box spanned by two corners dragged in any direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box covering all points, or `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            min: *first,
            max: *first,
        };
        for p in rest {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn inflate(self, amount: f64) -> Self {
        Self {
            min: Point::new(self.min.x - amount, self.min.y - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount),
        }
    }
}

/// Angle of the direction `start -> end` in degrees, normalized to `[0, 360)`.
///
/// Screen/document y grows downward, so positive angles turn clockwise on
/// screen, matching `atan2(dy, dx)` as used by the canvas.
pub fn angle_degrees(start: Point, end: Point) -> f64 {
    normalize_degrees((end.y - start.y).atan2(end.x - start.x).to_degrees())
}

/// Maps any angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Point at `distance` from `origin` in direction `angle` (degrees).
pub fn point_at(origin: Point, angle: f64, distance: f64) -> Point {
    let radians = angle.to_radians();
    Point::new(
        origin.x + distance * radians.cos(),
        origin.y + distance * radians.sin(),
    )
}

/// Closest point on segment `a-b` to `p` (projection clamped to the segment).
///
/// A degenerate segment returns `a`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy)
}

/// Distance from `p` to segment `a-b`, or `None` if the segment has zero length.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> Option<f64> {
    if a == b {
        return None;
    }
    Some(p.distance(closest_point_on_segment(p, a, b)))
}

/// Returns `true` if `p` lies strictly closer than `radius` to segment `a-b`.
///
/// Zero-length segments never match.
pub fn is_point_near_segment(p: Point, a: Point, b: Point, radius: f64) -> bool {
    distance_to_segment(p, a, b).is_some_and(|d| d < radius)
}

/// Inclusive point-in-rectangle test for a box given by any two opposite corners.
pub fn is_point_in_rect(p: Point, a: Point, b: Point) -> bool {
    Bounds::from_corners(a, b).contains(p)
}

/// Even-odd ray casting point-in-polygon test.
pub fn is_point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
