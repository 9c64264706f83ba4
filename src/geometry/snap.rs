//! Snapping helpers shared by the wall tools and previews.
//!
//! Four rules exist:
//! - angle snapping: the direction of a segment is rounded to the nearest
//!   multiple of 45° while its length is kept
//! - endpoint snapping: a raw point is replaced by the nearest existing
//!   endpoint when one lies strictly inside the tolerance radius
//! - line snapping: a raw point is pulled onto the nearest reference segment
//! - extension snapping: the segment being drawn is cut where it crosses the
//!   perpendicular through an endpoint of a reference segment
//!
//! [`snap_point`] chains them for the room outline tool.

use super::{Point, angle_degrees, closest_point_on_segment, normalize_degrees, point_at};

/// Candidate angles in ascending scan order.
///
/// Ties are resolved in favour of the candidate scanned first, so an input of
/// exactly 22.5° snaps to 0° and 337.5° snaps to 315°.
pub const SNAP_ANGLES: [f64; 9] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0, 360.0];

/// Rounds an angle (degrees) to the nearest entry of [`SNAP_ANGLES`].
///
/// The input is normalized to `[0, 360)` first. The result is always one of
/// the candidates and never more than 22.5° away from the input.
pub fn snap_angle(angle: f64) -> f64 {
    let angle = normalize_degrees(angle);
    let mut closest = SNAP_ANGLES[0];
    let mut best = (closest - angle).abs();
    for &candidate in &SNAP_ANGLES[1..] {
        let diff = (candidate - angle).abs();
        if diff < best {
            best = diff;
            closest = candidate;
        }
    }
    closest
}

/// Re-aims `end` so that `start -> end` follows the snapped angle.
///
/// The distance from `start` is preserved; only the direction changes. A
/// zero-length segment is returned untouched.
pub fn snap_end_point(start: Point, end: Point) -> Point {
    let distance = start.distance(end);
    if distance == 0.0 {
        return end;
    }
    let snapped = snap_angle(angle_degrees(start, end));
    point_at(start, snapped, distance)
}

/// Finds the candidate nearest to `point` strictly within `tolerance`.
///
/// Candidates are scanned in iteration order and only a strictly smaller
/// distance replaces the current best, so exact ties keep the first one found.
pub fn find_snap_point<I>(point: Point, candidates: I, tolerance: f64) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut closest = None;
    let mut min_distance = tolerance;
    for candidate in candidates {
        let distance = candidate.distance(point);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(candidate);
        }
    }
    closest
}

/// How far perpendicular guides and the drawing direction are projected.
pub const EXTENSION_REACH: f64 = 1000.0;

/// A straight reference segment other points snap against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Intersection of segments `a1-a2` and `b1-b2`, endpoints included.
///
/// Parallel and collinear segments have no single intersection and yield
/// `None`.
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let qp = b1 - a1;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// Projects `point` onto the nearest segment strictly within `tolerance`.
///
/// Zero-length segments are skipped; ties keep the segment scanned first.
pub fn find_nearest_point_on_segments<I>(
    point: Point,
    segments: I,
    tolerance: f64,
) -> Option<Point>
where
    I: IntoIterator<Item = Segment>,
{
    let mut closest = None;
    let mut min_distance = tolerance;
    for segment in segments {
        if segment.is_degenerate() {
            continue;
        }
        let candidate = closest_point_on_segment(point, segment.start, segment.end);
        let distance = candidate.distance(point);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(candidate);
        }
    }
    closest
}

/// Result of a perpendicular extension snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtensionSnap {
    /// Where the drawing direction crosses the perpendicular
    pub point: Point,
    /// Reference endpoint the perpendicular starts from
    pub anchor: Point,
}

/// Aligns the segment `start -> current` with a perpendicular raised at an
/// endpoint of one of `segments`.
///
/// The drawing direction is extended past `current` and intersected with the
/// perpendicular through each reference endpoint. The crossing closest to
/// `current` wins if it lies strictly within `tolerance`.
pub fn find_perpendicular_extension<I>(
    start: Point,
    current: Point,
    segments: I,
    tolerance: f64,
) -> Option<ExtensionSnap>
where
    I: IntoIterator<Item = Segment>,
{
    let length = start.distance(current);
    if length == 0.0 {
        return None;
    }
    let reach = start + (current - start) * (EXTENSION_REACH / length);

    let mut closest = None;
    let mut min_distance = tolerance;
    for segment in segments {
        if segment.is_degenerate() {
            continue;
        }
        let direction = segment.end - segment.start;
        let normal = Point::new(-direction.y, direction.x) / segment.start.distance(segment.end);
        for anchor in [segment.start, segment.end] {
            let Some(point) = segment_intersection(
                start,
                reach,
                anchor - normal * EXTENSION_REACH,
                anchor + normal * EXTENSION_REACH,
            ) else {
                continue;
            };
            let distance = point.distance(current);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(ExtensionSnap { point, anchor });
            }
        }
    }
    closest
}

/// Which rules [`snap_point`] applies and how far each may reach.
///
/// Distances are in document units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRules {
    pub angle: bool,
    pub endpoints: bool,
    pub lines: bool,
    pub extensions: bool,
    /// Endpoint and line tolerance
    pub distance: f64,
    /// Tolerance for perpendicular extensions
    pub extension_distance: f64,
    /// Largest correction angle snapping may apply
    pub angle_distance: f64,
}

/// Snapped point plus the guide to draw when an extension matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapped {
    pub point: Point,
    pub guide: Option<(Point, Point)>,
}

impl Snapped {
    pub const fn unguided(point: Point) -> Self {
        Self { point, guide: None }
    }
}

/// Runs every enabled rule over `raw`.
///
/// Order: perpendicular extension, else line snapping; then endpoints, which
/// override either; then angle snapping from `start`, kept only when the
/// correction is smaller than `angle_distance`. Extension and angle rules
/// need a `start` point and are skipped without one.
pub fn snap_point(
    raw: Point,
    start: Option<Point>,
    segments: &[Segment],
    rules: &SnapRules,
) -> Snapped {
    let mut snapped = Snapped::unguided(raw);

    if let Some(start) = start.filter(|_| rules.extensions) {
        if let Some(extension) = find_perpendicular_extension(
            start,
            raw,
            segments.iter().copied(),
            rules.extension_distance,
        ) {
            snapped = Snapped {
                point: extension.point,
                guide: Some((extension.anchor, extension.point)),
            };
        }
    }

    if snapped.guide.is_none() && rules.lines {
        if let Some(point) =
            find_nearest_point_on_segments(raw, segments.iter().copied(), rules.distance)
        {
            snapped.point = point;
        }
    }

    if rules.endpoints {
        let endpoints = segments.iter().flat_map(|s| [s.start, s.end]);
        if let Some(point) = find_snap_point(snapped.point, endpoints, rules.distance) {
            snapped = Snapped::unguided(point);
        }
    }

    if let Some(start) = start.filter(|_| rules.angle) {
        let aligned = snap_end_point(start, snapped.point);
        if aligned.distance(snapped.point) < rules.angle_distance {
            snapped.point = aligned;
        }
    }

    snapped
}
