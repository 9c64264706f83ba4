//! Placed plan symbols: evacuation markers and wall segments.

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default on-canvas size of a freshly placed marker.
pub const DEFAULT_MARKER_SIZE: f64 = 30.0;

/// Identity of a placed symbol.
///
/// Project files written by other tools use free-form strings here, so the id
/// is kept as an opaque string rather than a parsed UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(String);

impl SymbolId {
    /// Fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type of an evacuation marker.
///
/// Unrecognized type strings are preserved in [`MarkerKind::Other`] so that a
/// load/save cycle never drops data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarkerKind {
    Exit,
    FireExtinguisher,
    FireAlarm,
    FirstAid,
    FireHose,
    AssemblyPoint,
    Door,
    Stairs,
    Window,
    Other(String),
}

impl MarkerKind {
    pub fn as_str(&self) -> &str {
        match self {
            MarkerKind::Exit => "exit",
            MarkerKind::FireExtinguisher => "fireExt",
            MarkerKind::FireAlarm => "fireAlarm",
            MarkerKind::FirstAid => "firstAid",
            MarkerKind::FireHose => "fireHose",
            MarkerKind::AssemblyPoint => "assembly",
            MarkerKind::Door => "door",
            MarkerKind::Stairs => "stairs",
            MarkerKind::Window => "window",
            MarkerKind::Other(name) => name,
        }
    }
}

impl From<String> for MarkerKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "exit" => MarkerKind::Exit,
            "fireExt" => MarkerKind::FireExtinguisher,
            "fireAlarm" => MarkerKind::FireAlarm,
            "firstAid" => MarkerKind::FirstAid,
            "fireHose" => MarkerKind::FireHose,
            "assembly" => MarkerKind::AssemblyPoint,
            "door" => MarkerKind::Door,
            "stairs" => MarkerKind::Stairs,
            "window" => MarkerKind::Window,
            _ => MarkerKind::Other(value),
        }
    }
}

impl From<MarkerKind> for String {
    fn from(kind: MarkerKind) -> Self {
        match kind {
            MarkerKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marker glyph centered on `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerSymbol {
    pub id: SymbolId,
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_marker_size")]
    pub size: f64,
}

fn default_marker_size() -> f64 {
    DEFAULT_MARKER_SIZE
}

impl MarkerSymbol {
    pub fn new(kind: MarkerKind, at: Point) -> Self {
        Self {
            id: SymbolId::generate(),
            kind,
            x: at.x,
            y: at.y,
            rotation: 0.0,
            size: DEFAULT_MARKER_SIZE,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Square footprint of the glyph.
    pub fn bounds(&self) -> Bounds {
        let half = self.size / 2.0;
        Bounds::from_corners(
            Point::new(self.x - half, self.y - half),
            Point::new(self.x + half, self.y + half),
        )
    }
}

/// A straight wall segment with thickness.
///
/// The midpoint, rotation and length are derived from `start`/`end` and are
/// recomputed together whenever the endpoints change (including on load).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WallRecord", into = "WallRecord")]
pub struct WallSymbol {
    id: SymbolId,
    start: Point,
    end: Point,
    thickness: f64,
    center: Point,
    rotation: f64,
    length: f64,
}

impl WallSymbol {
    pub fn new(start: Point, end: Point, thickness: f64) -> Self {
        Self::with_id(SymbolId::generate(), start, end, thickness)
    }

    pub fn with_id(id: SymbolId, start: Point, end: Point, thickness: f64) -> Self {
        Self {
            id,
            start,
            end,
            thickness,
            center: start.midpoint(end),
            rotation: raw_rotation(start, end),
            length: start.distance(end),
        }
    }

    pub fn id(&self) -> &SymbolId {
        &self.id
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Midpoint of the segment.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Direction start -> end in degrees, as returned by `atan2` (-180..=180).
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Segment length.
    pub fn size(&self) -> f64 {
        self.length
    }

    /// Same wall shifted by `delta`.
    pub fn translated(&self, delta: Point) -> Self {
        Self::with_id(
            self.id.clone(),
            self.start + delta,
            self.end + delta,
            self.thickness,
        )
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_corners(self.start, self.end).inflate(self.thickness / 2.0)
    }
}

fn raw_rotation(start: Point, end: Point) -> f64 {
    (end.y - start.y).atan2(end.x - start.x).to_degrees()
}

#[derive(Serialize, Deserialize)]
enum WallTag {
    #[serde(rename = "wall")]
    Wall,
}

/// Wire form of a wall, including the derived fields for readers that
/// expect them.
#[derive(Serialize, Deserialize)]
struct WallRecord {
    id: SymbolId,
    #[serde(rename = "type")]
    tag: WallTag,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    size: f64,
    start: Point,
    end: Point,
    thickness: f64,
}

impl From<WallRecord> for WallSymbol {
    fn from(record: WallRecord) -> Self {
        WallSymbol::with_id(record.id, record.start, record.end, record.thickness)
    }
}

impl From<WallSymbol> for WallRecord {
    fn from(wall: WallSymbol) -> Self {
        WallRecord {
            id: wall.id,
            tag: WallTag::Wall,
            x: wall.center.x,
            y: wall.center.y,
            rotation: wall.rotation,
            size: wall.length,
            start: wall.start,
            end: wall.end,
            thickness: wall.thickness,
        }
    }
}

/// Anything placed on the plan besides free-form shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbol {
    Wall(WallSymbol),
    Marker(MarkerSymbol),
}

impl Symbol {
    pub fn id(&self) -> &SymbolId {
        match self {
            Symbol::Wall(wall) => wall.id(),
            Symbol::Marker(marker) => &marker.id,
        }
    }

    pub fn as_wall(&self) -> Option<&WallSymbol> {
        match self {
            Symbol::Wall(wall) => Some(wall),
            Symbol::Marker(_) => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Symbol::Wall(_) => "wall",
            Symbol::Marker(marker) => marker.kind.as_str(),
        }
    }

    /// Anchor used for drag offsets: marker center or wall midpoint.
    pub fn position(&self) -> Point {
        match self {
            Symbol::Wall(wall) => wall.center(),
            Symbol::Marker(marker) => marker.center(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Symbol::Wall(wall) => wall.bounds(),
            Symbol::Marker(marker) => marker.bounds(),
        }
    }

    /// Copy with its anchor moved to `position`.
    pub fn moved_to(&self, position: Point) -> Symbol {
        match self {
            Symbol::Wall(wall) => Symbol::Wall(wall.translated(position - wall.center())),
            Symbol::Marker(marker) => Symbol::Marker(MarkerSymbol {
                x: position.x,
                y: position.y,
                ..marker.clone()
            }),
        }
    }
}
