//! Plan model and Cairo rendering.
//!
//! - [`Color`]: RGBA color plus the zone and glyph palette
//! - [`Shape`]: committed vector shapes (lines, zones, polygons, text)
//! - [`Symbol`]: placed evacuation markers and wall segments
//! - [`Frame`]: the ordered collections that make up one plan
//! - hit-testing and Cairo rendering over those collections

pub mod color;
pub mod frame;
pub mod glyph;
pub mod hit;
pub mod render;
pub mod shape;
pub mod symbol;

pub use color::Color;
pub use frame::Frame;
pub use hit::{find_shape_at_point, find_symbol_at_point};
pub use render::{RenderOptions, clear_surface, render_shape, render_shapes, render_symbols};
pub use shape::{Shape, ShapeId, ShapeKind, ShapeStyle, ShapeType};
pub use symbol::{MarkerKind, MarkerSymbol, Symbol, SymbolId, WallSymbol};
