//! Frame container for the shapes and symbols of one plan.

use super::shape::{Shape, ShapeId, ShapeKind};
use super::symbol::{Symbol, SymbolId, WallSymbol};
use crate::geometry::{Point, Segment};
use serde::{Deserialize, Serialize};

/// Anchor moves smaller than this are treated as no movement.
const MOVE_EPSILON: f64 = 1e-9;

/// Everything drawn on a plan, in z-order.
///
/// Later entries render on top and are hit-tested first. Edits replace an
/// entry at its index so that z-order and identity are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Finalized shapes in draw order (first = bottom layer)
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Markers and walls in placement order
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.symbols.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.symbols.is_empty()
    }

    /// Commits a new shape on top of the existing ones and returns its id.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let shape = Shape::new(kind);
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_index(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Swaps in new geometry for `id`, keeping the entry's index and id.
    ///
    /// Returns `false` when no shape has that id.
    pub fn replace_shape(&mut self, id: ShapeId, kind: ShapeKind) -> bool {
        match self.shape_index(id) {
            Some(index) => {
                let replacement = self.shapes[index].with_kind(kind);
                self.shapes[index] = replacement;
                true
            }
            None => false,
        }
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shape_index(id)?;
        Some(self.shapes.remove(index))
    }

    /// Removes every shape and leaves symbols in place.
    ///
    /// Returns how many shapes were removed.
    pub fn clear_shapes(&mut self) -> usize {
        let removed = self.shapes.len();
        self.shapes.clear();
        removed
    }

    /// Removes and returns the most recently added shape, if any.
    pub fn undo(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn symbol(&self, id: &SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id() == id)
    }

    /// Moves a symbol's anchor to `position`.
    ///
    /// Returns `false` for unknown ids and when the anchor already sits at
    /// `position`, so replaying a move changes nothing.
    pub fn move_symbol(&mut self, id: &SymbolId, position: Point) -> bool {
        match self.symbols.iter_mut().find(|s| s.id() == id) {
            Some(symbol) if symbol.position().approx_eq(position, MOVE_EPSILON) => false,
            Some(symbol) => {
                *symbol = symbol.moved_to(position);
                true
            }
            None => false,
        }
    }

    pub fn remove_symbol(&mut self, id: &SymbolId) -> Option<Symbol> {
        let index = self.symbols.iter().position(|s| s.id() == id)?;
        Some(self.symbols.remove(index))
    }

    pub fn walls(&self) -> impl Iterator<Item = &WallSymbol> {
        self.symbols.iter().filter_map(Symbol::as_wall)
    }

    /// Wall endpoints in collection order, start before end.
    pub fn wall_endpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.walls().flat_map(|wall| [wall.start(), wall.end()])
    }

    /// Straight references for line and extension snapping: walls first,
    /// then line shapes, each in collection order.
    pub fn snap_segments(&self) -> Vec<Segment> {
        let walls = self
            .walls()
            .map(|wall| Segment::new(wall.start(), wall.end()));
        let lines = self.shapes.iter().filter_map(|shape| match shape.kind() {
            ShapeKind::Line { start, end, .. } => Some(Segment::new(*start, *end)),
            _ => None,
        });
        walls.chain(lines).collect()
    }
}
