mod actions;
mod core;
mod drawing;
mod mouse;
mod render;
mod touch;
mod wall;
#[cfg(test)]
mod tests;

pub use core::{DragState, EditorSession, EditorSettings};
pub use drawing::{DrawingDefaults, DrawingState};
pub use wall::{SnapRule, WallSession, WallSettings};
