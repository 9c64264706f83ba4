//! Input handling and tool state machine.
//!
//! This module translates backend-neutral pointer, key, wheel and touch
//! events into editing operations on an [`EditorSession`]: drawing shapes,
//! placing walls and markers, selecting, moving and deleting, pan and zoom.

pub mod events;
pub mod state;
pub mod tool;

pub use events::{Key, Modifiers, MouseButton};
pub use state::{DrawingState, EditorSession, EditorSettings, SnapRule};
pub use tool::{RectangleMode, Tool};
