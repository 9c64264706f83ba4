//! Backend-neutral input event types.
//!
//! Front ends translate their native events into these values before handing
//! them to the editor session.

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key
    Char(char),
    /// Cancel the in-progress shape, polygon or wall
    Escape,
    /// Finish the in-progress polygon
    Return,
    /// Remove the selection
    Delete,
    Backspace,
    Unknown,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button: draw, place, select
    Left,
    /// Cancels the in-progress action
    Right,
    /// Pans the view
    Middle,
}
