//! Pointer events and cursor tracking.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => position,
        }
    }
}

/// Last known pointer position.
///
/// Windowing backends report button changes without a position, so the shell
/// feeds every pointer event through here and reads `pointer_position` when a
/// button event arrives. Press and drag state lives in the board view.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pointer_position: Point,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position carried by `event`.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.pointer_position = event.position();
    }

    pub fn pointer_position(&self) -> Point {
        self.pointer_position
    }
}
