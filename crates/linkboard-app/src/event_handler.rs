//! Pointer event routing from the window to the board.

use kurbo::Point;
use linkboard_core::board::BoardView;
use linkboard_core::input::{InputState, MouseButton, PointerEvent};
use linkboard_core::shapes::ShapeId;
use linkboard_core::store::ShapeStore;

/// Map a winit button to a board button. Other buttons are ignored.
pub fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Feeds window pointer events to the board view and applies the resulting
/// actions to the store.
pub struct EventHandler {
    view: BoardView,
    input: InputState,
}

impl EventHandler {
    pub fn new(view: BoardView) -> Self {
        Self {
            view,
            input: InputState::new(),
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Handle a cursor move, in logical pixels.
    ///
    /// Returns `true` if the board needs a redraw.
    pub fn cursor_moved(&mut self, position: Point, store: &mut ShapeStore) -> bool {
        self.dispatch(PointerEvent::Move { position }, store)
    }

    /// Handle a press at the last known cursor position.
    pub fn button_pressed(&mut self, button: MouseButton, store: &mut ShapeStore) -> bool {
        let position = self.input.pointer_position();
        self.dispatch(PointerEvent::Down { position, button }, store)
    }

    /// Handle a release at the last known cursor position.
    pub fn button_released(&mut self, button: MouseButton, store: &mut ShapeStore) -> bool {
        let position = self.input.pointer_position();
        self.dispatch(PointerEvent::Up { position, button }, store)
    }

    fn dispatch(&mut self, event: PointerEvent, store: &mut ShapeStore) -> bool {
        self.input.handle_pointer_event(event);

        let pending_before: Option<ShapeId> = self.view.pending_source();
        let action = self.view.handle_pointer(event, store.shapes());
        let pending_changed = self.view.pending_source() != pending_before;

        if pending_changed {
            match self.view.pending_source() {
                Some(id) => log::debug!("Connection pending from {}", id),
                None => log::debug!("Connection gesture reset"),
            }
        }

        match action {
            Some(action) => {
                log::debug!("Applying {:?}", action);
                action.apply(store);
                true
            }
            None => pending_changed,
        }
    }
}
