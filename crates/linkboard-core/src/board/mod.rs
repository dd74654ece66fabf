//! Board view: hit testing, pointer handling and the connect gesture.
//!
//! The view never mutates the store directly. Pointer events produce
//! [`BoardAction`]s which the shell applies to the [`ShapeStore`]; the store
//! then notifies its subscribers and the next frame renders the new snapshot.

mod gesture;
mod scene;

pub use gesture::ConnectGesture;
pub use scene::{DrawItem, build_scene};

use crate::config::BoardConfig;
use crate::input::{MouseButton, PointerEvent};
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapePatch, point_to_segment_dist};
use crate::store::ShapeStore;
use kurbo::{Point, Rect, Size, Vec2};

/// A store mutation requested by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    AddShape { kind: ShapeKind, position: Point },
    UpdateShape { id: ShapeId, patch: ShapePatch },
    RemoveShape { id: ShapeId },
    ConnectShapes { source: ShapeId, target: ShapeId },
}

impl BoardAction {
    /// Apply this action to the store.
    pub fn apply(self, store: &mut ShapeStore) {
        match self {
            BoardAction::AddShape { kind, position } => {
                store.add_shape(kind, position.x, position.y);
            }
            BoardAction::UpdateShape { id, patch } => store.update_shape(id, &patch),
            BoardAction::RemoveShape { id } => store.remove_shape(id),
            BoardAction::ConnectShapes { source, target } => store.connect_shapes(source, target),
        }
    }
}

/// What lies under the pointer, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The removal glyph of a shape.
    Glyph(ShapeId),
    /// A connection line.
    Connection,
    /// A shape body.
    Body(ShapeId),
    /// Empty canvas.
    Background,
}

/// Gesture started by a left-button press.
#[derive(Debug, Clone, Copy)]
enum Press {
    Background { origin: Point, moved: bool },
    Glyph { id: ShapeId, origin: Point, moved: bool },
    Connection,
    Body { id: ShapeId, origin: Point, grab_offset: Vec2, dragging: bool },
}

/// Translates pointer input over a fixed-size board into store actions.
#[derive(Debug, Clone)]
pub struct BoardView {
    config: BoardConfig,
    /// Interactive area, captured at mount time.
    viewport: Size,
    gesture: ConnectGesture,
    press: Option<Press>,
}

impl BoardView {
    /// Create a view over a board of `viewport` size.
    pub fn new(config: BoardConfig, viewport: Size) -> Self {
        Self {
            config,
            viewport,
            gesture: ConnectGesture::Idle,
            press: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn gesture(&self) -> ConnectGesture {
        self.gesture
    }

    /// The first shape of an unfinished connect gesture.
    pub fn pending_source(&self) -> Option<ShapeId> {
        self.gesture.pending_source()
    }

    /// Whether a shape is currently being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.press, Some(Press::Body { dragging: true, .. }))
    }

    /// Build the drawable primitives for `shapes`.
    pub fn scene(&self, shapes: &[Shape]) -> Vec<DrawItem> {
        build_scene(shapes, self.pending_source(), &self.config)
    }

    /// Find what lies under `point`, respecting draw order: connection lines
    /// are on top, then shapes from last to first with each glyph above its
    /// body.
    pub fn hit_test(&self, shapes: &[Shape], point: Point) -> Hit {
        let tolerance = self.config.hit_tolerance;

        let line_reach = self.config.connection_width / 2.0 + tolerance;
        let on_line = scene::connection_segments(shapes, &self.config)
            .into_iter()
            .any(|(_, _, from, to)| point_to_segment_dist(point, from, to) <= line_reach);
        if on_line {
            return Hit::Connection;
        }

        for shape in shapes.iter().rev() {
            if point.distance(shape.glyph_center()) <= self.config.glyph_radius + tolerance {
                return Hit::Glyph(shape.id());
            }
            if shape.hit_test(point, tolerance) {
                return Hit::Body(shape.id());
            }
        }
        Hit::Background
    }

    /// Process a pointer event against the current `shapes`.
    pub fn handle_pointer(&mut self, event: PointerEvent, shapes: &[Shape]) -> Option<BoardAction> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.press = self.begin_press(position, shapes);
                None
            }
            PointerEvent::Move { position } => self.handle_move(position),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => {
                let press = self.press.take()?;
                self.finish_press(press, position, shapes)
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => None,
        }
    }

    fn contains(&self, point: Point) -> bool {
        Rect::from_origin_size(Point::ZERO, self.viewport).contains(point)
    }

    fn begin_press(&self, position: Point, shapes: &[Shape]) -> Option<Press> {
        if !self.contains(position) {
            return None;
        }
        let press = match self.hit_test(shapes, position) {
            Hit::Background => Press::Background {
                origin: position,
                moved: false,
            },
            Hit::Glyph(id) => Press::Glyph {
                id,
                origin: position,
                moved: false,
            },
            Hit::Connection => Press::Connection,
            Hit::Body(id) => {
                let shape_position = shapes
                    .iter()
                    .find(|s| s.id() == id)
                    .map_or(position, |s| s.position);
                Press::Body {
                    id,
                    origin: position,
                    grab_offset: position - shape_position,
                    dragging: false,
                }
            }
        };
        Some(press)
    }

    fn handle_move(&mut self, position: Point) -> Option<BoardAction> {
        let threshold = self.config.drag_threshold;
        match self.press.as_mut()? {
            Press::Body {
                id,
                origin,
                grab_offset,
                dragging,
            } => {
                if !*dragging && origin.distance(position) > threshold {
                    *dragging = true;
                    log::debug!("Dragging shape {}", id);
                }
                dragging.then(|| BoardAction::UpdateShape {
                    id: *id,
                    patch: ShapePatch::position(position - *grab_offset),
                })
            }
            Press::Background { origin, moved } | Press::Glyph { origin, moved, .. } => {
                if origin.distance(position) > threshold {
                    *moved = true;
                }
                None
            }
            Press::Connection => None,
        }
    }

    fn finish_press(&mut self, press: Press, position: Point, shapes: &[Shape]) -> Option<BoardAction> {
        match press {
            Press::Background { origin, moved: false } => Some(BoardAction::AddShape {
                kind: ShapeKind::Rectangle,
                position: origin,
            }),
            Press::Glyph { id, moved: false, .. } => {
                if self.hit_test(shapes, position) != Hit::Glyph(id) {
                    return None;
                }
                self.gesture.forget(id);
                Some(BoardAction::RemoveShape { id })
            }
            Press::Body { id, dragging: false, .. } => {
                let (source, target) = self.gesture.click_shape(id)?;
                Some(BoardAction::ConnectShapes { source, target })
            }
            Press::Body { dragging: true, .. }
            | Press::Background { moved: true, .. }
            | Press::Glyph { moved: true, .. }
            | Press::Connection => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionPolicy;

    fn view() -> BoardView {
        BoardView::new(BoardConfig::default(), Size::new(800.0, 600.0))
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    /// Press and release at the same point, applying any resulting action.
    fn click(view: &mut BoardView, store: &mut ShapeStore, x: f64, y: f64) -> Option<BoardAction> {
        assert!(view.handle_pointer(down(x, y), store.shapes()).is_none());
        let action = view.handle_pointer(up(x, y), store.shapes());
        if let Some(action) = action.clone() {
            action.apply(store);
        }
        action
    }

    #[test]
    fn test_background_click_adds_rectangle() {
        let mut view = view();
        let mut store = ShapeStore::new();

        let action = click(&mut view, &mut store, 200.0, 150.0);
        assert_eq!(
            action,
            Some(BoardAction::AddShape {
                kind: ShapeKind::Rectangle,
                position: Point::new(200.0, 150.0),
            })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.shapes()[0].position, Point::new(200.0, 150.0));
    }

    #[test]
    fn test_click_outside_viewport_ignored() {
        let mut view = view();
        let mut store = ShapeStore::new();

        assert!(click(&mut view, &mut store, 900.0, 100.0).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_drag_updates_every_move() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let id = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        // Grab 20px right and 20px below the top-left corner
        view.handle_pointer(down(120.0, 120.0), store.shapes());
        let mut updates = 0;
        for step in 1..=5 {
            let x = 120.0 + 10.0 * f64::from(step);
            let action = view.handle_pointer(moved(x, 130.0), store.shapes());
            let Some(action) = action else {
                panic!("expected an update on move {step}");
            };
            assert!(matches!(action, BoardAction::UpdateShape { id: moved_id, .. } if moved_id == id));
            action.apply(&mut store);
            updates += 1;
        }
        assert_eq!(updates, 5);
        assert!(view.is_dragging());
        assert!(view.handle_pointer(up(170.0, 130.0), store.shapes()).is_none());
        assert!(!view.is_dragging());

        let shape = store.get(id).unwrap();
        assert_eq!(shape.position, Point::new(150.0, 110.0));
        assert_eq!(view.pending_source(), None);
    }

    #[test]
    fn test_zero_threshold_drags_on_any_move() {
        let config = BoardConfig {
            drag_threshold: 0.0,
            ..Default::default()
        };
        let mut view = BoardView::new(config, Size::new(800.0, 600.0));
        let mut store = ShapeStore::new();
        let id = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        view.handle_pointer(down(130.0, 120.0), store.shapes());
        let action = view.handle_pointer(moved(131.0, 121.0), store.shapes());
        assert_eq!(
            action,
            Some(BoardAction::UpdateShape {
                id,
                patch: ShapePatch::position(Point::new(101.0, 101.0)),
            })
        );
        assert!(view.handle_pointer(up(131.0, 121.0), store.shapes()).is_none());
        assert_eq!(view.pending_source(), None);
    }

    #[test]
    fn test_small_jitter_is_still_a_click() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let id = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        view.handle_pointer(down(130.0, 120.0), store.shapes());
        assert!(view.handle_pointer(moved(131.0, 121.0), store.shapes()).is_none());
        assert!(view.handle_pointer(up(131.0, 121.0), store.shapes()).is_none());
        assert_eq!(view.pending_source(), Some(id));
    }

    #[test]
    fn test_two_clicks_connect() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        let b = store.add_shape(ShapeKind::Rectangle, 400.0, 100.0);

        assert!(click(&mut view, &mut store, 130.0, 120.0).is_none());
        assert_eq!(view.pending_source(), Some(a));

        let action = click(&mut view, &mut store, 430.0, 120.0);
        assert_eq!(action, Some(BoardAction::ConnectShapes { source: a, target: b }));
        assert_eq!(view.gesture(), ConnectGesture::Idle);
        assert_eq!(store.get(a).unwrap().connections, vec![b]);
        assert_eq!(store.get(b).unwrap().connections, vec![a]);
    }

    #[test]
    fn test_clicking_source_again_records_self_loop() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        assert!(click(&mut view, &mut store, 130.0, 120.0).is_none());
        let action = click(&mut view, &mut store, 130.0, 120.0);
        assert_eq!(action, Some(BoardAction::ConnectShapes { source: a, target: a }));
        assert_eq!(view.gesture(), ConnectGesture::Idle);
        assert_eq!(store.get(a).unwrap().connections, vec![a]);
    }

    #[test]
    fn test_self_loop_rejected_under_strict_policy() {
        let config = BoardConfig {
            connection_policy: ConnectionPolicy::Strict,
            ..Default::default()
        };
        let mut view = BoardView::new(config.clone(), Size::new(800.0, 600.0));
        let mut store = ShapeStore::with_config(config);
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        click(&mut view, &mut store, 130.0, 120.0);
        click(&mut view, &mut store, 130.0, 120.0);
        assert_eq!(view.gesture(), ConnectGesture::Idle);
        assert!(store.get(a).unwrap().connections.is_empty());
    }

    #[test]
    fn test_background_click_keeps_pending() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        click(&mut view, &mut store, 130.0, 120.0);
        let action = click(&mut view, &mut store, 500.0, 400.0);
        assert!(matches!(action, Some(BoardAction::AddShape { .. })));
        assert_eq!(view.pending_source(), Some(a));
    }

    #[test]
    fn test_glyph_click_removes() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        assert_eq!(view.hit_test(store.shapes(), Point::new(98.0, 99.0)), Hit::Glyph(a));
        let action = click(&mut view, &mut store, 98.0, 99.0);
        assert_eq!(action, Some(BoardAction::RemoveShape { id: a }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_glyph_release_elsewhere_does_nothing() {
        let mut view = view();
        let mut store = ShapeStore::new();
        store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);

        view.handle_pointer(down(100.0, 100.0), store.shapes());
        assert!(view.handle_pointer(moved(300.0, 300.0), store.shapes()).is_none());
        assert!(view.handle_pointer(up(300.0, 300.0), store.shapes()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_removing_pending_source_resets_gesture() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        store.add_shape(ShapeKind::Rectangle, 400.0, 100.0);

        click(&mut view, &mut store, 130.0, 120.0);
        assert_eq!(view.pending_source(), Some(a));
        click(&mut view, &mut store, 100.0, 100.0);
        assert_eq!(view.pending_source(), None);
    }

    #[test]
    fn test_connection_line_absorbs_click() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        let b = store.add_shape(ShapeKind::Rectangle, 400.0, 100.0);
        store.connect_shapes(a, b);

        // Line runs from (150, 150) to (450, 150)
        assert_eq!(view.hit_test(store.shapes(), Point::new(300.0, 150.0)), Hit::Connection);
        assert!(click(&mut view, &mut store, 300.0, 150.0).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_topmost_shape_wins() {
        let view = view();
        let mut store = ShapeStore::new();
        store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        let top = store.add_shape(ShapeKind::Rectangle, 120.0, 110.0);

        assert_eq!(view.hit_test(store.shapes(), Point::new(150.0, 130.0)), Hit::Body(top));
    }

    #[test]
    fn test_right_button_ignored() {
        let mut view = view();
        let store = ShapeStore::new();
        let event = PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
        };
        assert!(view.handle_pointer(event, store.shapes()).is_none());
        assert!(view.handle_pointer(up(10.0, 10.0), store.shapes()).is_none());
    }

    #[test]
    fn test_scene_reflects_pending() {
        let mut view = view();
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        click(&mut view, &mut store, 130.0, 120.0);

        let items = view.scene(store.shapes());
        assert!(matches!(items[0], DrawItem::Shape { id, highlighted: true, .. } if id == a));
    }
}
