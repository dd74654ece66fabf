//! Header UI using egui.

use egui::{Align, Color32, Context, Frame, Layout, Margin, RichText, Stroke};
use linkboard_core::shapes::{Shape, ShapeId};
use std::collections::HashSet;

/// Values shown in the header, refreshed every frame.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub title: String,
    pub shape_count: usize,
    pub connection_count: usize,
    pub pending_source: Option<ShapeId>,
}

impl UiState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Refresh counts from the current snapshot.
    pub fn sync(&mut self, shapes: &[Shape], pending_source: Option<ShapeId>) {
        self.shape_count = shapes.len();
        self.connection_count = count_connections(shapes);
        self.pending_source = pending_source;
    }

    /// Status line under the title.
    pub fn status_text(&self) -> String {
        let shapes = match self.shape_count {
            1 => "1 shape".to_string(),
            n => format!("{} shapes", n),
        };
        let connections = match self.connection_count {
            1 => "1 connection".to_string(),
            n => format!("{} connections", n),
        };
        if self.pending_source.is_some() {
            format!("{shapes} · {connections} · click another shape to connect")
        } else {
            format!("{shapes} · {connections}")
        }
    }
}

/// Number of live edges. A connect between two shapes stores an entry on
/// both ends, a self-loop stores one, and entries whose target was removed
/// are not counted.
fn count_connections(shapes: &[Shape]) -> usize {
    let live: HashSet<ShapeId> = shapes.iter().map(Shape::id).collect();
    let mut self_loops = 0;
    let mut pair_entries = 0;
    for shape in shapes {
        for target in &shape.connections {
            if *target == shape.id() {
                self_loops += 1;
            } else if live.contains(target) {
                pair_entries += 1;
            }
        }
    }
    self_loops + pair_entries / 2
}

/// Render the header panel.
pub fn render_ui(ctx: &Context, ui_state: &UiState) {
    egui::TopBottomPanel::top("header")
        .frame(
            Frame::new()
                .fill(Color32::from_rgba_unmultiplied(250, 250, 252, 240))
                .stroke(Stroke::new(1.0, Color32::from_gray(220)))
                .inner_margin(Margin::symmetric(12, 8)),
        )
        .show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("🖌 {}", ui_state.title))
                        .size(22.0)
                        .strong()
                        .color(Color32::from_gray(30)),
                );

                let status_color = if ui_state.pending_source.is_some() {
                    Color32::from_rgb(217, 119, 6)
                } else {
                    Color32::from_gray(100)
                };
                ui.label(RichText::new(ui_state.status_text()).size(13.0).color(status_color));
                ui.label(
                    RichText::new("Click empty space to add · drag to move · click two shapes to connect · × removes")
                        .size(11.0)
                        .color(Color32::from_gray(140)),
                );
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkboard_core::ShapeKind;
    use linkboard_core::store::ShapeStore;

    #[test]
    fn test_sync_counts() {
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 10.0, 10.0);
        let b = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        store.connect_shapes(a, b);

        let mut ui_state = UiState::new("Quadro Interativo");
        ui_state.sync(store.shapes(), None);
        assert_eq!(ui_state.shape_count, 2);
        assert_eq!(ui_state.connection_count, 1);
        assert_eq!(ui_state.status_text(), "2 shapes · 1 connection");
    }

    #[test]
    fn test_status_when_pending() {
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 10.0, 10.0);

        let mut ui_state = UiState::new("Board");
        ui_state.sync(store.shapes(), Some(a));
        assert_eq!(
            ui_state.status_text(),
            "1 shape · 0 connections · click another shape to connect"
        );
    }

    #[test]
    fn test_count_self_loop_and_dangling() {
        let mut store = ShapeStore::new();
        let a = store.add_shape(ShapeKind::Rectangle, 10.0, 10.0);
        let b = store.add_shape(ShapeKind::Rectangle, 100.0, 100.0);
        let c = store.add_shape(ShapeKind::Rectangle, 200.0, 200.0);
        store.connect_shapes(a, a);

        let mut ui_state = UiState::new("Board");
        ui_state.sync(store.shapes(), None);
        assert_eq!(ui_state.connection_count, 1);

        store.connect_shapes(b, c);
        ui_state.sync(store.shapes(), None);
        assert_eq!(ui_state.connection_count, 2);

        // c keeps a dangling entry for b
        store.remove_shape(b);
        ui_state.sync(store.shapes(), None);
        assert_eq!(ui_state.connection_count, 1);
    }

    #[test]
    fn test_render_ui_runs() {
        let ctx = Context::default();
        let ui_state = UiState::new("Quadro Interativo");
        let _ = ctx.run(egui::RawInput::default(), |ctx| render_ui(ctx, &ui_state));
    }
}
