//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, BezPath, Circle, Line, Point, Stroke};
use linkboard_core::board::DrawItem;
use linkboard_core::shapes::ShapeStyle;
use peniko::{Color, Fill};
use vello::Scene;

/// Width of the pending-source outline, in board units.
const HIGHLIGHT_WIDTH: f64 = 3.0;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Render a shape body with its style, outlined when it is the pending source.
    fn render_shape(
        &mut self,
        path: &BezPath,
        style: &ShapeStyle,
        highlight: Option<Color>,
        transform: Affine,
    ) {
        self.scene.fill(Fill::NonZero, transform, style.fill(), None, path);

        if let Some(stroke_color) = style.stroke() {
            if style.stroke_width > 0.0 {
                let stroke = Stroke::new(style.stroke_width);
                self.scene.stroke(&stroke, transform, stroke_color, None, path);
            }
        }

        if let Some(color) = highlight {
            let stroke = Stroke::new(HIGHLIGHT_WIDTH);
            self.scene.stroke(&stroke, transform, color, None, path);
        }
    }

    /// Render the close icon: a filled circle with an "X" label.
    fn render_remove_glyph(&mut self, center: Point, radius: f64, color: Color, transform: Affine) {
        let circle = Circle::new(center, radius);
        self.scene.fill(Fill::NonZero, transform, color, None, &circle);
        self.scene.stroke(&Stroke::new(1.0), transform, Color::WHITE, None, &circle);

        let arm = radius * 0.45;
        let stroke = Stroke::new((radius * 0.25).max(1.0));
        let first = Line::new(
            Point::new(center.x - arm, center.y - arm),
            Point::new(center.x + arm, center.y + arm),
        );
        let second = Line::new(
            Point::new(center.x - arm, center.y + arm),
            Point::new(center.x + arm, center.y - arm),
        );
        self.scene.stroke(&stroke, transform, Color::WHITE, None, &first);
        self.scene.stroke(&stroke, transform, Color::WHITE, None, &second);
    }

    /// Render a connection line.
    fn render_connection(&mut self, from: Point, to: Point, width: f64, color: Color, transform: Affine) {
        let stroke = Stroke::new(width);
        self.scene
            .stroke(&stroke, transform, color, None, &Line::new(from, to));
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        // Board units are logical pixels
        let transform = Affine::scale(ctx.scale_factor);
        log::trace!("Building scene with {} items", ctx.items.len());

        for item in ctx.items {
            match item {
                DrawItem::Shape {
                    path,
                    style,
                    highlighted,
                    ..
                } => {
                    let highlight = highlighted.then_some(ctx.highlight_color);
                    self.render_shape(path, style, highlight, transform);
                }
                DrawItem::RemoveGlyph { center, radius, .. } => {
                    self.render_remove_glyph(*center, *radius, ctx.glyph_color, transform);
                }
                DrawItem::Connection { from, to, width, .. } => {
                    self.render_connection(*from, *to, *width, ctx.connection_color, transform);
                }
            }
        }
    }
}
