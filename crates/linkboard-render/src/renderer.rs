//! Renderer trait abstraction.

use kurbo::Size;
use linkboard_core::board::DrawItem;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Primitives to draw, back to front.
    pub items: &'a [DrawItem],
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Outline color for the pending connection source.
    pub highlight_color: Color,
    /// Color of connection lines.
    pub connection_color: Color,
    /// Fill color of removal glyphs.
    pub glyph_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(items: &'a [DrawItem], viewport_size: Size) -> Self {
        Self {
            items,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            highlight_color: Color::from_rgba8(245, 158, 11, 255), // Amber
            connection_color: Color::BLACK,
            glyph_color: Color::from_rgba8(220, 38, 38, 255),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
