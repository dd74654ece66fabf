//! Shape definitions for the board.

mod patch;

pub use patch::ShapePatch;

use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn blue() -> Self {
        Self::new(0, 0, 255, 255)
    }

    pub fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle anchored at its top-left corner.
    #[serde(alias = "rect")]
    Rectangle,
    /// Circle anchored at its center.
    Circle,
}

impl ShapeKind {
    /// Display name used in logs and the header.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color.
    pub fill_color: SerializableColor,
    /// Outline color (None = no outline).
    pub stroke_color: Option<SerializableColor>,
    /// Outline width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Default style for newly created shapes of `kind`.
    pub fn for_kind(kind: ShapeKind) -> Self {
        let fill_color = match kind {
            ShapeKind::Rectangle => SerializableColor::blue(),
            ShapeKind::Circle => SerializableColor::red(),
        };
        Self {
            fill_color,
            stroke_color: None,
            stroke_width: 0.0,
        }
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Color {
        self.fill_color.into()
    }

    /// Get the stroke color as a peniko Color, if the shape has an outline.
    pub fn stroke(&self) -> Option<Color> {
        self.stroke_color.map(Into::into)
    }
}

/// A positioned shape on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Discriminator for geometry and default styling.
    pub kind: ShapeKind,
    /// Top-left corner for rectangles, center for circles.
    pub position: Point,
    /// Fixed at creation.
    pub(crate) size: Size,
    /// Ids this shape is linked to, in insertion order. May contain ids of
    /// shapes that have since been removed.
    pub connections: Vec<ShapeId>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Shape {
    /// Create a new shape with a fresh id and no connections.
    pub fn new(kind: ShapeKind, position: Point, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size,
            connections: Vec::new(),
            style: ShapeStyle::for_kind(kind),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Radius of a circle shape (half the smaller side for rectangles).
    pub fn radius(&self) -> f64 {
        self.size.width.min(self.size.height) / 2.0
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            ShapeKind::Rectangle => Rect::from_origin_size(self.position, self.size),
            ShapeKind::Circle => Rect::from_center_size(self.position, self.size),
        }
    }

    /// Check if a point hits the shape body.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.kind {
            ShapeKind::Rectangle => self.bounds().inflate(tolerance, tolerance).contains(point),
            ShapeKind::Circle => point.distance(self.position) <= self.radius() + tolerance,
        }
    }

    /// Get the path representation for rendering.
    pub fn to_path(&self) -> BezPath {
        match self.kind {
            ShapeKind::Rectangle => self.bounds().to_path(0.1),
            ShapeKind::Circle => Circle::new(self.position, self.radius()).to_path(0.1),
        }
    }

    /// Center of the removal glyph: the top-left corner of the bounds.
    pub fn glyph_center(&self) -> Point {
        self.bounds().origin()
    }

    /// Endpoint used for connection lines, a fixed offset from `position`.
    pub fn anchor(&self, offset: Vec2) -> Point {
        self.position + offset
    }

    /// Check if this shape lists `id` among its connections.
    pub fn is_connected_to(&self, id: ShapeId) -> bool {
        self.connections.contains(&id)
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_bounds() {
        let rect = Shape::new(ShapeKind::Rectangle, Point::new(10.0, 20.0), Size::new(80.0, 50.0));
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 90.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_bounds_centered() {
        let circle = Shape::new(ShapeKind::Circle, Point::new(100.0, 100.0), Size::new(50.0, 50.0));
        let bounds = circle.bounds();
        assert!((bounds.x0 - 75.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 125.0).abs() < f64::EPSILON);
        assert!((circle.radius() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let rect = Shape::new(ShapeKind::Rectangle, Point::ZERO, Size::new(80.0, 50.0));
        assert!(rect.hit_test(Point::new(40.0, 25.0), 0.0));
        assert!(!rect.hit_test(Point::new(100.0, 25.0), 0.0));
        assert!(rect.hit_test(Point::new(85.0, 25.0), 10.0));

        let circle = Shape::new(ShapeKind::Circle, Point::ZERO, Size::new(50.0, 50.0));
        assert!(circle.hit_test(Point::new(10.0, 10.0), 0.0));
        // Inside the bounding box but outside the circle
        assert!(!circle.hit_test(Point::new(24.0, 24.0), 0.0));
    }

    #[test]
    fn test_glyph_at_top_left() {
        let rect = Shape::new(ShapeKind::Rectangle, Point::new(30.0, 40.0), Size::new(80.0, 50.0));
        assert_eq!(rect.glyph_center(), Point::new(30.0, 40.0));

        let circle = Shape::new(ShapeKind::Circle, Point::new(30.0, 40.0), Size::new(50.0, 50.0));
        assert_eq!(circle.glyph_center(), Point::new(5.0, 15.0));
    }

    #[test]
    fn test_default_style_by_kind() {
        assert_eq!(ShapeStyle::for_kind(ShapeKind::Rectangle).fill_color, SerializableColor::blue());
        assert_eq!(ShapeStyle::for_kind(ShapeKind::Circle).fill_color, SerializableColor::red());
    }

    #[test]
    fn test_kind_accepts_rect_alias() {
        let kind: ShapeKind = serde_json::from_str("\"rect\"").unwrap();
        assert_eq!(kind, ShapeKind::Rectangle);
        assert_eq!(serde_json::to_string(&ShapeKind::Circle).unwrap(), "\"circle\"");
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-10);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-10);
        // Degenerate segment
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-10);
    }
}
