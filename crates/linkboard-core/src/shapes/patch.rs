//! Sparse shape updates.

use super::{Shape, ShapeId, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Sparse update for a shape. Only present fields are applied; identity,
/// kind and size cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Replaces the whole connection list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<ShapeId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ShapeStyle>,
}

impl ShapePatch {
    /// Patch that moves a shape to `position`.
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.connections.is_none() && self.style.is_none()
    }

    /// Merge the present fields into `shape`.
    pub fn apply_to(&self, shape: &mut Shape) {
        if let Some(x) = self.x {
            shape.position.x = x;
        }
        if let Some(y) = self.y {
            shape.position.y = y;
        }
        if let Some(connections) = &self.connections {
            shape.connections.clone_from(connections);
        }
        if let Some(style) = &self.style {
            shape.style = style.clone();
        }
    }
}
