//! Board configuration.

use crate::shapes::ShapeKind;
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How `connect_shapes` treats self-loops and repeated pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionPolicy {
    /// Self-loops and parallel edges are recorded as requested.
    #[default]
    Permissive,
    /// Self-loops and pairs that are already connected are rejected.
    Strict,
}

/// Tunables shared by the store and the board view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Size of new rectangles.
    pub rectangle_size: Size,
    /// Radius of new circles.
    pub circle_radius: f64,
    /// Offset from a shape's position to its connection line endpoint.
    pub anchor_offset: Vec2,
    /// Radius of the removal glyph drawn at each shape's top-left corner.
    pub glyph_radius: f64,
    /// Pointer travel (in pixels) after which a press becomes a drag.
    pub drag_threshold: f64,
    /// Extra pick distance around shapes and connection lines.
    pub hit_tolerance: f64,
    /// Width of connection lines.
    pub connection_width: f64,
    pub connection_policy: ConnectionPolicy,
    /// Drop connection entries that point at a shape when it is removed.
    pub prune_on_remove: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rectangle_size: Size::new(80.0, 50.0),
            circle_radius: 25.0,
            anchor_offset: Vec2::new(50.0, 50.0),
            glyph_radius: 8.0,
            drag_threshold: 3.0,
            hit_tolerance: 2.0,
            connection_width: 2.0,
            connection_policy: ConnectionPolicy::Permissive,
            prune_on_remove: false,
        }
    }
}

impl BoardConfig {
    /// Size given to new shapes of `kind`.
    pub fn default_size(&self, kind: ShapeKind) -> Size {
        match kind {
            ShapeKind::Rectangle => self.rectangle_size,
            ShapeKind::Circle => Size::new(self.circle_radius * 2.0, self.circle_radius * 2.0),
        }
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
