//! Mapping from a shape snapshot to drawable primitives.

use crate::config::BoardConfig;
use crate::shapes::{Shape, ShapeId, ShapeStyle};
use kurbo::{BezPath, Point};
use std::collections::HashMap;

/// A single drawable primitive, in back-to-front order.
#[derive(Debug, Clone)]
pub enum DrawItem {
    /// A shape body.
    Shape {
        id: ShapeId,
        path: BezPath,
        style: ShapeStyle,
        /// The shape is the pending source of a connect gesture.
        highlighted: bool,
    },
    /// The close icon at a shape's top-left corner: a circle with an "X" label.
    RemoveGlyph {
        id: ShapeId,
        center: Point,
        radius: f64,
    },
    /// A line for one connection entry.
    Connection {
        source: ShapeId,
        target: ShapeId,
        from: Point,
        to: Point,
        width: f64,
    },
}

/// Build the primitives for `shapes`.
///
/// Each shape is followed by its removal glyph; connection lines come last so
/// they sit on top. Entries whose target no longer exists are skipped, and
/// repeated entries produce repeated lines.
pub fn build_scene(shapes: &[Shape], pending: Option<ShapeId>, config: &BoardConfig) -> Vec<DrawItem> {
    let mut items = Vec::with_capacity(shapes.len() * 3);

    for shape in shapes {
        items.push(DrawItem::Shape {
            id: shape.id(),
            path: shape.to_path(),
            style: shape.style.clone(),
            highlighted: pending == Some(shape.id()),
        });
        items.push(DrawItem::RemoveGlyph {
            id: shape.id(),
            center: shape.glyph_center(),
            radius: config.glyph_radius,
        });
    }

    for (source, target, from, to) in connection_segments(shapes, config) {
        items.push(DrawItem::Connection {
            source,
            target,
            from,
            to,
            width: config.connection_width,
        });
    }

    items
}

/// Every resolvable connection entry as `(source, target, from, to)`.
pub(crate) fn connection_segments(
    shapes: &[Shape],
    config: &BoardConfig,
) -> Vec<(ShapeId, ShapeId, Point, Point)> {
    let index: HashMap<ShapeId, &Shape> = shapes.iter().map(|s| (s.id(), s)).collect();
    let offset = config.anchor_offset;

    shapes
        .iter()
        .flat_map(|shape| {
            let index = &index;
            shape.connections.iter().filter_map(move |target_id| {
                let target = index.get(target_id)?;
                Some((shape.id(), *target_id, shape.anchor(offset), target.anchor(offset)))
            })
        })
        .collect()
}
