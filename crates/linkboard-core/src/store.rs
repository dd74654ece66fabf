//! The shape store: canonical shape list, mutations and change notification.

use crate::config::{BoardConfig, ConnectionPolicy};
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapePatch};
use kurbo::Point;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Immutable view of the shape list at one point in time.
///
/// Each mutation builds a new list, so a snapshot handed to a listener never
/// changes underneath it.
pub type Snapshot = Arc<[Shape]>;

/// Handle returned by [`ShapeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

/// Errors from validated store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Shape not found: {0}")]
    UnknownShape(ShapeId),
    #[error("Shape {0} cannot be connected to itself")]
    SelfLoop(ShapeId),
    #[error("Shapes {0} and {1} are already connected")]
    DuplicateEdge(ShapeId, ShapeId),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Owns the shape list and notifies subscribers after every mutation.
pub struct ShapeStore {
    shapes: Snapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    config: BoardConfig,
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShapeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeStore")
            .field("shapes", &self.shapes)
            .field("listeners", &self.listeners.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ShapeStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create an empty store using `config` for shape sizes and policies.
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            shapes: Arc::from(Vec::new()),
            listeners: Vec::new(),
            next_subscription: 0,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The current snapshot (cheap to clone).
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.shapes)
    }

    /// Shapes in creation order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Register a listener called with the full snapshot after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Create a shape of `kind` at (`x`, `y`) with the default size for its kind.
    pub fn add_shape(&mut self, kind: ShapeKind, x: f64, y: f64) -> ShapeId {
        let shape = Shape::new(kind, Point::new(x, y), self.config.default_size(kind));
        let id = shape.id();
        log::debug!("Adding {} {} at ({:.1}, {:.1})", kind.name(), id, x, y);

        let mut next = self.shapes.to_vec();
        next.push(shape);
        self.commit(next);
        id
    }

    /// Merge `patch` into the shape matching `id`. Unknown ids are ignored.
    pub fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) {
        let next = self
            .shapes
            .iter()
            .map(|shape| {
                let mut shape = shape.clone();
                if shape.id() == id {
                    patch.apply_to(&mut shape);
                }
                shape
            })
            .collect();
        self.commit(next);
    }

    /// Delete the shape matching `id`. Unknown ids are ignored.
    ///
    /// Other shapes keep their references to the removed id unless
    /// `prune_on_remove` is set.
    pub fn remove_shape(&mut self, id: ShapeId) {
        let prune = self.config.prune_on_remove;
        let next: Vec<Shape> = self
            .shapes
            .iter()
            .filter(|shape| shape.id() != id)
            .cloned()
            .map(|mut shape| {
                if prune {
                    shape.connections.retain(|&target| target != id);
                }
                shape
            })
            .collect();

        if next.len() != self.shapes.len() {
            log::debug!("Removed shape {}", id);
        }
        self.commit(next);
    }

    /// Record an edge between `a` and `b` in both connection lists.
    ///
    /// Never fails; rejected connections are logged and the store is left
    /// unchanged (subscribers are still notified).
    pub fn connect_shapes(&mut self, a: ShapeId, b: ShapeId) {
        if let Err(e) = self.try_connect_shapes(a, b) {
            log::warn!("Connection ignored: {}", e);
            self.notify();
        }
    }

    /// Validated form of [`connect_shapes`](Self::connect_shapes).
    ///
    /// A self-loop records a single entry. On error nothing changes and no
    /// listener is called.
    pub fn try_connect_shapes(&mut self, a: ShapeId, b: ShapeId) -> StoreResult<()> {
        let source = self.get(a).ok_or(StoreError::UnknownShape(a))?;
        if !self.contains(b) {
            return Err(StoreError::UnknownShape(b));
        }
        if self.config.connection_policy == ConnectionPolicy::Strict {
            if a == b {
                return Err(StoreError::SelfLoop(a));
            }
            if source.is_connected_to(b) {
                return Err(StoreError::DuplicateEdge(a, b));
            }
        }

        let next = self
            .shapes
            .iter()
            .map(|shape| {
                let mut shape = shape.clone();
                if shape.id() == a {
                    shape.connections.push(b);
                } else if shape.id() == b {
                    shape.connections.push(a);
                }
                shape
            })
            .collect();
        log::debug!("Connected {} <-> {}", a, b);
        self.commit(next);
        Ok(())
    }

    /// Drop connection entries whose target no longer exists.
    /// Returns the number of entries removed.
    pub fn prune_dangling(&mut self) -> usize {
        let live: HashSet<ShapeId> = self.shapes.iter().map(Shape::id).collect();
        let mut removed = 0;
        let next = self
            .shapes
            .iter()
            .map(|shape| {
                let mut shape = shape.clone();
                let before = shape.connections.len();
                shape.connections.retain(|target| live.contains(target));
                removed += before - shape.connections.len();
                shape
            })
            .collect();
        if removed > 0 {
            log::debug!("Pruned {} dangling connection(s)", removed);
        }
        self.commit(next);
        removed
    }

    /// Replace the shape list and notify listeners.
    fn commit(&mut self, next: Vec<Shape>) {
        self.shapes = Arc::from(next);
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = Arc::clone(&self.shapes);
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}
