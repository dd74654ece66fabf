//! Two-click connect gesture.

use crate::shapes::ShapeId;

/// View-local state of the connect gesture. Never stored with the shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectGesture {
    /// No shape picked yet.
    #[default]
    Idle,
    /// The first shape has been clicked; the next click on another shape
    /// completes the connection.
    PendingSource(ShapeId),
}

impl ConnectGesture {
    /// Feed a click on a shape body. Returns the `(source, target)` pair when
    /// the click completes a connection.
    ///
    /// Clicking the pending source again completes a self-loop; whether it is
    /// recorded is up to the store's connection policy.
    pub fn click_shape(&mut self, id: ShapeId) -> Option<(ShapeId, ShapeId)> {
        match *self {
            ConnectGesture::Idle => {
                *self = ConnectGesture::PendingSource(id);
                None
            }
            ConnectGesture::PendingSource(source) => {
                *self = ConnectGesture::Idle;
                Some((source, id))
            }
        }
    }

    /// The pending source, if any.
    pub fn pending_source(&self) -> Option<ShapeId> {
        match *self {
            ConnectGesture::Idle => None,
            ConnectGesture::PendingSource(id) => Some(id),
        }
    }

    /// Reset to idle if `id` is the pending source.
    pub fn forget(&mut self, id: ShapeId) {
        if self.pending_source() == Some(id) {
            *self = ConnectGesture::Idle;
        }
    }
}
