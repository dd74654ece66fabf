//! Linkboard Core Library
//!
//! Platform-agnostic shape store, board view and input handling for the
//! Linkboard whiteboard.

pub mod board;
pub mod config;
pub mod input;
pub mod shapes;
pub mod store;

pub use board::{BoardAction, BoardView, ConnectGesture, DrawItem, Hit};
pub use config::{BoardConfig, ConfigError, ConnectionPolicy};
pub use input::{InputState, MouseButton, PointerEvent};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapePatch, ShapeStyle};
pub use store::{ShapeStore, Snapshot, StoreError, StoreResult, SubscriptionId};
