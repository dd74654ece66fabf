//! Linkboard Application
//!
//! The native application shell: window, GPU surface, egui header and the
//! event loop that routes pointer input to the board.

mod app;
mod event_handler;
mod ui;

pub use app::{App, AppConfig, AppError, CONFIG_ENV_VAR, load_board_config};
pub use event_handler::{EventHandler, map_button};
pub use ui::{UiState, render_ui};
