//! VecSketch Application
//!
//! The desktop shell: window, menus, file dialogs and prompts around a
//! [`vecsketch_core::Canvas`].

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{Notice, StatusInfo, UiAction, UiState, render_ui};
