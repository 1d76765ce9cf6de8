//! Penpath Application
//!
//! The application shell providing windowing, input translation,
//! and integration of the pen tool with the renderer.

mod app;
mod event_handler;
mod shortcuts;

pub use app::{App, AppConfig, AppError, CONFIG_ENV_VAR};
pub use event_handler::EventHandler;
pub use shortcuts::{Shortcut, ShortcutRegistry};
