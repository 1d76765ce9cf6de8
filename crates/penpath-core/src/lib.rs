//! Penpath Core Library
//!
//! Platform-agnostic path model, pen-tool state machine, and input dispatch
//! for the Penpath vector-path editor.

pub mod canvas;
pub mod config;
pub mod input;
pub mod overlay;
pub mod path;
pub mod tools;

pub use canvas::Canvas;
pub use config::{ConfigError, PenConfig, HANDLE_MIN_LENGTH};
pub use input::{InputState, Key, KeyPress, Modifiers, MouseButton, PointerEvent, ToolEvent};
pub use overlay::{HandleOverlay, HandleSide, MarkerKind, OverlayItem};
pub use path::{EditPath, PathStyle, Segment};
pub use tools::{PenState, PenTool};
