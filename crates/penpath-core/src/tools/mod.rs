//! Tool system for the editor.

mod pen;

pub use pen::{PenState, PenTool};
