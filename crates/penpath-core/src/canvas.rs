//! Canvas scene and state management.

use crate::config::PenConfig;
use crate::input::{InputState, Key, PointerEvent, ToolEvent};
use crate::overlay::HandleOverlay;
use crate::path::EditPath;
use crate::tools::PenTool;

/// The editing surface: finished paths plus the active pen session.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Paths from completed sessions, in drawing order.
    pub paths: Vec<EditPath>,
    /// Active pen tool.
    pub pen: PenTool,
    /// Pointer/keyboard dispatch.
    pub input: InputState,
    /// Viewport size in logical units.
    pub viewport_size: kurbo::Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with default configuration.
    pub fn new() -> Self {
        Self::with_config(PenConfig::default())
    }

    /// Create an empty canvas with the given pen configuration.
    pub fn with_config(config: PenConfig) -> Self {
        Self {
            paths: Vec::new(),
            input: InputState::with_min_distance(config.min_distance),
            pen: PenTool::with_config(config),
            viewport_size: kurbo::Size::new(800.0, 600.0),
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = kurbo::Size::new(width, height);
    }

    /// Feed a raw pointer event. Returns true if the tool saw an event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match self.input.handle_pointer_event(event) {
            Some(tool_event) => {
                self.dispatch(&tool_event);
                true
            }
            None => false,
        }
    }

    /// Feed a key press using the currently tracked modifiers.
    pub fn handle_key(&mut self, key: Key) {
        let event = self.input.handle_key(key);
        self.dispatch(&event);
    }

    /// Deliver a tool event and collect the result of a finished session.
    pub fn dispatch(&mut self, event: &ToolEvent) {
        self.pen.handle_event(event);
        if let Some(path) = self.pen.take_finished() {
            log::debug!("Adding finished path ({} segments) to scene", path.len());
            self.paths.push(path);
        }
    }

    /// Handle overlay for the active session.
    pub fn overlay(&self) -> HandleOverlay {
        self.pen.overlay()
    }

    /// All paths to draw, back to front: finished paths, then the active
    /// committed path, then the preview.
    pub fn visible_paths(&self) -> impl Iterator<Item = &EditPath> {
        self.paths
            .iter()
            .chain(self.pen.committed())
            .chain(self.pen.preview())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, MouseButton};
    use kurbo::Point;

    fn press(canvas: &mut Canvas, x: f64, y: f64) {
        canvas.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn release(canvas: &mut Canvas, x: f64, y: f64) {
        canvas.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn move_to(canvas: &mut Canvas, x: f64, y: f64) -> bool {
        canvas.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
        })
    }

    #[test]
    fn test_canvas_creation() {
        let canvas = Canvas::new();
        assert!(canvas.paths.is_empty());
        assert!(!canvas.pen.is_placing());
        assert_eq!(canvas.visible_paths().count(), 0);
    }

    #[test]
    fn test_set_viewport_size() {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(1024.0, 768.0);
        assert_eq!(canvas.viewport_size, kurbo::Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_session_through_raw_events() {
        let mut canvas = Canvas::new();
        press(&mut canvas, 0.0, 0.0);
        release(&mut canvas, 0.0, 0.0);
        assert!(move_to(&mut canvas, 100.0, 0.0));

        press(&mut canvas, 100.0, 0.0);
        move_to(&mut canvas, 120.0, 20.0);
        release(&mut canvas, 120.0, 20.0);

        // committed + preview
        assert_eq!(canvas.visible_paths().count(), 2);
        assert_eq!(canvas.pen.committed().unwrap().len(), 2);

        canvas.handle_key(Key::Escape);
        assert_eq!(canvas.paths.len(), 1);
        assert_eq!(canvas.paths[0].len(), 2);
        assert!(!canvas.paths[0].selected);
        assert!(canvas.pen.committed().is_none());
        assert!(canvas.overlay().is_empty());
    }

    #[test]
    fn test_small_drag_is_filtered() {
        let mut canvas = Canvas::new();
        press(&mut canvas, 0.0, 0.0);
        release(&mut canvas, 0.0, 0.0);

        press(&mut canvas, 50.0, 0.0);
        assert!(!move_to(&mut canvas, 55.0, 0.0));
        release(&mut canvas, 55.0, 0.0);

        let last = *canvas.pen.committed().unwrap().last().unwrap();
        assert_eq!(last.point, Point::new(50.0, 0.0));
        assert!(last.is_corner());
    }

    #[test]
    fn test_undo_through_modifiers() {
        let mut canvas = Canvas::new();
        press(&mut canvas, 0.0, 0.0);
        release(&mut canvas, 0.0, 0.0);
        press(&mut canvas, 40.0, 0.0);
        release(&mut canvas, 40.0, 0.0);
        press(&mut canvas, 80.0, 0.0);
        release(&mut canvas, 80.0, 0.0);

        canvas.input.set_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });
        canvas.handle_key(Key::character("z"));

        assert_eq!(canvas.pen.committed().unwrap().len(), 2);
        assert!(canvas.pen.is_placing());
    }

    #[test]
    fn test_multiple_sessions_accumulate() {
        let mut canvas = Canvas::new();
        for offset in [0.0, 200.0] {
            press(&mut canvas, offset, 0.0);
            release(&mut canvas, offset, 0.0);
            press(&mut canvas, offset + 50.0, 0.0);
            release(&mut canvas, offset + 50.0, 0.0);
            canvas.handle_key(Key::Enter);
        }
        assert_eq!(canvas.paths.len(), 2);
        assert_eq!(canvas.visible_paths().count(), 2);
    }

    #[test]
    fn test_min_distance_from_config() {
        let config = PenConfig {
            min_distance: 2.0,
            ..PenConfig::default()
        };
        let canvas = Canvas::with_config(config);
        assert!((canvas.input.min_distance - 2.0).abs() < f64::EPSILON);
    }
}
