//! Input dispatch: raw pointer/keyboard events to tool events.

use crate::config::DEFAULT_MIN_DISTANCE;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on macOS, Super/Windows elsewhere.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the platform shortcut modifier (command or control) is held.
    pub fn command_or_ctrl(&self) -> bool {
        self.meta || self.ctrl
    }
}

/// Raw pointer event from the windowing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// Key identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    /// A printable key, lowercased.
    Character(String),
    Other,
}

impl Key {
    /// Build a character key, normalizing case.
    pub fn character(c: &str) -> Self {
        Key::Character(c.to_lowercase())
    }
}

/// A key press together with the modifiers held at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Enter or Escape: ends the editing session.
    pub fn is_finish(&self) -> bool {
        matches!(self.key, Key::Enter | Key::Escape)
    }

    /// `z` with command or control held.
    pub fn is_undo(&self) -> bool {
        matches!(&self.key, Key::Character(c) if c == "z") && self.modifiers.command_or_ctrl()
    }
}

/// Event delivered to a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    MouseDown(Point),
    /// Pointer moved with no button held.
    MouseMove(Point),
    /// Pointer moved with the left button held.
    MouseDrag(Point),
    MouseUp(Point),
    KeyDown(KeyPress),
}

/// Tracks pointer state and turns raw events into tool events.
///
/// Move and drag events are only reported once the pointer has travelled at
/// least `min_distance` from the previously reported point.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Minimum travel between reported move/drag events.
    pub min_distance: f64,
    /// Last point reported to the tool.
    last_reported: Option<Point>,
    /// Start position of the current drag.
    drag_start: Option<Point>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            modifiers: Modifiers::default(),
            min_distance: DEFAULT_MIN_DISTANCE,
            last_reported: None,
            drag_start: None,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with a custom minimum travel distance.
    pub fn with_min_distance(min_distance: f64) -> Self {
        Self {
            min_distance,
            ..Self::default()
        }
    }

    /// Process a pointer event, returning the tool event it produces (if any).
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<ToolEvent> {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
                if button != MouseButton::Left {
                    return None;
                }
                self.drag_start = Some(position);
                self.last_reported = Some(position);
                Some(ToolEvent::MouseDown(position))
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                let was_pressed = self.pressed_buttons.remove(&button);
                if button != MouseButton::Left || !was_pressed {
                    return None;
                }
                self.drag_start = None;
                self.last_reported = Some(position);
                Some(ToolEvent::MouseUp(position))
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                if let Some(last) = self.last_reported {
                    if last.distance(position) < self.min_distance {
                        return None;
                    }
                }
                self.last_reported = Some(position);
                if self.is_button_pressed(MouseButton::Left) {
                    Some(ToolEvent::MouseDrag(position))
                } else {
                    Some(ToolEvent::MouseMove(position))
                }
            }
        }
    }

    /// Process a key press, returning the tool event it produces.
    pub fn handle_key(&mut self, key: Key) -> ToolEvent {
        ToolEvent::KeyDown(KeyPress::new(key, self.modifiers))
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Whether the left button is held.
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_button_press() {
        let mut input = InputState::new();
        let event = input.handle_pointer_event(down(100.0, 100.0));

        assert_eq!(event, Some(ToolEvent::MouseDown(Point::new(100.0, 100.0))));
        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(input.is_dragging());
        assert!(!input.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_button_release() {
        let mut input = InputState::new();
        input.handle_pointer_event(down(100.0, 100.0));
        let event = input.handle_pointer_event(up(100.0, 100.0));

        assert_eq!(event, Some(ToolEvent::MouseUp(Point::new(100.0, 100.0))));
        assert!(!input.is_button_pressed(MouseButton::Left));
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.handle_pointer_event(up(1.0, 1.0)), None);
    }

    #[test]
    fn test_other_buttons_do_not_reach_tool() {
        let mut input = InputState::new();
        let event = input.handle_pointer_event(PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Right,
        });
        assert_eq!(event, None);
        assert!(input.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_move_vs_drag() {
        let mut input = InputState::new();

        let event = input.handle_pointer_event(moved(50.0, 0.0));
        assert_eq!(event, Some(ToolEvent::MouseMove(Point::new(50.0, 0.0))));

        input.handle_pointer_event(down(50.0, 0.0));
        let event = input.handle_pointer_event(moved(70.0, 0.0));
        assert_eq!(event, Some(ToolEvent::MouseDrag(Point::new(70.0, 0.0))));
    }

    #[test]
    fn test_min_distance_suppresses_small_moves() {
        let mut input = InputState::new();
        input.handle_pointer_event(down(0.0, 0.0));

        assert_eq!(input.handle_pointer_event(moved(6.0, 0.0)), None);
        assert_eq!(input.handle_pointer_event(moved(9.0, 0.0)), None);
        assert_eq!(
            input.handle_pointer_event(moved(10.0, 0.0)),
            Some(ToolEvent::MouseDrag(Point::new(10.0, 0.0)))
        );
        // Distance is measured from the last reported point
        assert_eq!(input.handle_pointer_event(moved(15.0, 0.0)), None);
        assert_eq!(input.pointer_position, Point::new(15.0, 0.0));
    }

    #[test]
    fn test_up_always_reported() {
        let mut input = InputState::new();
        input.handle_pointer_event(down(0.0, 0.0));
        assert_eq!(
            input.handle_pointer_event(up(2.0, 0.0)),
            Some(ToolEvent::MouseUp(Point::new(2.0, 0.0)))
        );
    }

    #[test]
    fn test_custom_min_distance() {
        let mut input = InputState::with_min_distance(0.0);
        input.handle_pointer_event(moved(0.0, 0.0));
        assert!(input.handle_pointer_event(moved(0.5, 0.0)).is_some());
    }

    #[test]
    fn test_key_carries_modifiers() {
        let mut input = InputState::new();
        input.set_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::default()
        });

        match input.handle_key(Key::character("Z")) {
            ToolEvent::KeyDown(press) => assert!(press.is_undo()),
            other => panic!("expected key event, got {:?}", other),
        }
    }

    #[test]
    fn test_undo_requires_modifier() {
        let plain = KeyPress::new(Key::character("z"), Modifiers::default());
        assert!(!plain.is_undo());

        let cmd = KeyPress::new(
            Key::character("z"),
            Modifiers {
                meta: true,
                ..Modifiers::default()
            },
        );
        assert!(cmd.is_undo());

        let wrong_key = KeyPress::new(
            Key::character("y"),
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        );
        assert!(!wrong_key.is_undo());
    }

    #[test]
    fn test_finish_keys() {
        assert!(KeyPress::new(Key::Enter, Modifiers::default()).is_finish());
        assert!(KeyPress::new(Key::Escape, Modifiers::default()).is_finish());
        assert!(!KeyPress::new(Key::Other, Modifiers::default()).is_finish());
    }
}
