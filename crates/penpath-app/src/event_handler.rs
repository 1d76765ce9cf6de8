//! Translation of window events into canvas input.

use kurbo::{Point, Size};
use penpath_core::canvas::Canvas;
use penpath_core::input::{Key, Modifiers, MouseButton, PointerEvent};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitButton};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

/// Converts winit events (physical pixels) into canvas events (logical units).
#[derive(Debug, Clone)]
pub struct EventHandler {
    /// Window scale factor (physical pixels per logical unit).
    scale_factor: f64,
    /// Last known cursor position in logical units.
    cursor: Point,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl EventHandler {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: Point::ZERO,
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Convert a physical cursor position to canvas units.
    pub fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        Point::new(position.x / self.scale_factor, position.y / self.scale_factor)
    }

    /// Logical viewport for a physical surface size. None while the window
    /// has no area (minimized).
    pub fn logical_viewport(&self, width: u32, height: u32) -> Option<Size> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Size::new(
            width as f64 / self.scale_factor,
            height as f64 / self.scale_factor,
        ))
    }

    /// Handle `WindowEvent::CursorMoved`. Returns true if the canvas changed.
    pub fn cursor_moved(&mut self, canvas: &mut Canvas, position: PhysicalPosition<f64>) -> bool {
        self.cursor = self.to_logical(position);
        canvas.handle_pointer_event(PointerEvent::Move {
            position: self.cursor,
        })
    }

    /// Handle `WindowEvent::MouseInput` at the last cursor position.
    pub fn mouse_input(
        &mut self,
        canvas: &mut Canvas,
        state: ElementState,
        button: WinitButton,
    ) -> bool {
        let Some(button) = map_button(button) else {
            log::trace!("Ignoring unsupported mouse button");
            return false;
        };
        let position = self.cursor;
        let event = match state {
            ElementState::Pressed => PointerEvent::Down { position, button },
            ElementState::Released => PointerEvent::Up { position, button },
        };
        canvas.handle_pointer_event(event)
    }

    /// Handle `WindowEvent::KeyboardInput` presses.
    pub fn key_pressed(&mut self, canvas: &mut Canvas, key: &WinitKey) {
        canvas.handle_key(map_key(key));
    }

    /// Handle `WindowEvent::ModifiersChanged`.
    pub fn modifiers_changed(&mut self, canvas: &mut Canvas, state: ModifiersState) {
        canvas.input.set_modifiers(map_modifiers(state));
    }
}

fn map_button(button: WinitButton) -> Option<MouseButton> {
    match button {
        WinitButton::Left => Some(MouseButton::Left),
        WinitButton::Right => Some(MouseButton::Right),
        WinitButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Character(c) => Key::character(c.as_str()),
        _ => Key::Other,
    }
}

fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}
