//! Pointer input for the drawing surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    /// Pointer left the surface boundary.
    Leave,
}

/// Tracks pointer state across events.
///
/// A release counts as a click when the primary button went down on the
/// surface and came back up without the pointer leaving in between.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position.
    pub pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    /// Whether the pointer is over the surface.
    pub inside: bool,
    /// Where the current primary press started.
    press_origin: Option<Point>,
    click: Option<Point>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.click = None;
        match *event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.inside = true;
                self.pressed_buttons.insert(button);
                if button == MouseButton::Left {
                    self.press_origin.get_or_insert(position);
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
                if button == MouseButton::Left && self.press_origin.take().is_some() {
                    self.click = Some(position);
                }
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                self.inside = true;
            }
            PointerEvent::Leave => {
                self.inside = false;
                self.pressed_buttons.clear();
                self.press_origin = None;
            }
        }
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Start of the primary press in progress.
    pub fn press_origin(&self) -> Option<Point> {
        self.press_origin
    }

    /// Position of the click completed by the last event, if any.
    pub fn click(&self) -> Option<Point> {
        self.click
    }
}
