//! Raw pointer/keyboard input and click-versus-drag disambiguation.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Key code of the cancel key.
pub const ESCAPE: &str = "Escape";

/// Pointer travel (device pixels) after which a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 4.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM-style button index.
    pub fn from_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Pointer event in device space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Keyboard event carrying a key code such as `"Escape"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Event delivered to the active tool after disambiguation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Click(Point),
    KeyDown(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Released,
    /// Primary button held, not yet past the drag threshold.
    Pointing { origin: Point },
    Dragging,
}

/// Turns raw input into tool events.
///
/// A primary press is held back until the pointer either travels past the
/// drag threshold (the press is then delivered as `PointerDown` at its
/// origin, followed by moves and a final `PointerUp`) or is released in
/// place (delivered as a single `Click`). A gesture is therefore either a
/// click or a drag, never both.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    drag_threshold: f64,
    gesture: Gesture,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl GestureRecognizer {
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            drag_threshold: drag_threshold.max(0.0),
            gesture: Gesture::Released,
        }
    }

    /// Whether a press is currently being tracked.
    pub fn is_pressed(&self) -> bool {
        self.gesture != Gesture::Released
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture == Gesture::Dragging
    }

    /// Drop any tracked press without emitting events.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Released;
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Vec<ToolEvent> {
        match event {
            PointerEvent::Down { position, button: MouseButton::Left } => {
                self.gesture = Gesture::Pointing { origin: position };
                Vec::new()
            }
            PointerEvent::Move { position } => match self.gesture {
                Gesture::Pointing { origin } if origin.distance(position) > self.drag_threshold => {
                    self.gesture = Gesture::Dragging;
                    vec![ToolEvent::PointerDown(origin), ToolEvent::PointerMove(position)]
                }
                Gesture::Dragging => vec![ToolEvent::PointerMove(position)],
                _ => Vec::new(),
            },
            PointerEvent::Up { position, button: MouseButton::Left } => {
                let gesture = std::mem::replace(&mut self.gesture, Gesture::Released);
                match gesture {
                    Gesture::Pointing { .. } => vec![ToolEvent::Click(position)],
                    Gesture::Dragging => vec![ToolEvent::PointerUp(position)],
                    Gesture::Released => Vec::new(),
                }
            }
            // Secondary buttons never start or end a gesture
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => Vec::new(),
        }
    }

    /// Process a key event.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Option<ToolEvent> {
        match event {
            KeyEvent::Pressed(key) => {
                if key == ESCAPE {
                    // Cancel wins over the press in flight
                    self.gesture = Gesture::Released;
                }
                Some(ToolEvent::KeyDown(key))
            }
            KeyEvent::Released(_) => None,
        }
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

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_press_release_is_click() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.handle_pointer_event(down(10.0, 10.0)).is_empty());
        assert!(rec.handle_pointer_event(mv(11.0, 11.0)).is_empty());
        let events = rec.handle_pointer_event(up(11.0, 11.0));
        assert_eq!(events, vec![ToolEvent::Click(Point::new(11.0, 11.0))]);
        assert!(!rec.is_pressed());
    }

    #[test]
    fn test_drag_emits_down_move_up() {
        let mut rec = GestureRecognizer::default();
        rec.handle_pointer_event(down(0.0, 0.0));
        let events = rec.handle_pointer_event(mv(20.0, 0.0));
        assert_eq!(
            events,
            vec![
                ToolEvent::PointerDown(Point::new(0.0, 0.0)),
                ToolEvent::PointerMove(Point::new(20.0, 0.0)),
            ]
        );
        assert!(rec.is_dragging());
        assert_eq!(
            rec.handle_pointer_event(mv(30.0, 5.0)),
            vec![ToolEvent::PointerMove(Point::new(30.0, 5.0))]
        );
        assert_eq!(
            rec.handle_pointer_event(up(30.0, 5.0)),
            vec![ToolEvent::PointerUp(Point::new(30.0, 5.0))]
        );
    }

    #[test]
    fn test_hover_and_secondary_buttons_ignored() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.handle_pointer_event(mv(50.0, 50.0)).is_empty());
        let right = PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Right,
        };
        assert!(rec.handle_pointer_event(right).is_empty());
        assert!(!rec.is_pressed());
        assert!(rec.handle_pointer_event(up(0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_escape_abandons_press() {
        let mut rec = GestureRecognizer::default();
        rec.handle_pointer_event(down(0.0, 0.0));
        rec.handle_pointer_event(mv(40.0, 40.0));
        let event = rec.handle_key_event(KeyEvent::Pressed(ESCAPE.to_string()));
        assert_eq!(event, Some(ToolEvent::KeyDown(ESCAPE.to_string())));
        assert!(rec.handle_pointer_event(up(40.0, 40.0)).is_empty());
    }

    #[test]
    fn test_key_release_ignored() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.handle_key_event(KeyEvent::Released("a".to_string())).is_none());
    }

    #[test]
    fn test_button_index_mapping() {
        assert_eq!(MouseButton::from_index(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_index(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_index(7), None);
    }
}
