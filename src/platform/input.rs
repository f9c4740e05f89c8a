//! Keyboard input decoding

use crate::sim::InputEvent;

/// Map a `KeyboardEvent.key` value to a game input
pub fn from_key(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(InputEvent::Left),
        "ArrowRight" | "d" | "D" => Some(InputEvent::Right),
        "ArrowUp" | "w" | "W" | " " => Some(InputEvent::Jump),
        _ => None,
    }
}
