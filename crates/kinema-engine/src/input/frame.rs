use std::collections::HashSet;

use glam::Vec2;

use super::types::Key;

/// Input accumulated since the previous frame; cleared by the runtime after
/// every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    /// Sum of raw mouse motion (+Y down).
    pub mouse_delta: Vec2,

    /// Sum of wheel scroll, in lines.
    pub wheel_lines: f32,

    /// Events folded into this frame.
    pub event_count: usize,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_delta = Vec2::ZERO;
        self.wheel_lines = 0.0;
        self.event_count = 0;
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }
}
