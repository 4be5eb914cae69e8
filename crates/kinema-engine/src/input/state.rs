use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Persistent input state of the window: focus, cursor and held keys.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Cursor position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    held: HashSet<Key>,
}

impl InputState {
    /// Folds `ev` into the state and records transitions and deltas in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        frame.event_count += 1;

        match ev {
            InputEvent::Key { key, state: KeyState::Pressed, .. } => {
                // Auto-repeat re-sends Pressed without a release.
                if self.held.insert(key) {
                    frame.keys_pressed.insert(key);
                }
            }
            InputEvent::Key { key, state: KeyState::Released, .. } => {
                if self.held.remove(&key) {
                    frame.keys_released.insert(key);
                }
            }

            InputEvent::CursorMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::CursorLeft => self.pointer_pos = None,

            InputEvent::MouseMotion { dx, dy } => {
                frame.mouse_delta.x += dx;
                frame.mouse_delta.y += dy;
            }
            InputEvent::Scroll(delta) => frame.wheel_lines += delta.lines(),

            InputEvent::Focused(focused) => {
                self.focused = focused;
                // Releases never arrive for keys held while focus moves away.
                if !focused {
                    self.held.clear();
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScrollDelta;
    use glam::Vec2;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_and_release_are_transitions() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::W, KeyState::Pressed));
        assert!(st.key_down(Key::W));
        assert!(fr.key_pressed(Key::W));

        fr.clear();
        st.apply_event(&mut fr, InputEvent::Key { key: Key::W, state: KeyState::Pressed, repeat: true });
        assert!(!fr.key_pressed(Key::W));

        st.apply_event(&mut fr, key(Key::W, KeyState::Released));
        assert!(!st.key_down(Key::W));
        assert!(fr.key_released(Key::W));
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Released));
        assert!(!fr.key_released(Key::Escape));
    }

    #[test]
    fn focus_loss_drops_held_keys() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::Focused(true));
        st.apply_event(&mut fr, key(Key::A, KeyState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(!st.key_down(Key::A));
        assert!(!st.focused);
    }

    #[test]
    fn motion_and_scroll_accumulate_until_clear() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::MouseMotion { dx: 3.0, dy: -1.0 });
        st.apply_event(&mut fr, InputEvent::MouseMotion { dx: 2.0, dy: 4.0 });
        st.apply_event(&mut fr, InputEvent::Scroll(ScrollDelta::Lines(1.0)));
        st.apply_event(&mut fr, InputEvent::Scroll(ScrollDelta::Pixels(-80.0)));
        assert_eq!(fr.mouse_delta, Vec2::new(5.0, 3.0));
        assert!((fr.wheel_lines + 1.0).abs() < 1e-6);
        assert_eq!(fr.event_count, 4);

        fr.clear();
        assert_eq!(fr.mouse_delta, Vec2::ZERO);
        assert_eq!(fr.wheel_lines, 0.0);
        assert_eq!(fr.event_count, 0);
    }

    #[test]
    fn cursor_tracks_moves_and_leave() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        assert_eq!(st.pointer_pos, Some((10.0, 20.0)));
        st.apply_event(&mut fr, InputEvent::CursorLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
