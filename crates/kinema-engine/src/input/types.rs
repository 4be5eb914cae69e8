/// Keys the demos bind. Anything else arrives as [`Key::Other`] with the
/// platform scan code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    W,
    A,
    S,
    D,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Vertical wheel movement; positive scrolls away from the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScrollDelta {
    /// Notched wheels.
    Lines(f32),
    /// Touchpads, in logical pixels.
    Pixels(f32),
}

impl ScrollDelta {
    /// Logical pixels counted as one wheel line.
    pub const PIXELS_PER_LINE: f32 = 40.0;

    pub fn lines(self) -> f32 {
        match self {
            ScrollDelta::Lines(n) => n,
            ScrollDelta::Pixels(px) => px / Self::PIXELS_PER_LINE,
        }
    }
}

/// Input event after platform translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },

    /// Cursor position in logical pixels, top-left origin.
    CursorMoved { x: f32, y: f32 },
    CursorLeft,

    /// Raw relative mouse motion, unaffected by cursor grab or window edges.
    MouseMotion { dx: f32, dy: f32 },

    Scroll(ScrollDelta),

    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_scroll_folds_into_lines() {
        assert_eq!(ScrollDelta::Lines(-2.0).lines(), -2.0);
        assert_eq!(ScrollDelta::Pixels(80.0).lines(), 2.0);
    }
}
