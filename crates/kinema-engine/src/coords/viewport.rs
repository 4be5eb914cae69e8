use glam::Vec2;

/// Viewport size in logical pixels.
///
/// Pointer positions arrive in this space; scenes convert them to NDC before
/// feeding them to kernels or shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width / height, or `1.0` for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Converts a top-left-origin logical position to NDC (`[-1, 1]`, +Y up).
    #[inline]
    pub fn ndc_from_logical(self, x: f32, y: f32) -> Vec2 {
        if !self.is_valid() {
            return Vec2::ZERO;
        }
        Vec2::new(2.0 * x / self.width - 1.0, 1.0 - 2.0 * y / self.height)
    }

    /// Flips a top-left-origin logical position to a bottom-left origin.
    #[inline]
    pub fn flip_y(self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, self.height - y)
    }
}
