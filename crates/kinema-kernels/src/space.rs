//! Conversions between normalized device coordinates and framebuffer pixels.

use glam::Vec2;

/// Maps an NDC position to framebuffer pixels with a bottom-left origin.
///
/// `(-1, -1)` maps to `(0, 0)` and `(1, 1)` to `frame`.
#[inline]
pub fn ndc_to_screen(ndc: Vec2, frame: Vec2) -> Vec2 {
    (ndc + Vec2::ONE) * 0.5 * frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        let frame = Vec2::new(800.0, 600.0);
        assert_eq!(ndc_to_screen(Vec2::new(-1.0, -1.0), frame), Vec2::ZERO);
        assert_eq!(ndc_to_screen(Vec2::ONE, frame), frame);
        assert_eq!(ndc_to_screen(Vec2::ZERO, frame), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn outside_ndc_extrapolates() {
        let frame = Vec2::new(100.0, 100.0);
        assert_eq!(ndc_to_screen(Vec2::new(2.0, -3.0), frame), Vec2::new(150.0, -100.0));
    }
}
