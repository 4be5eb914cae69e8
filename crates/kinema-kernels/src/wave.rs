//! Gerstner wave superposition.
//!
//! Each [`WaveDescriptor`] contributes a trochoidal offset to a point on the
//! horizontal plane; a [`WaveField`] sums the contributions of all its waves.
//!
//! Preconditions: `wavelength > 0` and `direction != 0`. Amplitude is never
//! clamped, so a wave with `steepness > 1` self-intersects (see [`WaveDescriptor::exceeds_stability_bound`]).

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

/// Gravitational acceleration used by the deep-water dispersion relation (m/s²).
pub const GRAVITY: f32 = 9.8;

/// A single directional wave component.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveDescriptor {
    /// Travel direction on the (x, z) plane. Normalized on use.
    pub direction: Vec2,
    /// Crest sharpness in `[0, 1]`.
    pub steepness: f32,
    /// Crest-to-crest distance in world units. Must be positive.
    pub wavelength: f32,
    /// Multiplier on the phase speed.
    pub speed: f32,
}

impl WaveDescriptor {
    #[inline]
    pub const fn new(direction: Vec2, steepness: f32, wavelength: f32, speed: f32) -> Self {
        Self { direction, steepness, wavelength, speed }
    }

    /// Angular wavenumber `k = 2π / wavelength`.
    #[inline]
    pub fn wavenumber(&self) -> f32 {
        TAU / self.wavelength
    }

    /// Phase speed `sqrt(g / k) * speed`.
    #[inline]
    pub fn phase_speed(&self) -> f32 {
        (GRAVITY / self.wavenumber()).sqrt() * self.speed
    }

    /// Offset amplitude `steepness / k`.
    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.steepness / self.wavenumber()
    }

    /// True when the amplitude exceeds `wavelength / 2π`, the point past which
    /// neighbouring surface points cross over each other.
    #[inline]
    pub fn exceeds_stability_bound(&self) -> bool {
        self.amplitude() > 1.0 / self.wavenumber()
    }

    /// Displacement contributed by this wave at horizontal position `xz`.
    pub fn offset_at(&self, xz: Vec2, time: f32) -> Vec3 {
        let k = self.wavenumber();
        let c = self.phase_speed();
        let d = self.direction.normalize();
        let f = k * (d.dot(xz) - c * time);
        let a = self.steepness / k;
        let (sin_f, cos_f) = f.sin_cos();

        Vec3::new(d.x * a * cos_f, a * sin_f, d.y * a * cos_f)
    }
}

/// An ordered set of waves evaluated together.
///
/// Waves are summed in insertion order, so per-point results are reproducible
/// bit for bit regardless of how points are scheduled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveField {
    waves: Vec<WaveDescriptor>,
}

impl WaveField {
    pub fn new(waves: Vec<WaveDescriptor>) -> Self {
        Self { waves }
    }

    #[inline]
    pub fn waves(&self) -> &[WaveDescriptor] {
        &self.waves
    }

    /// Summed offset of every wave at `xz`.
    pub fn offset_at(&self, xz: Vec2, time: f32) -> Vec3 {
        self.waves
            .iter()
            .fold(Vec3::ZERO, |acc, w| acc + w.offset_at(xz, time))
    }

    /// Displaced position of a single base point.
    #[inline]
    pub fn displace_point(&self, base: Vec3, time: f32) -> Vec3 {
        base + self.offset_at(Vec2::new(base.x, base.z), time)
    }

    /// Regenerates `out` with the displaced positions of `base`.
    ///
    /// `out` is cleared first; its capacity is reused across frames.
    pub fn displace_into(&self, base: &[Vec3], time: f32, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(base.iter().map(|&p| self.displace_point(p, time)));
    }

    pub fn displace(&self, base: &[Vec3], time: f32) -> Vec<Vec3> {
        let mut out = Vec::with_capacity(base.len());
        self.displace_into(base, time, &mut out);
        out
    }
}

/// Displaces every base point by the superposition of `waves` at `time`.
pub fn compute_displacement(base: &[Vec3], waves: &[WaveDescriptor], time: f32) -> Vec<Vec3> {
    base.iter()
        .map(|&p| {
            let xz = Vec2::new(p.x, p.z);
            p + waves.iter().fold(Vec3::ZERO, |acc, w| acc + w.offset_at(xz, time))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    fn ocean_waves() -> Vec<WaveDescriptor> {
        vec![
            WaveDescriptor::new(Vec2::new(1.0, 0.1), 0.35, 20.0, 0.8),
            WaveDescriptor::new(Vec2::new(0.5, 1.0), 0.30, 15.0, 1.0),
            WaveDescriptor::new(Vec2::new(-0.3, 0.8), 0.25, 8.0, 1.2),
            WaveDescriptor::new(Vec2::new(0.8, -0.4), 0.20, 4.0, 1.5),
        ]
    }

    fn sample_points() -> Vec<Vec3> {
        vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(3.5, 0.0, 7.25),
            Vec3::new(18.0, -1.0, 18.0),
        ]
    }

    // ── compute_displacement ──────────────────────────────────────────────

    #[test]
    fn no_waves_leaves_points_unchanged() {
        let base = sample_points();
        for t in [0.0, 1.5, 100.0] {
            assert_eq!(compute_displacement(&base, &[], t), base);
        }
    }

    #[test]
    fn zero_steepness_has_zero_offset() {
        let flat = WaveDescriptor::new(Vec2::new(0.3, 0.7), 0.0, 12.0, 1.0);
        for t in [0.0, 0.25, 9.0, 1234.5] {
            for p in sample_points() {
                assert_eq!(flat.offset_at(Vec2::new(p.x, p.z), t), Vec3::ZERO);
            }
        }
    }

    #[test]
    fn superposition_is_linear() {
        let waves = ocean_waves();
        let base = sample_points();
        let t = 3.7;

        let combined = compute_displacement(&base, &waves, t);
        for (i, &p) in base.iter().enumerate() {
            let summed = waves
                .iter()
                .map(|w| compute_displacement(&[p], std::slice::from_ref(w), t)[0] - p)
                .fold(p, |acc, off| acc + off);
            assert!(close(combined[i], summed), "{:?} vs {:?}", combined[i], summed);
        }
    }

    #[test]
    fn origin_example_at_time_zero() {
        let wave = WaveDescriptor::new(Vec2::new(1.0, 0.0), 0.35, 20.0, 0.8);
        let out = compute_displacement(&[Vec3::ZERO], &[wave], 0.0);
        let k = TAU / 20.0;
        assert!((wave.wavenumber() - k).abs() < 1e-6);
        assert!(close(out[0], Vec3::new(0.35 / k, 0.0, 0.0)));
        assert!((out[0].x - 1.114).abs() < 1e-3);
    }

    #[test]
    fn direction_is_normalized() {
        let short = WaveDescriptor::new(Vec2::new(0.5, 0.0), 0.3, 10.0, 1.0);
        let long = WaveDescriptor::new(Vec2::new(4.0, 0.0), 0.3, 10.0, 1.0);
        let xz = Vec2::new(2.0, -1.0);
        assert!(close(short.offset_at(xz, 1.0), long.offset_at(xz, 1.0)));
    }

    #[test]
    fn offset_magnitude_never_exceeds_amplitude() {
        let wave = WaveDescriptor::new(Vec2::new(0.6, 0.8), 0.5, 6.0, 1.0);
        for i in 0..64 {
            let t = i as f32 * 0.173;
            let off = wave.offset_at(Vec2::new(1.0, 2.0), t);
            assert!(off.length() <= wave.amplitude() + EPS);
        }
    }

    // ── WaveField ─────────────────────────────────────────────────────────

    #[test]
    fn field_matches_free_function() {
        let field = WaveField::new(ocean_waves());
        let base = sample_points();
        let t = 12.25;
        assert_eq!(field.displace(&base, t), compute_displacement(&base, field.waves(), t));
    }

    #[test]
    fn displace_into_overwrites_previous_frame() {
        let field = WaveField::new(ocean_waves());
        let base = sample_points();
        let mut buf = vec![Vec3::splat(99.0); 10];

        field.displace_into(&base, 0.5, &mut buf);
        assert_eq!(buf.len(), base.len());

        field.displace_into(&base, 0.75, &mut buf);
        assert_eq!(buf.len(), base.len());
        assert_eq!(buf, field.displace(&base, 0.75));
    }

    #[test]
    fn displacement_is_a_pure_function_of_time() {
        let field = WaveField::new(ocean_waves());
        let base = sample_points();
        let a = field.displace(&base, 4.0);
        let _ = field.displace(&base, 8.0);
        assert_eq!(field.displace(&base, 4.0), a);
    }

    // ── stability bound ───────────────────────────────────────────────────

    #[test]
    fn stability_bound_tracks_steepness() {
        let ok = WaveDescriptor::new(Vec2::X, 0.9, 8.0, 1.0);
        let bad = WaveDescriptor::new(Vec2::X, 1.2, 8.0, 1.0);
        assert!(!ok.exceeds_stability_bound());
        assert!(bad.exceeds_stability_bound());
        assert!(ocean_waves().iter().all(|w| !w.exceeds_stability_bound()));
    }
}
