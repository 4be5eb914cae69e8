//! Hierarchical orbit placement.
//!
//! An [`OrbitChain`] is a tree of bodies stored in insertion order. A child
//! can only be added under a [`BodyId`] that already exists, so the storage
//! order is a parent-before-child order by construction and [`OrbitChain::resolve`]
//! is a single forward pass.
//!
//! Every body is composed the same way:
//!
//! ```text
//! orbit_frame = S(1/aspect, 1, 1) · T(parent.x · aspect, parent.y, 0)
//! model       = orbit_frame · T(orbit(t)) · Rz(tilt) · R_axis(spin · t)
//! ```
//!
//! where `parent` is the parent's resolved NDC center from the same pass (the
//! frame anchor for the root, whose orbit is ignored). Orbit radii are thus in
//! aspect-corrected units and stay circular on non-square framebuffers.

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::space::ndc_to_screen;

/// Axis a body spins about.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SpinAxis {
    /// In-plane vertical axis; a flat disc appears to narrow and widen.
    #[default]
    InPlane,
    /// Viewing axis; a flat disc turns like a wheel.
    View,
}

impl SpinAxis {
    #[inline]
    fn axis(self) -> Vec3 {
        match self {
            SpinAxis::InPlane => Vec3::Y,
            SpinAxis::View => Vec3::Z,
        }
    }
}

/// Static description of one body. Preconditions: `orbit_radius >= 0`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OrbitingBody {
    pub orbit_radius: f32,
    /// Radians per second around the parent.
    pub orbit_angular_speed: f32,
    /// Radians per second about `spin_axis`.
    pub self_rotation_speed: f32,
    /// Fixed tilt about the viewing axis.
    pub axial_tilt_degrees: f32,
    pub spin_axis: SpinAxis,
}

impl OrbitingBody {
    /// A body that sits on its anchor without moving.
    #[inline]
    pub const fn fixed() -> Self {
        Self {
            orbit_radius: 0.0,
            orbit_angular_speed: 0.0,
            self_rotation_speed: 0.0,
            axial_tilt_degrees: 0.0,
            spin_axis: SpinAxis::InPlane,
        }
    }

    #[inline]
    pub const fn orbiting(radius: f32, angular_speed: f32) -> Self {
        Self {
            orbit_radius: radius,
            orbit_angular_speed: angular_speed,
            ..Self::fixed()
        }
    }

    #[inline]
    pub const fn with_spin(mut self, speed: f32, axis: SpinAxis) -> Self {
        self.self_rotation_speed = speed;
        self.spin_axis = axis;
        self
    }

    #[inline]
    pub const fn with_tilt(mut self, degrees: f32) -> Self {
        self.axial_tilt_degrees = degrees;
        self
    }

    /// Orbital offset from the parent at `time`.
    #[inline]
    pub fn orbit_offset(&self, time: f32) -> Vec2 {
        let (s, c) = (self.orbit_angular_speed * time).sin_cos();
        Vec2::new(c, s) * self.orbit_radius
    }

    /// Tilt and spin applied after the body has been placed.
    #[inline]
    fn attitude(&self, time: f32) -> Mat4 {
        Mat4::from_rotation_z(self.axial_tilt_degrees.to_radians())
            * Mat4::from_axis_angle(self.spin_axis.axis(), self.self_rotation_speed * time)
    }
}

/// Handle to a body inside one [`OrbitChain`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BodyId(usize);

impl BodyId {
    /// Slot of this body in a resolved placement list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-frame external inputs to [`OrbitChain::resolve`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameAnchor {
    /// Root position in NDC (typically the pointer).
    pub anchor_ndc: Vec2,
    /// Framebuffer width / height.
    pub aspect: f32,
    /// Framebuffer size in pixels, for screen-space centers.
    pub framebuffer: Vec2,
}

impl FrameAnchor {
    /// Anchor at `anchor_ndc` for a `width × height` framebuffer.
    ///
    /// A zero or non-finite dimension gives an aspect of `1.0`.
    pub fn new(anchor_ndc: Vec2, width: f32, height: f32) -> Self {
        let valid = width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite();
        let aspect = if valid { width / height } else { 1.0 };
        Self {
            anchor_ndc,
            aspect,
            framebuffer: Vec2::new(width, height),
        }
    }
}

/// One body's placement for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedPlacement {
    /// Matrix the body's mesh is drawn with.
    pub model: Mat4,
    /// Aspect-corrected frame centered on the parent, before the orbit offset.
    /// Rings showing this body's orbit are drawn with it.
    pub orbit_frame: Mat4,
    /// Resolved center in NDC; children orbit around it.
    pub ndc: Vec2,
    /// Resolved center in framebuffer pixels, bottom-left origin.
    pub screen: Vec2,
}

#[derive(Debug, Clone)]
struct Node {
    body: OrbitingBody,
    parent: Option<BodyId>,
}

/// Parent-before-child list of bodies with a single root.
#[derive(Debug, Clone)]
pub struct OrbitChain {
    nodes: Vec<Node>,
}

impl OrbitChain {
    /// Creates a chain whose root is `root`. The root's orbit is ignored.
    pub fn new(root: OrbitingBody) -> Self {
        Self {
            nodes: vec![Node { body: root, parent: None }],
        }
    }

    #[inline]
    pub fn root(&self) -> BodyId {
        BodyId(0)
    }

    /// Adds `body` orbiting `parent` and returns its handle.
    pub fn add_child(&mut self, parent: BodyId, body: OrbitingBody) -> BodyId {
        assert!(parent.0 < self.nodes.len(), "parent {parent:?} is not part of this chain");
        let id = BodyId(self.nodes.len());
        self.nodes.push(Node { body, parent: Some(parent) });
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a chain holds at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn body(&self, id: BodyId) -> &OrbitingBody {
        &self.nodes[id.0].body
    }

    #[inline]
    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.nodes[id.0].parent
    }

    /// Body handles in evaluation order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.nodes.len()).map(BodyId)
    }

    /// Regenerates `out` with one placement per body, indexed by [`BodyId::index`].
    pub fn resolve_into(&self, time: f32, frame: &FrameAnchor, out: &mut Vec<ResolvedPlacement>) {
        out.clear();

        let aspect_fix = Mat4::from_scale(Vec3::new(1.0 / frame.aspect, 1.0, 1.0));

        for (i, node) in self.nodes.iter().enumerate() {
            let (center, orbit) = match node.parent {
                None => (frame.anchor_ndc, Vec2::ZERO),
                Some(p) => {
                    debug_assert!(p.0 < i, "parent must resolve before child");
                    (out[p.0].ndc, node.body.orbit_offset(time))
                }
            };

            let orbit_frame = aspect_fix
                * Mat4::from_translation(Vec3::new(center.x * frame.aspect, center.y, 0.0));
            let model = orbit_frame
                * Mat4::from_translation(orbit.extend(0.0))
                * node.body.attitude(time);

            let ndc = (model * Vec4::W).xy();
            out.push(ResolvedPlacement {
                model,
                orbit_frame,
                ndc,
                screen: ndc_to_screen(ndc, frame.framebuffer),
            });
        }
    }

    pub fn resolve(&self, time: f32, frame: &FrameAnchor) -> Vec<ResolvedPlacement> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.resolve_into(time, frame, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;

    const EPS: f32 = 1e-4;

    fn square_frame(anchor: Vec2) -> FrameAnchor {
        FrameAnchor::new(anchor, 800.0, 800.0)
    }

    /// sun → earth → moon with the demo's constants.
    fn solar() -> (OrbitChain, BodyId, BodyId) {
        let mut chain = OrbitChain::new(OrbitingBody::fixed());
        let earth = chain.add_child(
            chain.root(),
            OrbitingBody::orbiting(0.75, 0.3)
                .with_spin(3.0, SpinAxis::InPlane)
                .with_tilt(-23.5),
        );
        let moon = chain.add_child(
            earth,
            OrbitingBody::orbiting(0.25, 0.3).with_spin(0.3, SpinAxis::View),
        );
        (chain, earth, moon)
    }

    // ── root ──────────────────────────────────────────────────────────────

    #[test]
    fn root_sits_on_anchor() {
        let (chain, _, _) = solar();
        for (w, h) in [(800.0, 800.0), (1280.0, 720.0), (600.0, 900.0)] {
            let anchor = Vec2::new(0.3, -0.6);
            let out = chain.resolve(5.0, &FrameAnchor::new(anchor, w, h));
            assert!((out[0].ndc - anchor).length() < EPS);
        }
    }

    #[test]
    fn degenerate_frame_keeps_placements_finite() {
        let (chain, earth, moon) = solar();
        let anchor = Vec2::new(0.2, 0.1);
        for (w, h) in [(0.0, 600.0), (800.0, 0.0), (f32::INFINITY, 600.0)] {
            let frame = FrameAnchor::new(anchor, w, h);
            assert_eq!(frame.aspect, 1.0);
            let out = chain.resolve(1.0, &frame);
            assert!((out[0].ndc - anchor).length() < EPS);
            assert!(out[earth.index()].ndc.is_finite());
            assert!(out[moon.index()].ndc.is_finite());
        }
    }

    #[test]
    fn root_model_applies_aspect_once() {
        let chain = OrbitChain::new(OrbitingBody::fixed());
        let frame = FrameAnchor::new(Vec2::ZERO, 1600.0, 800.0);
        let out = chain.resolve(0.0, &frame);
        let edge = out[0].model.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!((edge.x - 0.5).abs() < EPS);
        assert!((edge.y - 1.0).abs() < EPS);
    }

    // ── orbit geometry ────────────────────────────────────────────────────

    #[test]
    fn child_of_stationary_parent_traces_circle() {
        let mut chain = OrbitChain::new(OrbitingBody::fixed());
        let planet = chain.add_child(chain.root(), OrbitingBody::orbiting(0.5, 0.0));
        let radius = 0.2;
        let speed = 1.7;
        let moon = chain.add_child(planet, OrbitingBody::orbiting(radius, speed));

        let frame = square_frame(Vec2::new(-0.2, 0.1));
        let period = TAU / speed;
        let parent_at_zero = chain.resolve(0.0, &frame)[planet.index()].ndc;

        for i in 0..=64 {
            let t = period * i as f32 / 64.0;
            let out = chain.resolve(t, &frame);
            let parent = out[planet.index()].ndc;
            assert!((parent - parent_at_zero).length() < EPS, "parent drifted at t={t}");
            let d = (out[moon.index()].ndc - parent).length();
            assert!((d - radius).abs() < EPS, "distance {d} at t={t}");
        }
    }

    #[test]
    fn orbit_is_circular_in_aspect_corrected_space() {
        let (chain, earth, _) = solar();
        let frame = FrameAnchor::new(Vec2::ZERO, 1280.0, 720.0);
        for i in 0..32 {
            let t = i as f32 * 0.9;
            let out = chain.resolve(t, &frame);
            let d = out[earth.index()].ndc - out[0].ndc;
            let corrected = Vec2::new(d.x * frame.aspect, d.y).length();
            assert!((corrected - 0.75).abs() < EPS);
        }
    }

    #[test]
    fn tilt_and_spin_do_not_move_center() {
        let mut still = OrbitChain::new(OrbitingBody::fixed());
        still.add_child(still.root(), OrbitingBody::orbiting(0.4, 0.6));

        let mut spun = OrbitChain::new(OrbitingBody::fixed());
        spun.add_child(
            spun.root(),
            OrbitingBody::orbiting(0.4, 0.6).with_tilt(40.0).with_spin(7.0, SpinAxis::InPlane),
        );

        let frame = FrameAnchor::new(Vec2::new(0.1, 0.1), 1024.0, 768.0);
        let a = still.resolve(2.5, &frame);
        let b = spun.resolve(2.5, &frame);
        assert!((a[1].ndc - b[1].ndc).length() < EPS);
        assert!(!a[1].model.abs_diff_eq(b[1].model, EPS));
    }

    #[test]
    fn moon_follows_earth_of_same_frame() {
        let (chain, earth, moon) = solar();
        let frame = square_frame(Vec2::ZERO);
        let t = 4.2;
        let out = chain.resolve(t, &frame);
        let expected = out[earth.index()].ndc + chain.body(moon).orbit_offset(t);
        assert!((out[moon.index()].ndc - expected).length() < EPS);
    }

    #[test]
    fn child_orbit_frame_is_centered_on_parent() {
        let (chain, earth, moon) = solar();
        let frame = FrameAnchor::new(Vec2::new(0.4, 0.2), 1280.0, 720.0);
        let out = chain.resolve(1.0, &frame);
        let center = out[moon.index()].orbit_frame.transform_point3(Vec3::ZERO);
        assert!((center.truncate() - out[earth.index()].ndc).length() < EPS);
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn sibling_order_does_not_matter() {
        let a_body = OrbitingBody::orbiting(0.6, 0.4).with_spin(1.0, SpinAxis::View);
        let b_body = OrbitingBody::orbiting(0.3, -1.1).with_tilt(12.0);

        let mut first = OrbitChain::new(OrbitingBody::fixed());
        let a1 = first.add_child(first.root(), a_body);
        let b1 = first.add_child(first.root(), b_body);

        let mut second = OrbitChain::new(OrbitingBody::fixed());
        let b2 = second.add_child(second.root(), b_body);
        let a2 = second.add_child(second.root(), a_body);

        let frame = FrameAnchor::new(Vec2::new(-0.3, 0.5), 900.0, 600.0);
        for t in [0.0, 0.8, 13.0] {
            let p = first.resolve(t, &frame);
            let q = second.resolve(t, &frame);
            assert_eq!(p[a1.index()], q[a2.index()]);
            assert_eq!(p[b1.index()], q[b2.index()]);
        }
    }

    #[test]
    fn ids_follow_insertion_order() {
        let (chain, earth, moon) = solar();
        let ids: Vec<_> = chain.ids().collect();
        assert_eq!(ids, vec![chain.root(), earth, moon]);
        assert_eq!(chain.parent(moon), Some(earth));
        assert_eq!(chain.parent(chain.root()), None);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
    }

    #[test]
    #[should_panic]
    fn foreign_parent_is_rejected() {
        let (_, _, moon) = solar();
        let mut small = OrbitChain::new(OrbitingBody::fixed());
        small.add_child(moon, OrbitingBody::orbiting(0.1, 1.0));
    }

    // ── screen space ──────────────────────────────────────────────────────

    #[test]
    fn screen_center_matches_ndc() {
        let (chain, earth, _) = solar();
        let frame = FrameAnchor::new(Vec2::new(0.25, -0.5), 1600.0, 900.0);
        let out = chain.resolve(3.3, &frame);
        let p = out[earth.index()];
        assert!((p.screen.x - (p.ndc.x + 1.0) * 0.5 * 1600.0).abs() < 1e-2);
        assert!((p.screen.y - (p.ndc.y + 1.0) * 0.5 * 900.0).abs() < 1e-2);
    }

    #[test]
    fn resolve_into_regenerates_buffer() {
        let (chain, _, _) = solar();
        let frame = square_frame(Vec2::ZERO);
        let mut buf = chain.resolve(1.0, &frame);
        buf.extend(chain.resolve(2.0, &frame));
        chain.resolve_into(2.0, &frame, &mut buf);
        assert_eq!(buf.len(), chain.len());
        assert_eq!(buf, chain.resolve(2.0, &frame));
    }
}
