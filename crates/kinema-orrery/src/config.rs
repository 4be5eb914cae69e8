use std::path::PathBuf;

use anyhow::{bail, Result};
use kinema_engine::paint::Color;
use kinema_kernels::{BodyId, OrbitChain, OrbitingBody, SpinAxis};

/// Fragment treatment of a body's disc.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shading {
    /// Untextured, time-animated glow.
    Sun,
    Earth,
    Moon,
}

impl Shading {
    /// Shader mode selector; `3` is reserved for orbit rings.
    pub fn mode(self) -> u32 {
        match self {
            Shading::Sun => 0,
            Shading::Earth => 1,
            Shading::Moon => 2,
        }
    }
}

/// One body of the orrery.
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub name: &'static str,
    /// Index of the parent in [`OrreryConfig::bodies`]; `None` for the root.
    pub parent: Option<usize>,
    pub body: OrbitingBody,
    pub disc_radius: f32,
    pub shading: Shading,
    /// Points on the dashed orbit ring; `0` draws no ring.
    pub ring_segments: u32,
}

#[derive(Debug, Clone)]
pub struct OrreryConfig {
    /// Root first, every parent before its children.
    pub bodies: Vec<BodySpec>,
    pub disc_segments: u32,
    pub earth_texture: PathBuf,
    pub moon_texture: PathBuf,
    pub clear_color: Color,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            bodies: vec![
                BodySpec {
                    name: "sun",
                    parent: None,
                    body: OrbitingBody::fixed(),
                    disc_radius: 0.3,
                    shading: Shading::Sun,
                    ring_segments: 0,
                },
                BodySpec {
                    name: "earth",
                    parent: Some(0),
                    body: OrbitingBody::orbiting(0.75, 0.3)
                        .with_spin(3.0, SpinAxis::InPlane)
                        .with_tilt(-23.5),
                    disc_radius: 0.2,
                    shading: Shading::Earth,
                    ring_segments: 100,
                },
                BodySpec {
                    name: "moon",
                    parent: Some(1),
                    body: OrbitingBody::orbiting(0.25, 0.3).with_spin(0.3, SpinAxis::View),
                    disc_radius: 0.1,
                    shading: Shading::Moon,
                    ring_segments: 60,
                },
            ],
            disc_segments: 64,
            earth_texture: resource("textures/earth.png"),
            moon_texture: resource("textures/moon.png"),
            clear_color: Color::rgb(0.1, 0.1, 0.1),
        }
    }
}

fn resource(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources").join(rel)
}

impl OrreryConfig {
    /// Builds the orbit chain; `ids[i]` is the handle of `bodies[i]`.
    pub fn build_chain(&self) -> Result<(OrbitChain, Vec<BodyId>)> {
        let Some((root, rest)) = self.bodies.split_first() else {
            bail!("orrery has no bodies");
        };
        if root.parent.is_some() {
            bail!("first body '{}' must be the root", root.name);
        }

        let mut chain = OrbitChain::new(root.body);
        let mut ids = Vec::with_capacity(self.bodies.len());
        ids.push(chain.root());

        for (i, spec) in rest.iter().enumerate().map(|(i, s)| (i + 1, s)) {
            let parent = match spec.parent {
                Some(p) if p < i => ids[p],
                Some(p) => bail!("body '{}' names parent {p}, which is not listed before it", spec.name),
                None => bail!("body '{}' has no parent; only the first body may be the root", spec.name),
            };
            ids.push(chain.add_child(parent, spec.body));
        }

        Ok((chain, ids))
    }

    pub fn log_summary(&self) {
        for spec in &self.bodies {
            let parent = spec
                .parent
                .and_then(|p| self.bodies.get(p))
                .map_or("-", |b| b.name);
            log::info!(
                "body {:<6} parent {:<6} orbit r={} w={} spin={} tilt={}",
                spec.name,
                parent,
                spec.body.orbit_radius,
                spec.body.orbit_angular_speed,
                spec.body.self_rotation_speed,
                spec.body.axial_tilt_degrees
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sun_earth_moon() {
        let cfg = OrreryConfig::default();
        let names: Vec<_> = cfg.bodies.iter().map(|b| b.name).collect();
        assert_eq!(names, ["sun", "earth", "moon"]);
        assert_eq!(cfg.bodies[1].body.axial_tilt_degrees, -23.5);
        assert_eq!(cfg.bodies[2].body.spin_axis, SpinAxis::View);
        assert_eq!(cfg.disc_segments, 64);
        assert!(cfg.earth_texture.ends_with("textures/earth.png"));
    }

    #[test]
    fn build_chain_preserves_parents() {
        let cfg = OrreryConfig::default();
        let (chain, ids) = cfg.build_chain().unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.parent(ids[0]), None);
        assert_eq!(chain.parent(ids[1]), Some(ids[0]));
        assert_eq!(chain.parent(ids[2]), Some(ids[1]));
    }

    #[test]
    fn forward_parent_is_rejected() {
        let mut cfg = OrreryConfig::default();
        cfg.bodies[1].parent = Some(2);
        let err = cfg.build_chain().unwrap_err();
        assert!(err.to_string().contains("earth"));
    }

    #[test]
    fn second_root_is_rejected() {
        let mut cfg = OrreryConfig::default();
        cfg.bodies[2].parent = None;
        assert!(cfg.build_chain().is_err());
    }

    #[test]
    fn empty_config_is_rejected() {
        let cfg = OrreryConfig {
            bodies: Vec::new(),
            ..OrreryConfig::default()
        };
        assert!(cfg.build_chain().is_err());
    }

    #[test]
    fn shading_modes_are_distinct() {
        let modes = [Shading::Sun, Shading::Earth, Shading::Moon].map(Shading::mode);
        assert_eq!(modes, [0, 1, 2]);
    }
}
