use glam::Vec2;
use kinema_engine::core::{App, AppControl, FrameCtx};
use kinema_engine::geometry::{dashed_ring, disc};
use kinema_engine::input::Key;
use kinema_engine::render::{GpuMesh, RenderCtx, Texture2d};
use kinema_kernels::{ndc_to_screen, BodyId, FrameAnchor, OrbitChain, ResolvedPlacement};

use crate::config::OrreryConfig;
use crate::render::{BodyDraw, BodyRenderer, BodyUniform, DrawKey, RING_MODE};

/// Sun, earth and moon on nested orbits, anchored at the pointer.
pub struct OrreryScene {
    config: OrreryConfig,
    chain: OrbitChain,
    /// `ids[i]` is the chain handle of `config.bodies[i]`.
    ids: Vec<BodyId>,
    placements: Vec<ResolvedPlacement>,
    /// Last known pointer position in NDC.
    anchor: Vec2,
    gpu: Option<OrreryGpu>,
}

/// GPU state created on the first rendered frame.
struct OrreryGpu {
    renderer: BodyRenderer,
    bodies: Vec<GpuBody>,
}

struct GpuBody {
    id: BodyId,
    mode: u32,
    disc: GpuMesh,
    slot: usize,
    /// Orbit ring mesh and its slot.
    ring: Option<(GpuMesh, usize)>,
}

impl OrreryScene {
    pub fn new(config: OrreryConfig) -> anyhow::Result<Self> {
        let (chain, ids) = config.build_chain()?;
        Ok(Self {
            placements: Vec::with_capacity(chain.len()),
            config,
            chain,
            ids,
            anchor: Vec2::ZERO,
            gpu: None,
        })
    }
}

impl OrreryGpu {
    fn new(ctx: &RenderCtx<'_>, config: &OrreryConfig, ids: &[BodyId]) -> Self {
        let earth = Texture2d::load_or_checker(ctx.device, ctx.queue, &config.earth_texture);
        let moon = Texture2d::load_or_checker(ctx.device, ctx.queue, &config.moon_texture);

        let has_ring = |i: usize| config.bodies[i].parent.is_some() && config.bodies[i].ring_segments > 0;

        let mut keys: Vec<DrawKey> = ids.iter().map(|&id| DrawKey::Body(id)).collect();
        keys.extend(
            ids.iter()
                .enumerate()
                .filter(|&(i, _)| has_ring(i))
                .map(|(_, &id)| DrawKey::Orbit(id)),
        );
        let renderer = BodyRenderer::new(ctx, &keys, &earth, &moon);

        let mut bodies = Vec::with_capacity(ids.len());
        for (i, (spec, &id)) in config.bodies.iter().zip(ids).enumerate() {
            let Some(slot) = renderer.slot(DrawKey::Body(id)) else {
                log::warn!("no uniform slot for {}, skipped", spec.name);
                continue;
            };
            let disc_mesh = GpuMesh::upload(
                ctx.device,
                spec.name,
                &disc(config.disc_segments, spec.disc_radius),
            );
            let ring = renderer
                .slot(DrawKey::Orbit(id))
                .filter(|_| has_ring(i))
                .map(|ring_slot| {
                    let orbit = dashed_ring(spec.ring_segments, spec.body.orbit_radius);
                    let label = format!("{} orbit", spec.name);
                    (GpuMesh::upload(ctx.device, &label, &orbit), ring_slot)
                });
            bodies.push(GpuBody {
                id,
                mode: spec.shading.mode(),
                disc: disc_mesh,
                slot,
                ring,
            });
        }

        Self { renderer, bodies }
    }
}

impl App for OrreryScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        if let Some((x, y)) = ctx.input.pointer_pos {
            self.anchor = ctx.window.viewport().ndc_from_logical(x, y);
        }

        let (fb_w, fb_h) = ctx.window.framebuffer_size();
        let frame = FrameAnchor::new(self.anchor, fb_w, fb_h);
        let time = ctx.time.elapsed;
        self.chain.resolve_into(time, &frame, &mut self.placements);

        let mouse = ndc_to_screen(self.anchor, frame.framebuffer);

        let gpu_slot = &mut self.gpu;
        let config = &self.config;
        let chain = &self.chain;
        let ids = &self.ids;
        let placements = &self.placements;

        ctx.render(config.clear_color, |rctx, target| {
            let gpu = gpu_slot.get_or_insert_with(|| OrreryGpu::new(rctx, config, ids));

            let uniform = |transform, center, mode| {
                BodyUniform::new(transform, center, mouse, frame.framebuffer, time, mode)
            };

            let mut draws = Vec::with_capacity(gpu.bodies.len() * 2);
            for body in &gpu.bodies {
                let p = &placements[body.id.index()];
                draws.push(BodyDraw {
                    slot: body.slot,
                    mesh: &body.disc,
                    uniform: uniform(p.model, p.screen, body.mode),
                });
            }
            for body in &gpu.bodies {
                let (Some((mesh, slot)), Some(parent)) = (&body.ring, chain.parent(body.id)) else {
                    continue;
                };
                let p = &placements[body.id.index()];
                draws.push(BodyDraw {
                    slot: *slot,
                    mesh,
                    uniform: uniform(p.orbit_frame, placements[parent.index()].screen, RING_MODE),
                });
            }

            gpu.renderer.render(rctx, target, &draws);
        })
    }
}
