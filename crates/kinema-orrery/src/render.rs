//! Disc and orbit-ring drawing for the orrery.
//!
//! All draws of a frame share one uniform buffer: every body and every orbit
//! ring owns a fixed slot, resolved when the renderer is created, and is
//! selected per draw with a dynamic offset.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};
use kinema_engine::geometry::{MeshTopology, MeshVertex};
use kinema_engine::render::{
    depth_test_state, uniform_binding_size, GpuMesh, RenderCtx, RenderTarget, Texture2d,
    UniformSlots,
};
use kinema_kernels::BodyId;

/// Shader mode of orbit rings.
pub const RING_MODE: u32 = 3;

/// Owner of a uniform slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawKey {
    Body(BodyId),
    Orbit(BodyId),
}

/// Per-draw shader inputs. Positions are framebuffer pixels, bottom-left origin.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BodyUniform {
    pub transform: [[f32; 4]; 4],
    pub center: [f32; 2],
    pub mouse: [f32; 2],
    pub frame: [f32; 2],
    pub time: f32,
    pub mode: u32,
}

impl BodyUniform {
    pub fn new(transform: Mat4, center: Vec2, mouse: Vec2, frame: Vec2, time: f32, mode: u32) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            center: center.to_array(),
            mouse: mouse.to_array(),
            frame: frame.to_array(),
            time,
            mode,
        }
    }
}

/// One indexed draw.
pub struct BodyDraw<'a> {
    pub slot: usize,
    pub mesh: &'a GpuMesh,
    pub uniform: BodyUniform,
}

pub struct BodyRenderer {
    slots: UniformSlots<DrawKey>,
    staging: Vec<u8>,
    ubo: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,

    pipeline_key: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    fill_pipeline: Option<wgpu::RenderPipeline>,
    ring_pipeline: Option<wgpu::RenderPipeline>,
}

impl BodyRenderer {
    /// Creates the uniform table for `keys` and binds both body textures.
    pub fn new(ctx: &RenderCtx<'_>, keys: &[DrawKey], earth: &Texture2d, moon: &Texture2d) -> Self {
        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment;
        let slots = UniformSlots::new(keys, std::mem::size_of::<BodyUniform>() as u64, alignment);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kinema orrery ubo"),
            size: slots.buffer_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("kinema orrery bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: true,
                                min_binding_size: Some(uniform_binding_size::<BodyUniform>()),
                            },
                            count: None,
                        },
                        texture_entry(1),
                        sampler_entry(2),
                        texture_entry(3),
                        sampler_entry(4),
                    ],
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kinema orrery bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &ubo,
                        offset: 0,
                        size: Some(uniform_binding_size::<BodyUniform>()),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&earth.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&earth.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&moon.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&moon.sampler),
                },
            ],
        });

        log::debug!(
            "orrery uniform table: {} slots, stride {}",
            slots.len(),
            slots.stride()
        );

        Self {
            staging: vec![0; slots.buffer_size() as usize],
            slots,
            ubo,
            bind_group_layout,
            bind_group,
            pipeline_key: None,
            fill_pipeline: None,
            ring_pipeline: None,
        }
    }

    pub fn slot(&self, key: DrawKey) -> Option<usize> {
        self.slots.slot(key)
    }

    /// Uploads every draw's uniform, then issues the draws in order in one pass.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draws: &[BodyDraw<'_>]) {
        if draws.is_empty() {
            return;
        }
        self.ensure_pipelines(ctx);

        for draw in draws {
            let start = self.slots.byte_offset(draw.slot) as usize;
            let bytes = bytemuck::bytes_of(&draw.uniform);
            self.staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        ctx.queue.write_buffer(&self.ubo, 0, &self.staging);

        let (Some(fill), Some(ring)) = (self.fill_pipeline.as_ref(), self.ring_pipeline.as_ref()) else {
            return;
        };

        let mut rpass = target.begin_load_pass("kinema orrery pass");
        for draw in draws {
            let pipeline = match draw.mesh.topology {
                MeshTopology::Triangles => fill,
                MeshTopology::Lines => ring,
            };
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[self.slots.dynamic_offset(draw.slot)]);
            draw.mesh.bind(&mut rpass);
            rpass.draw_indexed(0..draw.mesh.index_count, 0, 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_key == Some(key) && self.fill_pipeline.is_some() && self.ring_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kinema orrery shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/body.wgsl").into()),
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("kinema orrery pipeline layout"),
                    bind_group_layouts: &[&self.bind_group_layout],
                    immediate_size: 0,
                });

        let build = |label: &str, topology: MeshTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[MeshVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: topology.to_wgpu(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Spinning discs show their back face half the time.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: depth_test_state(ctx.depth_format, false),
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            })
        };

        self.fill_pipeline = Some(build("kinema orrery fill pipeline", MeshTopology::Triangles));
        self.ring_pipeline = Some(build("kinema orrery ring pipeline", MeshTopology::Lines));
        self.pipeline_key = Some(key);
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<BodyUniform>(), 96);
        assert_eq!(std::mem::offset_of!(BodyUniform, center), 64);
        assert_eq!(std::mem::offset_of!(BodyUniform, frame), 80);
        assert_eq!(std::mem::offset_of!(BodyUniform, mode), 92);
    }

    #[test]
    fn uniform_stores_matrix_columns() {
        let m = Mat4::from_translation(glam::Vec3::new(0.5, -0.25, 0.0));
        let u = BodyUniform::new(m, Vec2::new(1.0, 2.0), Vec2::ZERO, Vec2::new(800.0, 800.0), 1.5, RING_MODE);
        assert_eq!(u.transform[3], [0.5, -0.25, 0.0, 1.0]);
        assert_eq!(u.center, [1.0, 2.0]);
        assert_eq!(u.mode, 3);
    }

    #[test]
    fn draw_keys_index_slots() {
        let (chain, ids) = crate::config::OrreryConfig::default().build_chain().unwrap();
        assert_eq!(chain.len(), 3);
        let keys = [DrawKey::Body(ids[0]), DrawKey::Body(ids[1]), DrawKey::Orbit(ids[1])];
        let slots = UniformSlots::new(&keys, std::mem::size_of::<BodyUniform>() as u64, 256);
        assert_eq!(slots.slot(DrawKey::Orbit(ids[1])), Some(2));
        assert_eq!(slots.slot(DrawKey::Orbit(ids[0])), None);
        assert_eq!(slots.dynamic_offset(2), 512);
    }
}
