use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{depth_test_state, uniform_binding_size, CameraUniform};

/// World-space line list renderer.
///
/// Vertices are consumed in pairs (one segment per pair) and re-uploaded on
/// every call; the vertex buffer grows to the next power of two and is reused.
#[derive(Default)]
pub struct LineRenderer {
    pipeline_key: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `vertices` as a line list in a single color.
    ///
    /// A trailing unpaired vertex is ignored.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraUniform,
        color: Color,
        vertices: &[Vec3],
    ) {
        let count = vertices.len() & !1;
        if count == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vertex_capacity(ctx, count);

        if let Some(ubo) = self.ubo.as_ref() {
            let u = LineUniform {
                camera: *camera,
                color: color.to_array(),
            };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(vbo, 0, bytemuck::cast_slice(&vertices[..count]));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_load_pass("kinema line pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..count as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kinema line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("kinema line bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(uniform_binding_size::<LineUniform>()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("kinema line pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kinema line pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[line_vertex_layout()],
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
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: depth_test_state(ctx.depth_format, true),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kinema line ubo"),
            size: std::mem::size_of::<LineUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kinema line bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kinema line vbo"),
            size: (new_cap * std::mem::size_of::<Vec3>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
        log::trace!("line vbo grown to {new_cap} vertices");
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineUniform {
    camera: CameraUniform,
    color: [f32; 4],
}

const LINE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<LineUniform>(), 112);
    }
}
