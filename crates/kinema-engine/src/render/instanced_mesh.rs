use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::geometry::{MeshTopology, MeshVertex};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{depth_test_state, uniform_binding_size, CameraUniform};
use super::mesh::GpuMesh;

/// Shading parameters for instanced meshes.
///
/// Instances are tinted from `base_color` to `crest_color` by the height of
/// their translation: `rest_height` maps to the midpoint and
/// `rest_height ± height_range` to the two ends.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InstancedMeshStyle {
    pub base_color: Color,
    pub crest_color: Color,
    pub rest_height: f32,
    pub height_range: f32,
}

impl Default for InstancedMeshStyle {
    fn default() -> Self {
        Self {
            base_color: Color::rgb(0.05, 0.25, 0.55),
            crest_color: Color::rgb(0.85, 0.95, 1.0),
            rest_height: 0.0,
            height_range: 1.0,
        }
    }
}

/// Draws one static mesh many times, each instance offset by a world-space
/// translation. Lambert + Blinn shading, depth-tested when the target has depth.
#[derive(Default)]
pub struct InstancedMeshRenderer {
    pipeline_key: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    ubo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    style: InstancedMeshStyle,
    warned_topology: bool,
}

impl InstancedMeshRenderer {
    pub fn new(style: InstancedMeshStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> &InstancedMeshStyle {
        &self.style
    }

    /// Draws `mesh` once per entry of `instances`.
    ///
    /// Only triangle meshes are supported; other topologies are ignored
    /// (one-time debug message).
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mesh: &GpuMesh,
        camera: &CameraUniform,
        instances: &[Vec3],
    ) {
        if mesh.topology != MeshTopology::Triangles {
            if !self.warned_topology {
                log::debug!("InstancedMeshRenderer: non-triangle mesh ignored");
                self.warned_topology = true;
            }
            return;
        }
        if instances.is_empty() || mesh.index_count == 0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        self.write_uniform(ctx, camera);

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_load_pass("kinema instanced mesh pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        mesh.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.draw_indexed(0..mesh.index_count, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kinema instanced mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/instanced_mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("kinema instanced mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(uniform_binding_size::<InstancedUniform>()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("kinema instanced mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kinema instanced mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout(), instance_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
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
            label: Some("kinema instanced mesh ubo"),
            size: std::mem::size_of::<InstancedUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kinema instanced mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_uniform(&self, ctx: &RenderCtx<'_>, camera: &CameraUniform) {
        let Some(ubo) = self.ubo.as_ref() else { return };
        let u = InstancedUniform::new(camera, &self.style);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<Vec3>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kinema instanced mesh instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstancedUniform {
    camera: CameraUniform,
    base_color: [f32; 4],
    crest_color: [f32; 4],
    /// x = rest height, y = half range, zw unused.
    height_band: [f32; 4],
}

impl InstancedUniform {
    fn new(camera: &CameraUniform, style: &InstancedMeshStyle) -> Self {
        Self {
            camera: *camera,
            base_color: style.base_color.to_array(),
            crest_color: style.crest_color.to_array(),
            height_band: [style.rest_height, style.height_range.max(1e-4), 0.0, 0.0],
        }
    }
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
    3 => Float32x3 // translation
];

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<InstancedUniform>(), 144);
        assert_eq!(std::mem::size_of::<Vec3>(), 12);
    }

    #[test]
    fn height_range_is_never_zero() {
        let style = InstancedMeshStyle {
            height_range: 0.0,
            ..InstancedMeshStyle::default()
        };
        let u = InstancedUniform::new(&CameraUniform::default(), &style);
        assert!(u.height_band[1] > 0.0);
    }
}
