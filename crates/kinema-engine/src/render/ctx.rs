use crate::coords::Viewport;

use super::common::{color_load_attachment, depth_load_attachment};

/// Renderer-facing context (device/queue + target formats + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Depth attachment format, `None` when the surface has no depth buffer.
    pub depth_format: Option<wgpu::TextureFormat>,
    pub viewport: Viewport, // logical px
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            depth_format,
            viewport,
            scale_factor,
        }
    }

    /// Width / height of the drawable area.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }
}

/// Target for drawing (encoder + color view + optional depth view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: Option<&'a wgpu::TextureView>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        depth_view: Option<&'a wgpu::TextureView>,
    ) -> Self {
        Self {
            encoder,
            color_view,
            depth_view,
        }
    }

    /// Begins a pass that loads (keeps) the current color and depth contents.
    pub fn begin_load_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        let depth = depth_load_attachment(self.depth_view);
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(color_load_attachment(self.color_view))],
            depth_stencil_attachment: depth,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
