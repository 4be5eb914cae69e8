/// Depth attachment sized to the surface.
///
/// Recreated whenever the surface is reconfigured to a new size.
pub struct DepthBuffer {
    format: wgpu::TextureFormat,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthBuffer {
    pub const DEFAULT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let (texture, view) = create(device, format, width, height);
        Self { format, texture, view }
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Replaces the attachment if the size changed.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let current = self.texture.size();
        if current.width == width.max(1) && current.height == height.max(1) {
            return;
        }
        let (texture, view) = create(device, self.format, width, height);
        self.texture = texture;
        self.view = view;
    }
}

fn create(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("kinema depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
