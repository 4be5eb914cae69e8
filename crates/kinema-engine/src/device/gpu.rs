use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::depth::DepthBuffer;
use super::init::{choose_alpha_mode, choose_surface_format, GpuInit};

/// Device, queue and the window's swapchain (plus optional depth buffer).
///
/// The surface borrows the window for `'w`.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: Option<DepthBuffer>,
    /// Last size reported by the window; may be 0x0 while minimized.
    size: PhysicalSize<u32>,
}

/// One acquired swapchain image and the encoder recording into it.
///
/// Must be handed back to [`Gpu::submit`] before the next frame is acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the caller should do after a failed acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame should succeed.
    Reconfigured,
    SkipFrame,
    /// Out of memory; stop rendering.
    Fatal,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("adapter '{}' ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("kinema device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: choose_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        let depth = init
            .depth_format
            .map(|f| DepthBuffer::new(&device, f, size.width, size.height));

        log::debug!(
            "surface {}x{} {format:?}, depth {:?}",
            size.width,
            size.height,
            init.depth_format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            size,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth.as_ref().map(DepthBuffer::format)
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth.as_ref().map(DepthBuffer::view)
    }

    /// Follows a window resize. A 0x0 size (minimized) is recorded but the
    /// swapchain keeps its previous configuration until a real size arrives.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        if let Some(depth) = self.depth.as_mut() {
            depth.resize(&self.device, new_size.width, new_size.height);
        }
    }

    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kinema frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Reconfigures on lost/outdated surfaces and classifies the error.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface_error_action(&err);
        match action {
            SurfaceErrorAction::Reconfigured if self.size.width > 0 && self.size.height > 0 => {
                self.surface.configure(&self.device, &self.config);
                log::debug!("surface {err}; reconfigured");
            }
            SurfaceErrorAction::Fatal => log::error!("surface {err}; giving up"),
            _ => log::trace!("surface {err}; frame skipped"),
        }
        action
    }
}

fn surface_error_action(err: &SurfaceError) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_map_to_actions() {
        use SurfaceErrorAction::*;
        assert_eq!(surface_error_action(&SurfaceError::Lost), Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::Outdated), Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::OutOfMemory), Fatal);
        assert_eq!(surface_error_action(&SurfaceError::Timeout), SkipFrame);
        assert_eq!(surface_error_action(&SurfaceError::Other), SkipFrame);
    }
}
