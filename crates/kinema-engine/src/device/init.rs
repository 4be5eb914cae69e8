use super::depth::DepthBuffer;

/// How the demo's GPU context is requested.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    /// Falls back to the first supported mode when unavailable.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
    /// Depth attachment kept alongside the swapchain; `None` for flat scenes.
    pub depth_format: Option<wgpu::TextureFormat>,
}

impl Default for GpuInit {
    /// Vsynced sRGB surface with a depth buffer, as the 3D demos need.
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            depth_format: Some(DepthBuffer::DEFAULT_FORMAT),
        }
    }
}

impl GpuInit {
    /// Default settings without a depth attachment, for painter's-order 2D scenes.
    pub fn flat() -> Self {
        Self {
            depth_format: None,
            ..Self::default()
        }
    }
}

/// First sRGB 8-bit format when preferred and offered, otherwise the
/// surface's own first choice.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    const SRGB: [wgpu::TextureFormat; 2] = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];

    prefer_srgb
        .then(|| SRGB.into_iter().find(|f| formats.contains(f)))
        .flatten()
        .or_else(|| formats.first().copied())
}

/// First requested alpha mode the surface supports, else its first mode.
pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::CompositeAlphaMode as A;
    use wgpu::TextureFormat as F;

    #[test]
    fn srgb_wins_when_offered() {
        let formats = [F::Bgra8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn linear_surface_is_accepted() {
        assert_eq!(choose_surface_format(&[F::Rgba16Float], true), Some(F::Rgba16Float));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        assert_eq!(choose_alpha_mode(&[A::Opaque], Some(A::PreMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::Opaque, A::PreMultiplied], Some(A::PreMultiplied)), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[], None), A::Auto);
    }

    #[test]
    fn flat_init_has_no_depth() {
        assert_eq!(GpuInit::default().depth_format, Some(DepthBuffer::DEFAULT_FORMAT));
        assert_eq!(GpuInit::flat().depth_format, None);
    }
}
