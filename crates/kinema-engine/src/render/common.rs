//! Shared GPU types and helpers used by the renderers.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

// ── attachments ───────────────────────────────────────────────────────────

/// Color attachment that keeps the cleared frame contents.
pub fn color_load_attachment(view: &wgpu::TextureView) -> wgpu::RenderPassColorAttachment<'_> {
    wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Load,
            store: wgpu::StoreOp::Store,
        },
        depth_slice: None,
    }
}

/// Depth attachment that keeps the cleared depth contents, if a depth view exists.
pub fn depth_load_attachment(
    view: Option<&wgpu::TextureView>,
) -> Option<wgpu::RenderPassDepthStencilAttachment<'_>> {
    view.map(|view| wgpu::RenderPassDepthStencilAttachment {
        view,
        depth_ops: Some(wgpu::Operations {
            load: wgpu::LoadOp::Load,
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: None,
    })
}

/// Less-equal depth test for pipelines drawn into a depth-enabled target.
///
/// Returns `None` for targets without depth so the same renderer works in
/// flat (2D) scenes.
pub fn depth_test_state(
    format: Option<wgpu::TextureFormat>,
    write: bool,
) -> Option<wgpu::DepthStencilState> {
    format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    })
}

// ── uniform sizing ────────────────────────────────────────────────────────

/// Returns the `wgpu` minimum binding size for uniform type `T`.
///
/// Uniform structs in this crate are never zero-sized.
pub fn uniform_binding_size<T: Pod>() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
        .expect("uniform structs have non-zero size by construction")
}

// ── camera uniform ────────────────────────────────────────────────────────

/// Per-frame camera data shared by the 3D renderers.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position, w unused.
    pub eye: [f32; 4],
    /// xyz = direction towards the light (normalized), w unused.
    pub light_dir: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4, eye: Vec3, light_dir: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            light_dir: light_dir.normalize_or_zero().extend(0.0).to_array(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Vec3::ZERO, Vec3::new(0.3, 1.0, 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_uniform_is_std140_friendly() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 96);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }

    #[test]
    fn camera_uniform_stores_columns() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = CameraUniform::new(m, Vec3::ONE, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(u.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.light_dir, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(u.eye, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn depth_state_follows_format() {
        assert!(depth_test_state(None, true).is_none());
        let s = depth_test_state(Some(wgpu::TextureFormat::Depth32Float), false);
        assert!(s.is_some_and(|s| !s.depth_write_enabled));
    }
}
