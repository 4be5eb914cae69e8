//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, bind groups, buffers),
//! creates them lazily on first use and recreates pipelines only when the
//! surface or depth format changes.
//!
//! Convention:
//! - 3D renderers take a [`CameraUniform`] with a view-projection matrix.
//! - Passes load the color/depth attachments cleared by `FrameCtx::render`.

mod common;
mod ctx;
mod instanced_mesh;
mod lines;
mod mesh;
mod slots;
mod texture;

pub use common::{
    color_load_attachment, depth_load_attachment, depth_test_state, uniform_binding_size,
    CameraUniform,
};
pub use ctx::{RenderCtx, RenderTarget};
pub use instanced_mesh::{InstancedMeshRenderer, InstancedMeshStyle};
pub use lines::LineRenderer;
pub use mesh::GpuMesh;
pub use slots::{aligned_stride, UniformSlots};
pub use texture::{checker_pixels, decode_rgba_flipped, Texture2d};
