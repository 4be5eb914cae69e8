//! wgpu device, swapchain and depth buffer for the demo window.

mod depth;
mod gpu;
mod init;

pub use depth::DepthBuffer;
pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
