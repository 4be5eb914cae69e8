//! CPU-side mesh generators.
//!
//! Generators return a [`MeshData`] (interleaved [`MeshVertex`] + `u32`
//! indices); `render::GpuMesh::upload` moves it to the GPU.

mod circle;
mod icosphere;

pub use circle::{dashed_ring, disc};
pub use icosphere::icosphere;

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // pos
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Primitive topology the indices describe.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeshTopology {
    Triangles,
    Lines,
}

impl MeshTopology {
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            MeshTopology::Triangles => wgpu::PrimitiveTopology::TriangleList,
            MeshTopology::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// Indexed mesh in CPU memory.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub topology: MeshTopology,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Number of primitives (triangles or line segments).
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            MeshTopology::Triangles => self.indices.len() / 3,
            MeshTopology::Lines => self.indices.len() / 2,
        }
    }
}
