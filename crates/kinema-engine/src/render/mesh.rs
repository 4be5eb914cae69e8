use wgpu::util::DeviceExt;

use crate::geometry::{MeshData, MeshTopology};

/// Static indexed mesh living in GPU buffers.
pub struct GpuMesh {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
    pub index_count: u32,
    pub topology: MeshTopology,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh '{label}': {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        Self {
            vbo,
            ibo,
            index_count: mesh.index_count(),
            topology: mesh.topology,
        }
    }

    /// Binds vertex slot 0 and the index buffer.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint32);
    }
}
