use wgpu::util::DeviceExt;

use crate::data_structures::{terrain::TerrainMesh, vertex::ColorVertex};

/// Upload a contiguous slice of plain-old-data records into a new buffer.
pub fn upload<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    contents: &[T],
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(contents),
        usage,
    })
}

/// Static geometry living on the GPU for the lifetime of a demo.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub num_vertices: u32,
    pub num_indices: u32,
}

impl GpuMesh {
    /// Vertices only; drawn in submission order.
    pub fn from_vertices(device: &wgpu::Device, name: &str, vertices: &[ColorVertex]) -> Self {
        let vertex_buffer = upload(
            device,
            &format!("{} Vertex Buffer", name),
            vertices,
            wgpu::BufferUsages::VERTEX,
        );
        Self {
            vertex_buffer,
            index_buffer: None,
            num_vertices: vertices.len() as u32,
            num_indices: 0,
        }
    }

    pub fn from_terrain(device: &wgpu::Device, name: &str, mesh: &TerrainMesh) -> Self {
        let vertex_buffer = upload(
            device,
            &format!("{} Vertex Buffer", name),
            &mesh.vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = upload(
            device,
            &format!("{} Index Buffer", name),
            &mesh.indices,
            wgpu::BufferUsages::INDEX,
        );
        log::info!(
            "uploaded {}: {} vertices ({} bytes), {} indices ({} bytes)",
            name,
            mesh.vertex_count(),
            vertex_buffer.size(),
            mesh.index_count(),
            index_buffer.size()
        );
        Self {
            vertex_buffer,
            index_buffer: Some(index_buffer),
            num_vertices: mesh.vertex_count() as u32,
            num_indices: mesh.index_count(),
        }
    }
}
