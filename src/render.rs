//! Render composition.
//!
//! A demo describes what to draw each frame as a [`Render`]; the run loop
//! records it into the frame's render pass.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the enum describing a frame's draw
//! - [`Unindexed<'a>`] draws a vertex buffer in submission order
//! - [`Indexed<'a>`] draws a vertex buffer through a `u32` index buffer
//!

use wgpu::RenderPass;

use crate::resources::buffer::GpuMesh;

/// A vertex-only draw: `amount` vertices starting at zero.
pub struct Unindexed<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub group: Option<&'a wgpu::BindGroup>,
    pub vertex: &'a wgpu::Buffer,
    pub amount: u32,
}

/// An indexed draw over `amount` `u32` indices.
pub struct Indexed<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub group: Option<&'a wgpu::BindGroup>,
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub amount: u32,
}

/// Specifies how a demo should be rendered this frame.
///
/// # Variants
///
/// - `Vertices(Unindexed)` draws a plain vertex buffer
/// - `Indexed(Indexed)` draws through an index buffer
///
pub enum Render<'a> {
    Vertices(Unindexed<'a>),
    Indexed(Indexed<'a>),
}

impl<'a> Render<'a> {
    /// Build a draw for `mesh`: indexed if it carries an index buffer, plain otherwise.
    pub fn mesh(
        mesh: &'a GpuMesh,
        pipeline: &'a wgpu::RenderPipeline,
        group: Option<&'a wgpu::BindGroup>,
    ) -> Self {
        match &mesh.index_buffer {
            Some(index) => Render::Indexed(Indexed {
                pipeline,
                group,
                vertex: &mesh.vertex_buffer,
                index,
                amount: mesh.num_indices,
            }),
            None => Render::Vertices(Unindexed {
                pipeline,
                group,
                vertex: &mesh.vertex_buffer,
                amount: mesh.num_vertices,
            }),
        }
    }

    /// Number of vertices (or indices) the draw covers.
    pub fn amount(&self) -> u32 {
        match self {
            Render::Vertices(draw) => draw.amount,
            Render::Indexed(draw) => draw.amount,
        }
    }

    /// Record this render into `render_pass`.
    pub fn draw(self, render_pass: &mut RenderPass<'_>) {
        if self.amount() == 0 {
            log::warn!("you attempted to draw an empty mesh");
            return;
        }
        match self {
            Render::Vertices(draw) => {
                render_pass.set_pipeline(draw.pipeline);
                if let Some(group) = draw.group {
                    render_pass.set_bind_group(0, group, &[]);
                }
                render_pass.set_vertex_buffer(0, draw.vertex.slice(..));
                render_pass.draw(0..draw.amount, 0..1);
            }
            Render::Indexed(draw) => {
                render_pass.set_pipeline(draw.pipeline);
                if let Some(group) = draw.group {
                    render_pass.set_bind_group(0, group, &[]);
                }
                render_pass.set_vertex_buffer(0, draw.vertex.slice(..));
                render_pass.set_index_buffer(draw.index.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..draw.amount, 0, 0..1);
            }
        }
    }
}
