//! A coloured triangle and a point-cloud grid, drawn as a point list.
//!
//! Only the three corner pixels of the triangle show up: the geometry is
//! submitted with point topology, not filled.

use instant::Duration;

use crate::{
    context::Context,
    data_structures::vertex::ColorVertex,
    flow::{GraphicsFlow, Out},
    pipelines::points::mk_point_pipeline,
    render::Render,
    resources::buffer::GpuMesh,
};

pub const CLEAR_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.15,
    a: 1.0,
};

pub const TRIANGLE: [ColorVertex; 3] = [
    ColorVertex::new([0.0, 0.5, 0.0], [1.0, 0.0, 0.0]),
    ColorVertex::new([-0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
    ColorVertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0]),
];

/// Points per side of the point cloud.
pub const GRID_POINTS: u32 = 16;
pub const GRID_HALF_EXTENT: f32 = 0.9;
pub const GRID_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// `side x side` points evenly spaced over `[-half_extent, half_extent]^2` at z = 0.
pub fn point_grid(side: u32, half_extent: f32, color: [f32; 3]) -> Vec<ColorVertex> {
    let step = if side > 1 {
        2.0 * half_extent / (side - 1) as f32
    } else {
        0.0
    };
    (0..side)
        .flat_map(|row| (0..side).map(move |col| (row, col)))
        .map(|(row, col)| {
            ColorVertex::new(
                [
                    -half_extent + col as f32 * step,
                    -half_extent + row as f32 * step,
                    0.0,
                ],
                color,
            )
        })
        .collect()
}

/// Triangle corners first, then the grid.
pub fn scene_vertices() -> Vec<ColorVertex> {
    let mut vertices = TRIANGLE.to_vec();
    vertices.extend(point_grid(GRID_POINTS, GRID_HALF_EXTENT, GRID_COLOR));
    vertices
}

pub struct TriangleDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
}

impl GraphicsFlow for TriangleDemo {
    fn on_load(ctx: &mut Context) -> anyhow::Result<Self> {
        ctx.clear_colour = CLEAR_COLOUR;
        let pipeline = mk_point_pipeline(&ctx.device, ctx.config.format);
        let mesh = GpuMesh::from_vertices(&ctx.device, "Triangle", &scene_vertices());
        log::info!("loaded {} points", mesh.num_vertices);
        Ok(Self { pipeline, mesh })
    }

    fn on_update(&mut self, _: &Context, _: Duration) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::mesh(&self.mesh, &self.pipeline, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_comes_first() {
        let vertices = scene_vertices();
        assert_eq!(vertices.len(), 3 + (GRID_POINTS * GRID_POINTS) as usize);
        assert_eq!(&vertices[..3], &TRIANGLE);
    }

    #[test]
    fn grid_spans_extent() {
        let grid = point_grid(4, 0.9, GRID_COLOR);
        assert_eq!(grid.len(), 16);
        assert_eq!(grid[0].position, [-0.9, -0.9, 0.0]);
        let last = grid[15].position;
        assert!((last[0] - 0.9).abs() < 1e-6);
        assert!((last[1] - 0.9).abs() < 1e-6);
        assert!(grid.iter().all(|v| v.position[2] == 0.0 && v.color == GRID_COLOR));
    }

    #[test]
    fn degenerate_grids() {
        assert!(point_grid(0, 0.9, GRID_COLOR).is_empty());
        assert_eq!(point_grid(1, 0.9, GRID_COLOR)[0].position, [-0.9, -0.9, 0.0]);
    }
}
