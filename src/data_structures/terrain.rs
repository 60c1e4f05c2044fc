//! Heightmap terrain mesh.
//!
//! A terrain of size `N` is a regular grid of `N x N` cells backed by
//! `(N + 1) x (N + 1)` vertices laid out row-major (`row * row_width + col`,
//! rows run along z). Each cell is split into two triangles that share the
//! `(top_right, bottom_left)` diagonal.

use anyhow::bail;

use crate::data_structures::{heightfield::HeightField, vertex::ColorVertex};

/// Placeholder colour for every terrain vertex; the fragment shader recolours by height.
pub const TERRAIN_VERTEX_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Maps grid indices into a fixed world-space rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Width and depth of the rectangle in world units.
    pub extent: f32,
    pub offset_x: f32,
    pub offset_z: f32,
    /// Raw heights are divided by this before becoming the y coordinate.
    pub height_divisor: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            extent: 25.0,
            offset_x: -10.0,
            offset_z: -22.0,
            height_divisor: 1.2,
        }
    }
}

impl GridLayout {
    pub fn world_x(&self, x: u32, size: u32) -> f32 {
        Self::remap(x, size) * self.extent + self.offset_x
    }

    pub fn world_z(&self, z: u32, size: u32) -> f32 {
        Self::remap(z, size) * self.extent + self.offset_z
    }

    fn remap(i: u32, size: u32) -> f32 {
        if size == 0 {
            0.0
        } else {
            i as f32 / size as f32
        }
    }
}

/// The six indices of cell `(x, z)`: `(tl, bl, tr)` followed by `(tr, bl, br)`.
pub fn cell_indices(x: u32, z: u32, size: u32) -> [u32; 6] {
    let row_width = size + 1;
    let top_left = z * row_width + x;
    let top_right = top_left + 1;
    let bottom_left = (z + 1) * row_width + x;
    let bottom_right = bottom_left + 1;
    [
        top_left,
        bottom_left,
        top_right,
        top_right,
        bottom_left,
        bottom_right,
    ]
}

/// CPU-side terrain geometry, ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    pub size: u32,
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Largest grid whose index count (`6 * size^2`) still fits a `u32`.
    pub const MAX_SIZE: u32 = 26_754;

    pub fn build(size: u32, layout: GridLayout, heights: &impl HeightField) -> anyhow::Result<Self> {
        if size > Self::MAX_SIZE {
            bail!(
                "terrain size {} exceeds the maximum of {} cells per side",
                size,
                Self::MAX_SIZE
            );
        }
        let row_width = size + 1;

        let mut vertices = Vec::with_capacity((row_width as usize).pow(2));
        for z in 0..row_width {
            for x in 0..row_width {
                let y = heights.height(x as i32, z as i32);
                vertices.push(ColorVertex::new(
                    [
                        layout.world_x(x, size),
                        y / layout.height_divisor,
                        layout.world_z(z, size),
                    ],
                    TERRAIN_VERTEX_COLOR,
                ));
            }
        }

        let mut indices = Vec::with_capacity(6 * (size as usize).pow(2));
        for x in 0..size {
            for z in 0..size {
                indices.extend_from_slice(&cell_indices(x, z, size));
            }
        }

        log::debug!(
            "built {}x{} terrain: {} vertices, {} indices",
            size,
            size,
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            size,
            vertices,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
