//! Heightmap pipeline: camera uniforms in, height-banded colour out.
//!
//! The colour ladder lives in [`HEIGHT_BANDS`]; the fragment shader's
//! `band_color` function is generated from it so the CPU classification and
//! the GPU shading agree.

use crate::{
    camera::SceneUniform,
    data_structures::{
        texture::Texture,
        vertex::{ColorVertex, Vertex},
    },
    pipelines::{
        basic::{PrimitiveSetup, mk_render_pipeline},
        compile_shader,
    },
    resources::buffer::upload,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightBand {
    Water,
    Sand,
    Grass,
    Rock,
    Snow,
}

/// Upper bounds (exclusive), checked in order. Anything not below any bound is [`HeightBand::Snow`].
pub const HEIGHT_BANDS: [(f32, HeightBand); 4] = [
    (0.0, HeightBand::Water),
    (0.05, HeightBand::Sand),
    (0.3, HeightBand::Grass),
    (0.6, HeightBand::Rock),
];

impl HeightBand {
    /// Band of an object-space y coordinate. NaN falls through to snow, as on the GPU.
    pub fn classify(height: f32) -> Self {
        HEIGHT_BANDS
            .iter()
            .find(|(bound, _)| height < *bound)
            .map_or(HeightBand::Snow, |(_, band)| *band)
    }

    pub fn color(self) -> [f32; 3] {
        match self {
            HeightBand::Water => [0.0, 0.3, 0.6],
            HeightBand::Sand => [0.76, 0.70, 0.50],
            HeightBand::Grass => [0.1, 0.6, 0.1],
            HeightBand::Rock => [0.5, 0.5, 0.5],
            HeightBand::Snow => [1.0, 1.0, 1.0],
        }
    }
}

fn wgsl_vec3(c: [f32; 3]) -> String {
    format!("vec3<f32>({:?}, {:?}, {:?})", c[0], c[1], c[2])
}

fn band_color_wgsl() -> String {
    let mut src = String::from("fn band_color(height: f32) -> vec3<f32> {\n");
    for (bound, band) in HEIGHT_BANDS {
        src.push_str(&format!(
            "    if (height < {:?}) {{\n        return {};\n    }}\n",
            bound,
            wgsl_vec3(band.color())
        ));
    }
    src.push_str(&format!(
        "    return {};\n}}\n",
        wgsl_vec3(HeightBand::Snow.color())
    ));
    src
}

/// Full WGSL module for the terrain pipeline.
pub fn shader_source() -> String {
    format!("{}\n{}", include_str!("terrain.wgsl"), band_color_wgsl())
}

/// Uniform buffer + bind group carrying [`SceneUniform`].
#[derive(Debug)]
pub struct SceneResources {
    pub uniform: SceneUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl SceneResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = SceneUniform::new();
        let buffer = upload(
            device,
            "Scene Uniform Buffer",
            &[uniform],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write_to_buffer(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("scene_bind_group_layout"),
    })
}

pub fn mk_terrain_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    scene_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Terrain Pipeline Layout"),
        bind_group_layouts: &[Some(scene_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = compile_shader(device, "Terrain Shader", shader_source().into());
    mk_render_pipeline(
        device,
        "Terrain Pipeline",
        &layout,
        color_format,
        Some(Texture::DEPTH_FORMAT),
        &[ColorVertex::desc()],
        &shader.module,
        PrimitiveSetup::default(),
    )
}
