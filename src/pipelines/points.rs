//! Clip-space pass-through pipeline rasterised as single pixels.

use crate::{
    data_structures::{
        texture::Texture,
        vertex::{ColorVertex, Vertex},
    },
    pipelines::{
        basic::{PrimitiveSetup, mk_render_pipeline},
        compile_shader,
    },
};

pub fn shader_source() -> &'static str {
    include_str!("points.wgsl")
}

pub fn mk_point_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Point Pipeline Layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });
    let shader = compile_shader(device, "Point Shader", shader_source().into());
    mk_render_pipeline(
        device,
        "Point Pipeline",
        &layout,
        color_format,
        Some(Texture::DEPTH_FORMAT),
        &[ColorVertex::desc()],
        &shader.module,
        PrimitiveSetup {
            topology: wgpu::PrimitiveTopology::PointList,
            cull_mode: None,
        },
    )
}
