//! Headless GPU helpers: a device without a window and an offscreen target
//! whose pixels can be read back after a frame.

#![allow(dead_code)]

use std::time::Duration;

use terrain_demos::{context::log_device_errors, data_structures::texture::Texture};

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 64;
pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub type Pixels = image::ImageBuffer<image::Rgba<u8>, Vec<u8>>;

pub struct Headless {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub target: wgpu::Texture,
    pub depth: Texture,
}

impl Headless {
    pub fn new() -> anyhow::Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();
        futures::executor::block_on(async {
            let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await?;
            let (device, queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("Headless Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: Default::default(),
                    trace: wgpu::Trace::Off,
                    experimental_features: wgpu::ExperimentalFeatures::disabled(),
                })
                .await?;
            log_device_errors(&device);

            let target = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Headless Output Texture"),
                size: extent(),
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FORMAT,
                usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let depth = Texture::create_depth_texture(&device, [WIDTH, HEIGHT], "headless_depth");
            Ok::<Self, anyhow::Error>(Self {
                device,
                queue,
                target,
                depth,
            })
        })
    }

    /// Clear to `clear`, let `record` draw, and read the frame back.
    pub fn render(
        &self,
        clear: wgpu::Color,
        record: impl FnOnce(&mut wgpu::RenderPass<'_>),
    ) -> anyhow::Result<Pixels> {
        let view = self
            .target
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Headless Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Headless Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                multiview_mask: None,
                timestamp_writes: None,
            });
            record(&mut render_pass);
        }

        // 64 px * 4 bytes is already a multiple of the 256 byte row alignment.
        let bytes_per_row = 4 * WIDTH;
        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Headless Readback"),
            size: (bytes_per_row * HEIGHT) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(HEIGHT),
                },
            },
            extent(),
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        self.device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })?;
        futures::executor::block_on(rx.receive())
            .ok_or_else(|| anyhow::anyhow!("readback channel closed"))??;

        let data = buffer_slice.get_mapped_range().to_vec();
        output_buffer.unmap();
        Pixels::from_raw(WIDTH, HEIGHT, data)
            .ok_or_else(|| anyhow::anyhow!("readback has the wrong size"))
    }
}

fn extent() -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: WIDTH,
        height: HEIGHT,
        depth_or_array_layers: 1,
    }
}

/// Pixel under clip-space coordinate `(x, y)`.
pub fn clip_to_pixel(x: f32, y: f32) -> (u32, u32) {
    let px = ((x + 1.0) * 0.5 * WIDTH as f32) as u32;
    let py = ((1.0 - y) * 0.5 * HEIGHT as f32) as u32;
    (px.min(WIDTH - 1), py.min(HEIGHT - 1))
}

/// Whether any pixel within one pixel of `(x, y)` equals `colour`.
pub fn has_colour_near(pixels: &Pixels, (x, y): (u32, u32), colour: [u8; 4]) -> bool {
    let xs = x.saturating_sub(1)..=(x + 1).min(WIDTH - 1);
    xs.flat_map(|px| {
        let ys = y.saturating_sub(1)..=(y + 1).min(HEIGHT - 1);
        ys.map(move |py| (px, py))
    })
    .any(|(px, py)| pixels.get_pixel(px, py).0 == colour)
}
