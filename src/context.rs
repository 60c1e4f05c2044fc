use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::data_structures::texture;

/// Window and graphics API parameters requested at startup.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub backends: wgpu::Backends,
    /// Requested OpenGL (major, minor) version; only meaningful for the GL backend.
    pub gl_version: (u8, u8),
    /// Debug context with validation enabled.
    pub debug: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Demo".to_string(),
            width: 800,
            height: 600,
            // WebGL on wasm32; shader status is then queried synchronously.
            backends: wgpu::Backends::GL,
            gl_version: (4, 1),
            debug: true,
        }
    }
}

impl WindowConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn instance_flags(&self) -> wgpu::InstanceFlags {
        if self.debug {
            wgpu::InstanceFlags::DEBUG | wgpu::InstanceFlags::VALIDATION
        } else {
            wgpu::InstanceFlags::empty()
        }
    }

    /// Backends handed to the instance. Browser WebGPU is masked out on wasm32,
    /// where shader status could not be queried without yielding to the browser.
    pub fn instance_backends(&self) -> wgpu::Backends {
        if cfg!(target_arch = "wasm32") {
            match self.backends.difference(wgpu::Backends::BROWSER_WEBGPU) {
                b if b.is_empty() => wgpu::Backends::GL,
                b => b,
            }
        } else {
            self.backends
        }
    }

    /// Core profile of the requested GL version, e.g. `"OpenGL 4.1 core"`.
    pub fn api_name(&self) -> String {
        format!("OpenGL {}.{} core", self.gl_version.0, self.gl_version.1)
    }
}

/// Everything the demos need from the GPU: device, queue, surface and depth target.
///
/// Owned by the run loop and handed to the demo's lifecycle hooks.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>, window_config: &WindowConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!(
            "requesting {} context (backends {:?})",
            window_config.api_name(),
            window_config.instance_backends()
        );
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: window_config.instance_backends(),
            flags: window_config.instance_flags(),
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter matches the requested backends")?;
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {})", info.name, info.backend, info.driver_info);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Demo Device"),
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits())
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
            })
            .await
            .context("cannot open a device on the adapter")?;
        log_device_errors(&device);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no supported formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            window,
            depth_texture,
            clear_colour: wgpu::Color::BLACK,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Validation errors (bad shaders, bad pipelines) are logged instead of aborting the demo.
pub fn log_device_errors(device: &wgpu::Device) {
    device.on_uncaptured_error(Arc::new(|error: wgpu::Error| {
        log::error!("graphics device error: {}", error);
    }));
}
