//! Flow control and application event loop.
//!
//! A "flow" is one demo: it loads its GPU resources once, advances its state
//! every frame and describes what to draw. The run loop owns the window and the
//! [`Context`] and drives the flow through the winit event loop.
//!
//! # Lifecycle
//!
//! 1. Create the window and the GPU context on `resumed`
//! 2. Call [`GraphicsFlow::on_load`] once
//! 3. On every redraw: [`GraphicsFlow::on_update`] with the frame delta, then
//!    [`GraphicsFlow::on_render`] and present
//! 4. Exit when the window is closed

use std::{fmt::Debug, iter, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::{Context, WindowConfig},
    data_structures::texture::Texture,
    render::Render,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Output of a per-frame hook.
///
/// `Out::Configure` modifies the Context at runtime, for instance to change
/// the clear colour. `Empty` is the default when nothing needs to change.
pub enum Out<C = Context> {
    Configure(Box<dyn FnOnce(&mut C)>),
    Empty,
}

impl<C> Default for Out<C> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<C> Out<C> {
    /// Run a pending configuration against `target`.
    pub fn apply(self, target: &mut C) {
        match self {
            Out::Configure(f) => f(target),
            Out::Empty => (),
        }
    }
}

/// A self-contained demo driven by [`run`].
pub trait GraphicsFlow: Sized {
    /// Compile shaders and upload static geometry.
    ///
    /// Called once, after the context exists. This is also the place to set
    /// things like the clear colour.
    fn on_load(ctx: &mut Context) -> anyhow::Result<Self>;

    /// Advance state by the elapsed frame time `dt`.
    fn on_update(&mut self, ctx: &Context, dt: Duration) -> Out;

    /// Describe what to draw this frame.
    fn on_render(&self) -> Render<'_>;
}

/// GPU context plus surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    is_surface_configured: bool,
}

impl AppState {
    fn new(ctx: Context) -> Self {
        Self {
            ctx,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            log::debug!("resizing surface to {}x{}", width, height);
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render<F: GraphicsFlow>(&self, flow: &F) -> Result<(), wgpu::CurrentSurfaceTexture> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(t) | wgpu::CurrentSurfaceTexture::Suboptimal(t) => t,
            other => return Err(other),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            flow.on_render().draw(&mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(anyhow::Result<Context>),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(Ok(_)) => f.write_str("Initialized(Ok)"),
            Self::Initialized(Err(e)) => write!(f, "Initialized(Err({}))", e),
        }
    }
}

pub struct App<F: GraphicsFlow> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    config: WindowConfig,
    state: Option<AppState>,
    flow: Option<F>,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl<F: GraphicsFlow> App<F> {
    fn new(event_loop: &EventLoop<FlowEvent>, config: WindowConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            state: None,
            flow: None,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// Take ownership of a freshly created context and load the flow on it.
    fn initialized(&mut self, event_loop: &ActiveEventLoop, ctx: anyhow::Result<Context>) {
        let mut app_state = match ctx {
            Ok(ctx) => AppState::new(ctx),
            Err(e) => return self.fail(event_loop, e.context("cannot create the main context")),
        };
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);

        match F::on_load(&mut app_state.ctx) {
            Ok(flow) => self.flow = Some(flow),
            Err(e) => return self.fail(event_loop, e.context("loading the demo failed")),
        }
        self.last_time = Instant::now();
        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
    }
}

impl<F: GraphicsFlow> ApplicationHandler<FlowEvent> for App<F> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, anyhow::Error::new(e).context("cannot open a window")),
        };

        let config = self.config.clone();
        let init_future = async move { Context::new(window, &config).await };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let ctx = self.async_runtime.block_on(init_future);
            self.initialized(event_loop, ctx);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let ctx = init_future.await;
                assert!(proxy.send_event(FlowEvent::Initialized(ctx)).is_ok());
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized(ctx) => self.initialized(event_loop, ctx),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (state, flow) = match (&mut self.state, &mut self.flow) {
            (Some(state), Some(flow)) => (state, flow),
            _ => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                flow.on_update(&state.ctx, dt).apply(&mut state.ctx);

                match state.render(flow) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {:?}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Open a window configured by `config` and run the demo `F` until it is closed.
pub fn run<F: GraphicsFlow + 'static>(config: WindowConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        if let Err(e) = env_logger::Builder::from_env(env).try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app: App<F> = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
