//! Simplex-noise heightmap seen from a camera orbiting above it.

use cgmath::Rad;
use instant::Duration;

use crate::{
    camera::{OrbitCamera, OrbitState, Projection},
    context::Context,
    data_structures::{
        heightfield::{NoiseSettings, SimplexNoise},
        terrain::{GridLayout, TerrainMesh},
    },
    flow::{GraphicsFlow, Out},
    pipelines::terrain::{SceneResources, mk_terrain_pipeline},
    render::Render,
    resources::buffer::GpuMesh,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSettings {
    /// Cells per side.
    pub size: u32,
    pub noise: NoiseSettings,
    pub layout: GridLayout,
    pub camera: OrbitCamera,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: 1000,
            noise: NoiseSettings::default(),
            layout: GridLayout::default(),
            camera: OrbitCamera::default(),
            fovy: Rad(std::f32::consts::FRAC_PI_3),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl TerrainSettings {
    pub fn build_mesh(&self) -> anyhow::Result<TerrainMesh> {
        let noise = SimplexNoise::new(self.noise);
        TerrainMesh::build(self.size, self.layout, &noise)
    }
}

pub struct TerrainDemo {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    scene: SceneResources,
    orbit: OrbitState,
}

impl TerrainDemo {
    pub fn with_settings(ctx: &mut Context, settings: TerrainSettings) -> anyhow::Result<Self> {
        ctx.clear_colour = wgpu::Color::BLACK;

        let scene = SceneResources::new(&ctx.device);
        let pipeline = mk_terrain_pipeline(&ctx.device, ctx.config.format, &scene.bind_group_layout);

        let mesh = settings.build_mesh()?;
        let mesh = GpuMesh::from_terrain(&ctx.device, "Terrain", &mesh);

        let (width, height) = ctx.size();
        let projection = Projection::new(width, height, settings.fovy, settings.znear, settings.zfar);

        let mut demo = Self {
            pipeline,
            mesh,
            scene,
            orbit: OrbitState::new(settings.camera, projection),
        };
        demo.write_scene(ctx, Duration::ZERO);
        Ok(demo)
    }

    pub fn time(&self) -> f64 {
        self.orbit.time
    }

    fn write_scene(&mut self, ctx: &Context, dt: Duration) {
        self.scene.uniform = self.orbit.advance(dt, ctx.size());
        self.scene.write_to_buffer(&ctx.queue);
    }
}

impl GraphicsFlow for TerrainDemo {
    fn on_load(ctx: &mut Context) -> anyhow::Result<Self> {
        Self::with_settings(ctx, TerrainSettings::default())
    }

    fn on_update(&mut self, ctx: &Context, dt: Duration) -> Out {
        self.write_scene(ctx, dt);
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::mesh(&self.mesh, &self.pipeline, Some(&self.scene.bind_group))
    }
}
