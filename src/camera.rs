//! Orbiting camera and the per-frame scene uniform.
//!
//! The terrain demo has no input handling: the eye position is a pure function
//! of elapsed time, circling a fixed centre at a fixed radius and height.

use cgmath::{Matrix4, Point3, Rad, Vector3, perspective};
use instant::Duration;

/// cgmath builds OpenGL clip space (z in `[-1, 1]`); wgpu expects `[0, 1]`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A camera circling `center` in the xz-plane, raised by `height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub center: Point3<f32>,
    pub radius: f32,
    pub height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            center: Point3::new(5.0, 0.0, -5.0),
            radius: 2.5,
            height: 1.5,
        }
    }
}

impl OrbitCamera {
    /// Eye position after `time` seconds: `center + radius * (sin t, 0, cos t) + (0, height, 0)`.
    pub fn eye(&self, time: f32) -> Point3<f32> {
        Point3::new(
            self.center.x + self.radius * time.sin(),
            self.center.y + self.height,
            self.center.z + self.radius * time.cos(),
        )
    }

    /// Right-handed look-at from the current eye towards the centre, y up.
    pub fn view_matrix(&self, time: f32) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(time), self.center, Vector3::unit_y())
    }
}

/// Perspective projection that follows the surface aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

impl Default for Projection {
    /// 60 degree vertical field of view on an 800x600 surface, clipping at 0.1 and 100.
    fn default() -> Self {
        Self::new(800, 600, Rad(std::f32::consts::FRAC_PI_3), 0.1, 100.0)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Mirrors the `Scene` uniform block of the terrain shader (`uView`, `uProj`, `uTime`).
///
/// Matrices are column-major, as cgmath stores them.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub time: f32,
    // Uniform blocks are 16 byte aligned
    pub _padding: [f32; 3],
}

impl SceneUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view: Matrix4::identity().into(),
            proj: Matrix4::identity().into(),
            time: 0.0,
            _padding: [0.0; 3],
        }
    }

    pub fn update(&mut self, camera: &OrbitCamera, projection: &Projection, time: f32) {
        self.view = camera.view_matrix(time).into();
        self.proj = projection.calc_matrix().into();
        self.time = time;
    }
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Elapsed time plus the camera and projection it drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    pub camera: OrbitCamera,
    pub projection: Projection,
    /// Seconds since load.
    pub time: f64,
    pub uniform: SceneUniform,
}

impl OrbitState {
    pub fn new(camera: OrbitCamera, projection: Projection) -> Self {
        let mut state = Self {
            camera,
            projection,
            time: 0.0,
            uniform: SceneUniform::new(),
        };
        state.uniform.update(&state.camera, &state.projection, 0.0);
        state
    }

    /// Accumulate `dt`, follow the surface size and return the uniform to upload.
    pub fn advance(&mut self, dt: Duration, (width, height): (u32, u32)) -> SceneUniform {
        self.time += dt.as_secs_f64();
        self.projection.resize(width, height);
        self.uniform
            .update(&self.camera, &self.projection, self.time as f32);
        self.uniform
    }
}
