//! terrain-demos
//!
//! Two small rendering demos on top of wgpu and winit: a point-rendered
//! triangle with a point cloud, and a simplex-noise heightmap terrain seen from
//! an orbiting camera. The library holds everything the two binaries share.
//!
//! High-level modules
//! - `camera`: orbit camera, projection and the scene uniform
//! - `context`: window configuration and the GPU context that owns device/queue/surface
//! - `data_structures`: vertices, height sources, the terrain mesh builder, textures
//! - `flow`: the demo lifecycle trait and the event loop that drives it
//! - `pipelines`: shader compilation and the point and terrain pipelines
//! - `resources`: uploading CPU geometry to GPU buffers
//! - `render`: describing and recording a frame's draws
//! - `demos`: the triangle and terrain demos
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod demos;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
pub use winit::event::WindowEvent;
