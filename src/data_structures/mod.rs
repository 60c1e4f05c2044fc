//! Engine data structures: vertices, height sources, terrain meshes and textures.
//!
//! - `vertex` holds the position + colour record and its buffer layout
//! - `heightfield` provides the [`heightfield::HeightField`] trait and simplex noise
//! - `terrain` builds the triangulated heightmap grid
//! - `texture` wraps the depth attachment

pub mod heightfield;
pub mod terrain;
pub mod texture;
pub mod vertex;
