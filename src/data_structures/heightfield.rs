//! Height sources sampled by the terrain mesh builder.
//!
//! Heights are only ever queried at integer lattice points, so implementors do
//! not need to interpolate.

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Maps an integer lattice coordinate to a scalar height.
pub trait HeightField {
    fn height(&self, x: i32, z: i32) -> f32;
}

impl<F> HeightField for F
where
    F: Fn(i32, i32) -> f32,
{
    fn height(&self, x: i32, z: i32) -> f32 {
        self(x, z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSettings {
    pub seed: i32,
    pub frequency: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 1337,
            frequency: 0.01,
        }
    }
}

/// OpenSimplex2 noise, output roughly in `[-1, 1]`.
pub struct SimplexNoise {
    noise: FastNoiseLite,
    settings: NoiseSettings,
}

impl SimplexNoise {
    pub fn new(settings: NoiseSettings) -> Self {
        let mut noise = FastNoiseLite::new();
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_seed(Some(settings.seed));
        noise.set_frequency(Some(settings.frequency));
        Self { noise, settings }
    }

    pub fn settings(&self) -> NoiseSettings {
        self.settings
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new(NoiseSettings::default())
    }
}

impl HeightField for SimplexNoise {
    fn height(&self, x: i32, z: i32) -> f32 {
        self.noise.get_noise_2d(x as f32, z as f32)
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("settings", &self.settings)
            .finish()
    }
}
