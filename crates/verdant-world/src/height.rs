use fastnoise_lite::{FastNoiseLite, NoiseType};
use std::fmt;

use crate::worldgen::WorldGenParams;

/// Terrain never dips below this floor.
pub const GROUND_LEVEL: f32 = -0.1;
/// Shift applied to moisture lookups so they decorrelate from height.
pub const MOISTURE_OFFSET: f32 = 1000.0;

/// Anything that can answer "how high is the ground at (x, z)".
pub trait HeightSource {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

impl<F> HeightSource for F
where
    F: Fn(f32, f32) -> f32,
{
    #[inline]
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Multi-octave gradient noise height and moisture sampler.
pub struct HeightField {
    noise: FastNoiseLite,
    seed: i32,
    noise_scale: f32,
    height_scale: f32,
    octaves: u32,
}

impl HeightField {
    pub fn new(params: &WorldGenParams) -> Self {
        Self::with_scales(params.seed, params.noise_scale, params.height_scale, params.octaves)
    }

    pub fn with_scales(seed: i32, noise_scale: f32, height_scale: f32, octaves: u32) -> Self {
        Self {
            noise: make_noise(seed),
            seed,
            noise_scale,
            height_scale,
            octaves,
        }
    }

    /// Sum of `octaves` layers, frequency doubling and amplitude halving per layer.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let mut height = 0.0_f32;
        let mut amplitude = self.height_scale;
        let mut frequency = self.noise_scale;
        for _ in 0..self.octaves {
            height += self.noise.get_noise_2d(x * frequency, z * frequency) * amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        height.max(GROUND_LEVEL)
    }

    /// Single octave at half the base frequency, roughly in [-1, 1].
    pub fn moisture(&self, x: f32, z: f32) -> f32 {
        let f = self.noise_scale * 0.5;
        self.noise
            .get_noise_2d((x + MOISTURE_OFFSET) * f, (z + MOISTURE_OFFSET) * f)
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }
    #[inline]
    pub fn noise_scale(&self) -> f32 {
        self.noise_scale
    }
    #[inline]
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }
    #[inline]
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn set_noise_scale(&mut self, scale: f32) {
        self.noise_scale = scale;
    }
    pub fn set_height_scale(&mut self, scale: f32) {
        self.height_scale = scale;
    }
    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves;
    }

    /// Re-reads sampling parameters, rebuilding the noise source only if the seed changed.
    pub fn update_params(&mut self, params: &WorldGenParams) {
        if params.seed != self.seed {
            self.noise = make_noise(params.seed);
            self.seed = params.seed;
        }
        self.noise_scale = params.noise_scale;
        self.height_scale = params.height_scale;
        self.octaves = params.octaves;
    }
}

impl HeightSource for HeightField {
    #[inline]
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.height(x, z)
    }
}

impl fmt::Debug for HeightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeightField")
            .field("seed", &self.seed)
            .field("noise_scale", &self.noise_scale)
            .field("height_scale", &self.height_scale)
            .field("octaves", &self.octaves)
            .finish()
    }
}

fn make_noise(seed: i32) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    // Scale is applied per octave by the caller.
    noise.set_frequency(Some(1.0));
    noise
}
