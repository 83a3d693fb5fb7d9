use std::fmt;
use verdant_geom::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Biome {
    #[default]
    Grassland,
    Mountain,
    Desert,
    Forest,
}

impl Biome {
    pub fn name(self) -> &'static str {
        match self {
            Biome::Grassland => "grassland",
            Biome::Mountain => "mountain",
            Biome::Desert => "desert",
            Biome::Forest => "forest",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const GRASSLAND_COLOR: Vec3 = Vec3::new(0.4, 0.8, 0.2);
const DESERT_COLOR: Vec3 = Vec3::new(0.9, 0.8, 0.4);
const FOREST_COLOR: Vec3 = Vec3::new(0.2, 0.6, 0.1);
const ROCK_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);
const SNOW_COLOR: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Height/moisture thresholds are relative to the terrain's height scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeClassifier {
    pub height_scale: f32,
}

impl BiomeClassifier {
    #[inline]
    pub const fn new(height_scale: f32) -> Self {
        Self { height_scale }
    }

    /// First matching rule wins: altitude, then dryness, then wetness.
    pub fn classify(&self, height: f32, moisture: f32) -> Biome {
        if height > self.height_scale * 0.6 {
            Biome::Mountain
        } else if moisture < -0.2 {
            Biome::Desert
        } else if moisture > 0.3 {
            Biome::Forest
        } else {
            Biome::Grassland
        }
    }

    pub fn color_for(&self, biome: Biome, height: f32) -> Vec3 {
        match biome {
            Biome::Grassland => GRASSLAND_COLOR,
            Biome::Desert => DESERT_COLOR,
            Biome::Forest => FOREST_COLOR,
            Biome::Mountain => ROCK_COLOR.lerp(SNOW_COLOR, self.snow_cover(height)),
        }
    }

    /// 0 at `0.7 * height_scale`, reaching 1 at the full height scale.
    fn snow_cover(&self, height: f32) -> f32 {
        let band = self.height_scale * 0.3;
        if band <= 0.0 {
            return 0.0;
        }
        ((height - self.height_scale * 0.7) / band).clamp(0.0, 1.0)
    }
}
