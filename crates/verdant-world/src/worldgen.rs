use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid worldgen parameter `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub streaming: Streaming,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            terrain: Terrain::default(),
            streaming: Streaming::default(),
        }
    }
}

fn default_seed() -> i32 {
    1337
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_scale")]
    pub chunk_scale: f32,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f32,
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    #[serde(default = "default_octaves")]
    pub octaves: u32,
}
fn default_chunk_size() -> usize {
    64
}
fn default_chunk_scale() -> f32 {
    1.0
}
fn default_noise_scale() -> f32 {
    0.05
}
fn default_height_scale() -> f32 {
    10.0
}
fn default_octaves() -> u32 {
    4
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_scale: default_chunk_scale(),
            noise_scale: default_noise_scale(),
            height_scale: default_height_scale(),
            octaves: default_octaves(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Streaming {
    #[serde(default = "default_render_distance")]
    pub render_distance: f32,
    #[serde(default = "default_generation_radius")]
    pub generation_radius: i32,
}
fn default_render_distance() -> f32 {
    100.0
}
fn default_generation_radius() -> i32 {
    3
}
impl Default for Streaming {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            generation_radius: default_generation_radius(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub seed: i32,
    pub chunk_size: usize,
    pub chunk_scale: f32,
    pub noise_scale: f32,
    pub height_scale: f32,
    pub octaves: u32,
    pub render_distance: f32,
    pub generation_radius: i32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            seed: cfg.seed,
            chunk_size: cfg.terrain.chunk_size,
            chunk_scale: cfg.terrain.chunk_scale,
            noise_scale: cfg.terrain.noise_scale,
            height_scale: cfg.terrain.height_scale,
            octaves: cfg.terrain.octaves,
            render_distance: cfg.streaming.render_distance,
            generation_radius: cfg.streaming.generation_radius,
        }
    }

    /// Chunks whose representative point is farther than this are evicted.
    #[inline]
    pub fn eviction_distance(&self) -> f32 {
        self.render_distance * 1.5
    }

    /// Rejects parameter sets the mesher and streamer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name: &'static str, reason: String| Err(ConfigError::Invalid { name, reason });
        if self.chunk_size < 2 {
            return invalid("chunk_size", format!("must be at least 2, got {}", self.chunk_size));
        }
        if !(self.chunk_scale.is_finite() && self.chunk_scale > 0.0) {
            return invalid("chunk_scale", format!("must be positive, got {}", self.chunk_scale));
        }
        if !self.noise_scale.is_finite() {
            return invalid("noise_scale", format!("must be finite, got {}", self.noise_scale));
        }
        if !self.height_scale.is_finite() {
            return invalid("height_scale", format!("must be finite, got {}", self.height_scale));
        }
        if self.octaves == 0 {
            return invalid("octaves", "must be at least 1".to_string());
        }
        if !(self.render_distance.is_finite() && self.render_distance > 0.0) {
            return invalid(
                "render_distance",
                format!("must be positive, got {}", self.render_distance),
            );
        }
        if self.generation_radius < 0 {
            return invalid(
                "generation_radius",
                format!("must not be negative, got {}", self.generation_radius),
            );
        }
        Ok(())
    }
}

pub fn parse_params(s: &str) -> Result<WorldGenParams, ConfigError> {
    let cfg: WorldGenConfig = toml::from_str(s)?;
    let params = WorldGenParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_params(&s)
}
