//! Height field, biome classification, and worldgen parameters.
#![forbid(unsafe_code)]

pub mod biome;
pub mod chunk_coord;
pub mod height;
pub mod spawn;
pub mod worldgen;

pub use biome::{Biome, BiomeClassifier};
pub use chunk_coord::ChunkCoord;
pub use height::{HeightField, HeightSource};
pub use spawn::find_safe_spawn_point;
pub use worldgen::{ConfigError, WorldGenConfig, WorldGenParams, load_params_from_path};
