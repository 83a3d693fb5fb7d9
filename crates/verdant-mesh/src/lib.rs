//! CPU terrain meshing: height-field grids to renderable chunk buffers.
#![forbid(unsafe_code)]

mod build;
mod mesh_build;

pub use build::{ChunkMesh, ChunkMeshBuilder, build_chunk_mesh};
pub use mesh_build::MeshBuild;
