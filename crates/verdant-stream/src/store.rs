use hashbrown::HashMap;
use thiserror::Error;
use verdant_geom::{Vec2, Vec3};
use verdant_mesh::{ChunkMesh, ChunkMeshBuilder};
use verdant_world::{
    Biome, ChunkCoord, ConfigError, HeightField, HeightSource, WorldGenParams,
    find_safe_spawn_point,
};

use crate::signal::UpdateSignal;
use crate::upload::{ChunkUploader, GpuHandle};

#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Chunk {
    pub mesh: ChunkMesh,
    gpu: Option<GpuHandle>,
}

impl Chunk {
    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.mesh.coord
    }

    #[inline]
    pub fn biome(&self) -> Biome {
        self.mesh.biome
    }

    /// Geometry built and buffers uploaded.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.gpu.is_some()
    }
}

/// Outcome of one streaming request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub created: usize,
    pub evicted: usize,
    pub failed: usize,
    /// Center moved less than half a chunk; nothing was done.
    pub skipped: bool,
}

/// Flattened terrain triangles for the physics side.
#[derive(Clone, Debug, Default)]
pub struct CollisionData {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl CollisionData {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub struct ChunkStore<U: ChunkUploader> {
    params: WorldGenParams,
    field: HeightField,
    uploader: U,
    chunks: HashMap<ChunkCoord, Chunk>,
    /// Center of the last accepted request; `None` until the first one.
    last_center: Option<Vec2>,
    updated: UpdateSignal,
}

impl<U: ChunkUploader> ChunkStore<U> {
    pub fn new(params: WorldGenParams, uploader: U) -> Result<Self, StreamError> {
        params.validate()?;
        log::info!(
            target: "stream",
            "terrain store: chunk {}x{} scale {} height scale {} octaves {} render distance {}",
            params.chunk_size,
            params.chunk_size,
            params.chunk_scale,
            params.height_scale,
            params.octaves,
            params.render_distance
        );
        Ok(Self {
            field: HeightField::new(&params),
            params,
            uploader,
            chunks: HashMap::new(),
            last_center: None,
            updated: UpdateSignal::new(),
        })
    }

    /// Streams chunks around `center` (world x, z).
    pub fn request_at(&mut self, center: Vec2) -> StreamReport {
        let half_chunk = self.params.chunk_scale * 0.5;
        if self
            .last_center
            .is_some_and(|last| center.distance(last) < half_chunk)
        {
            return StreamReport {
                skipped: true,
                ..StreamReport::default()
            };
        }
        self.last_center = Some(center);

        let mut report = StreamReport::default();
        let center_coord = ChunkCoord::from_world(center, self.params.chunk_scale);
        let builder =
            ChunkMeshBuilder::new(&self.field, self.params.chunk_size, self.params.chunk_scale);
        for coord in center_coord.window(self.params.generation_radius) {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            let mesh = builder.build(coord);
            match self.uploader.upload(&mesh) {
                Ok(handle) => {
                    self.chunks.insert(
                        coord,
                        Chunk {
                            mesh,
                            gpu: Some(handle),
                        },
                    );
                    report.created += 1;
                }
                Err(e) => {
                    log::error!(target: "stream", "failed to create chunk ({}, {}): {}", coord.cx, coord.cz, e);
                    report.failed += 1;
                }
            }
        }

        report.evicted = self.evict_distant(center);
        if report.created > 0 || report.evicted > 0 {
            self.updated.raise();
        }
        log::debug!(
            target: "stream",
            "streamed at ({:.1}, {:.1}): +{} -{} total {}",
            center.x,
            center.y,
            report.created,
            report.evicted,
            self.chunks.len()
        );
        report
    }

    /// Camera-driven variant of [`request_at`](Self::request_at).
    pub fn update_lod(&mut self, camera: Vec3) -> StreamReport {
        self.request_at(camera.xz())
    }

    fn evict_distant(&mut self, center: Vec2) -> usize {
        let limit = self.params.eviction_distance();
        let uploader = &mut self.uploader;
        let before = self.chunks.len();
        self.chunks.retain(|coord, chunk| {
            let p = chunk.mesh.representative_position().xz();
            if p.distance(center) <= limit {
                return true;
            }
            if let Some(handle) = chunk.gpu.take() {
                uploader.release(handle);
            }
            log::debug!(target: "stream", "evicted chunk ({}, {})", coord.cx, coord.cz);
            false
        });
        before - self.chunks.len()
    }

    /// Concatenates every ready chunk's triangles, indices rebased per chunk.
    pub fn collision_data(&self) -> CollisionData {
        let mut coords: Vec<ChunkCoord> = self
            .chunks
            .iter()
            .filter(|(_, c)| c.is_ready())
            .map(|(k, _)| *k)
            .collect();
        coords.sort_unstable();

        let mut out = CollisionData::default();
        for coord in &coords {
            let mesh = &self.chunks[coord].mesh.mesh;
            let offset = out.vertices.len() as u32;
            out.vertices.extend(mesh.positions());
            out.indices.extend(mesh.idx.iter().map(|&i| i + offset));
        }
        log::debug!(
            target: "stream",
            "collision data: {} vertices, {} triangles from {} chunks",
            out.vertices.len(),
            out.triangle_count(),
            coords.len()
        );
        out
    }

    #[inline]
    pub fn has_updated(&self) -> bool {
        self.updated.is_raised()
    }

    /// Consumes the pending update, if any.
    #[inline]
    pub fn acknowledge(&mut self) -> bool {
        self.updated.acknowledge()
    }

    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.field.height(x, z)
    }

    pub fn find_safe_spawn_point(&self, preferred_x: f32, preferred_z: f32) -> Vec3 {
        find_safe_spawn_point(&self.field, preferred_x, preferred_z)
    }

    /// Chunk center within render distance of the camera (ground plane).
    pub fn is_chunk_visible(&self, coord: ChunkCoord, camera: Vec3) -> bool {
        coord.center(self.params.chunk_scale).distance(camera.xz()) <= self.params.render_distance
    }

    pub fn visible_chunks(&self, camera: Vec3) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks
            .values()
            .filter(move |c| c.is_ready() && self.is_chunk_visible(c.coord(), camera))
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    #[inline]
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    #[inline]
    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    #[inline]
    pub fn last_center(&self) -> Option<Vec2> {
        self.last_center
    }

    // Parameter changes only affect chunks generated afterwards.

    pub fn set_noise_scale(&mut self, scale: f32) {
        self.params.noise_scale = scale;
        self.field.set_noise_scale(scale);
    }

    pub fn set_height_scale(&mut self, scale: f32) {
        self.params.height_scale = scale;
        self.field.set_height_scale(scale);
    }

    pub fn set_octaves(&mut self, octaves: u32) {
        self.params.octaves = octaves;
        self.field.set_octaves(octaves);
    }

    pub fn set_render_distance(&mut self, distance: f32) {
        self.params.render_distance = distance;
    }

    pub fn update_params(&mut self, params: WorldGenParams) -> Result<(), StreamError> {
        params.validate()?;
        self.field.update_params(&params);
        self.params = params;
        log::info!(target: "stream", "worldgen params updated; existing chunks unchanged");
        Ok(())
    }
}

impl<U: ChunkUploader> HeightSource for ChunkStore<U> {
    #[inline]
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.field.height(x, z)
    }
}

impl<U: ChunkUploader> Drop for ChunkStore<U> {
    fn drop(&mut self) {
        for (_, chunk) in self.chunks.iter_mut() {
            if let Some(handle) = chunk.gpu.take() {
                self.uploader.release(handle);
            }
        }
    }
}
