use verdant_geom::{Aabb, Vec2, Vec3};
use verdant_world::{Biome, BiomeClassifier, ChunkCoord, HeightField, WorldGenParams};

use crate::mesh_build::MeshBuild;

/// Placeholder tint until the biome pass runs.
const UNCOLORED: Vec3 = Vec3::splat(0.5);

pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    /// Biome sampled at the middle vertex.
    pub biome: Biome,
    pub mesh: MeshBuild,
}

impl ChunkMesh {
    /// Middle vertex, used as the chunk's position for distance checks.
    #[inline]
    pub fn representative_position(&self) -> Vec3 {
        self.mesh.position(self.mesh.vertex_count() / 2)
    }
}

/// Builds chunk geometry from a borrowed height field.
pub struct ChunkMeshBuilder<'a> {
    field: &'a HeightField,
    classifier: BiomeClassifier,
    chunk_size: usize,
    chunk_scale: f32,
}

impl<'a> ChunkMeshBuilder<'a> {
    pub fn new(field: &'a HeightField, chunk_size: usize, chunk_scale: f32) -> Self {
        debug_assert!(chunk_size >= 2, "chunk grid needs at least 2 vertices per side");
        Self {
            field,
            classifier: BiomeClassifier::new(field.height_scale()),
            chunk_size,
            chunk_scale,
        }
    }

    pub fn build(&self, coord: ChunkCoord) -> ChunkMesh {
        let mut mesh = MeshBuild::with_grid_capacity(self.chunk_size);
        self.emit_grid(&mut mesh, coord);
        mesh.recompute_normals();
        let biome = self.assign_biome_colors(&mut mesh);
        let bbox = Aabb::from_points(mesh.positions()).unwrap_or_default();
        log::trace!(
            target: "mesh",
            "chunk ({}, {}) built: {} verts, {} tris, biome {}",
            coord.cx,
            coord.cz,
            mesh.vertex_count(),
            mesh.triangle_count(),
            biome
        );
        ChunkMesh {
            coord,
            bbox,
            biome,
            mesh,
        }
    }

    fn emit_grid(&self, mesh: &mut MeshBuild, coord: ChunkCoord) {
        let n = self.chunk_size;
        let last = (n - 1) as f32;
        let step = self.chunk_scale / last;
        // Global sample indices keep shared edge vertices bit-identical across neighbors.
        let gx0 = i64::from(coord.cx) * (n as i64 - 1);
        let gz0 = i64::from(coord.cz) * (n as i64 - 1);
        for z in 0..n {
            for x in 0..n {
                let wx = (gx0 + x as i64) as f32 * step;
                let wz = (gz0 + z as i64) as f32 * step;
                let h = self.field.height(wx, wz);
                let uv = Vec2::new(x as f32 / last, z as f32 / last);
                mesh.push_vertex(Vec3::new(wx, h, wz), uv, UNCOLORED);
            }
        }
        let n32 = n as u32;
        for z in 0..n32 - 1 {
            for x in 0..n32 - 1 {
                let top_left = z * n32 + x;
                let top_right = top_left + 1;
                let bottom_left = (z + 1) * n32 + x;
                let bottom_right = bottom_left + 1;
                mesh.push_triangle(top_left, bottom_left, top_right);
                mesh.push_triangle(top_right, bottom_left, bottom_right);
            }
        }
    }

    /// Colors every vertex from its own height and moisture; returns the
    /// middle vertex's biome.
    fn assign_biome_colors(&self, mesh: &mut MeshBuild) -> Biome {
        let mid = mesh.vertex_count() / 2;
        let mut dominant = Biome::default();
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let moisture = self.field.moisture(p.x, p.z);
            let biome = self.classifier.classify(p.y, moisture);
            mesh.set_color(i, self.classifier.color_for(biome, p.y));
            if i == mid {
                dominant = biome;
            }
        }
        dominant
    }
}

pub fn build_chunk_mesh(field: &HeightField, params: &WorldGenParams, coord: ChunkCoord) -> ChunkMesh {
    ChunkMeshBuilder::new(field, params.chunk_size, params.chunk_scale).build(coord)
}
