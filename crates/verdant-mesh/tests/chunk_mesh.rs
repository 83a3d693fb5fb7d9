use proptest::prelude::*;
use verdant_geom::Vec3;
use verdant_mesh::{ChunkMeshBuilder, MeshBuild, build_chunk_mesh};
use verdant_world::{Biome, BiomeClassifier, ChunkCoord, HeightField, WorldGenParams};

fn scenario_params() -> WorldGenParams {
    WorldGenParams {
        chunk_size: 16,
        chunk_scale: 8.0,
        noise_scale: 0.1,
        height_scale: 2.0,
        octaves: 3,
        ..WorldGenParams::default()
    }
}

fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps && (a.z - b.z).abs() <= eps
}

#[test]
fn grid_has_expected_vertex_and_triangle_counts() {
    let params = scenario_params();
    let field = HeightField::new(&params);
    let chunk = build_chunk_mesh(&field, &params, ChunkCoord::new(0, 0));
    assert_eq!(chunk.mesh.vertex_count(), 16 * 16);
    assert_eq!(chunk.mesh.triangle_count(), 15 * 15 * 2);
    assert_eq!(chunk.mesh.uv.len(), 16 * 16 * 2);
    assert_eq!(chunk.mesh.col.len(), 16 * 16 * 3);
    assert!(chunk.mesh.idx.iter().all(|&i| (i as usize) < 256));
}

#[test]
fn grid_spans_exactly_one_chunk_scale() {
    let params = scenario_params();
    let field = HeightField::new(&params);
    let chunk = build_chunk_mesh(&field, &params, ChunkCoord::new(-2, 3));
    let first = chunk.mesh.position(0);
    let last = chunk.mesh.position(chunk.mesh.vertex_count() - 1);
    assert!((first.x - -16.0).abs() < 1e-4 && (first.z - 24.0).abs() < 1e-4);
    assert!((last.x - -8.0).abs() < 1e-4 && (last.z - 32.0).abs() < 1e-4);
    assert_eq!(&chunk.mesh.uv[0..2], &[0.0, 0.0]);
    let n = chunk.mesh.uv.len();
    assert_eq!(&chunk.mesh.uv[n - 2..], &[1.0, 1.0]);
}

#[test]
fn first_cell_winding_matches_grid_layout() {
    let params = scenario_params();
    let field = HeightField::new(&params);
    let chunk = build_chunk_mesh(&field, &params, ChunkCoord::new(0, 0));
    assert_eq!(&chunk.mesh.idx[0..6], &[0, 16, 1, 1, 16, 17]);
}

#[test]
fn level_terrain_has_up_normals_and_no_mountains() {
    let field = HeightField::with_scales(1337, 0.1, 0.0, 3);
    let chunk = ChunkMeshBuilder::new(&field, 8, 4.0).build(ChunkCoord::new(5, -5));
    for i in 0..chunk.mesh.vertex_count() {
        assert!(vapprox(chunk.mesh.normal(i), Vec3::UP, 1e-6));
        assert_eq!(chunk.mesh.position(i).y, 0.0);
    }
    assert_ne!(chunk.biome, Biome::Mountain);
}

#[test]
fn smooth_normals_are_unit_length_and_face_upward() {
    let params = scenario_params();
    let field = HeightField::new(&params);
    let chunk = build_chunk_mesh(&field, &params, ChunkCoord::new(1, 1));
    for i in 0..chunk.mesh.vertex_count() {
        let n = chunk.mesh.normal(i);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.y > 0.0);
    }
}

#[test]
fn dominant_biome_and_colors_follow_classifier() {
    let params = scenario_params();
    let field = HeightField::new(&params);
    let classifier = BiomeClassifier::new(params.height_scale);
    let chunk = build_chunk_mesh(&field, &params, ChunkCoord::new(-1, 0));
    let mid = chunk.representative_position();
    let expected = classifier.classify(mid.y, field.moisture(mid.x, mid.z));
    assert_eq!(chunk.biome, expected);
    for i in (0..chunk.mesh.vertex_count()).step_by(7) {
        let p = chunk.mesh.position(i);
        let biome = classifier.classify(p.y, field.moisture(p.x, p.z));
        assert_eq!(chunk.mesh.color(i), classifier.color_for(biome, p.y));
    }
}

#[test]
fn bbox_encloses_every_vertex() {
    let params = scenario_params();
    let field = HeightField::new(&params);
    let chunk = build_chunk_mesh(&field, &params, ChunkCoord::new(3, -7));
    for p in chunk.mesh.positions() {
        assert!(chunk.bbox.contains(p));
    }
}

#[test]
fn normals_weight_larger_faces_more() {
    // Two triangles sharing vertex 0: a big one in the XZ plane and a small
    // steep one. The shared normal must lean toward the big face.
    let mut mesh = MeshBuild::default();
    let uv = verdant_geom::Vec2::ZERO;
    let c = Vec3::ONE;
    mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), uv, c);
    mesh.push_vertex(Vec3::new(0.0, 0.0, 10.0), uv, c);
    mesh.push_vertex(Vec3::new(10.0, 0.0, 0.0), uv, c);
    mesh.push_vertex(Vec3::new(0.0, 0.1, 0.0), uv, c);
    mesh.push_vertex(Vec3::new(0.1, 0.0, 0.0), uv, c);
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(0, 3, 4);
    mesh.recompute_normals();
    assert!(mesh.normal(0).y > 0.99);
}

proptest! {
    // Shared edge vertices are generated identically by both neighbors
    #[test]
    fn seams_match_between_neighbors(cx in -200i32..200, cz in -200i32..200) {
        let params = scenario_params();
        let field = HeightField::new(&params);
        let n = params.chunk_size;
        let a = build_chunk_mesh(&field, &params, ChunkCoord::new(cx, cz));
        let east = build_chunk_mesh(&field, &params, ChunkCoord::new(cx + 1, cz));
        let south = build_chunk_mesh(&field, &params, ChunkCoord::new(cx, cz + 1));
        for k in 0..n {
            let pa = a.mesh.position(k * n + (n - 1));
            let pb = east.mesh.position(k * n);
            prop_assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            prop_assert_eq!(pa.y.to_bits(), pb.y.to_bits());

            let sa = a.mesh.position((n - 1) * n + k);
            let sb = south.mesh.position(k);
            prop_assert_eq!(sa.z.to_bits(), sb.z.to_bits());
            prop_assert_eq!(sa.y.to_bits(), sb.y.to_bits());
        }
    }
}
