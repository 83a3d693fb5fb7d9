use criterion::{Criterion, black_box, criterion_group, criterion_main};

use verdant_mesh::build_chunk_mesh;
use verdant_world::{ChunkCoord, HeightField, WorldGenParams};

fn bench_build_chunk_default(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_mesh");
    let params = WorldGenParams::default();
    let field = HeightField::new(&params);
    group.bench_function("default_64x64", |b| {
        b.iter(|| {
            let out = build_chunk_mesh(&field, &params, black_box(ChunkCoord::new(3, -2)));
            black_box(out);
        })
    });
    group.finish();
}

fn bench_build_chunk_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_window");
    // Matches a cold 7x7 streaming window with the small-chunk setup.
    let params = WorldGenParams {
        chunk_size: 16,
        chunk_scale: 8.0,
        noise_scale: 0.1,
        height_scale: 2.0,
        octaves: 3,
        ..WorldGenParams::default()
    };
    let field = HeightField::new(&params);
    group.bench_function("window_7x7_16", |b| {
        b.iter(|| {
            for coord in ChunkCoord::new(0, 0).window(3) {
                black_box(build_chunk_mesh(&field, &params, coord));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build_chunk_default, bench_build_chunk_window);
criterion_main!(benches);
