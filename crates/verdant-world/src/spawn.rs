use std::f32::consts::PI;
use verdant_geom::Vec3;

use crate::height::HeightSource;

const SPAWN_TOLERANCE: f32 = 0.5;
const PATCH_HALF_EXTENT: f32 = 1.5;
const PATCH_STEP: f32 = 0.5;
const SEARCH_RADIUS: f32 = 10.0;

/// Largest height difference between `(x, z)` and any point of the surrounding
/// square patch, sampled on a half-unit grid.
fn patch_variation(terrain: &dyn HeightSource, x: f32, z: f32, center_height: f32) -> f32 {
    let steps = (2.0 * PATCH_HALF_EXTENT / PATCH_STEP).round() as i32;
    let mut max_diff = 0.0_f32;
    for ix in 0..=steps {
        for iz in 0..=steps {
            let sx = x - PATCH_HALF_EXTENT + ix as f32 * PATCH_STEP;
            let sz = z - PATCH_HALF_EXTENT + iz as f32 * PATCH_STEP;
            max_diff = max_diff.max((terrain.height_at(sx, sz) - center_height).abs());
        }
    }
    max_diff
}

/// Ground position near the preferred point where the local patch is level
/// enough to stand on. Falls back to the least steep candidate seen.
pub fn find_safe_spawn_point(terrain: &dyn HeightSource, preferred_x: f32, preferred_z: f32) -> Vec3 {
    let height = terrain.height_at(preferred_x, preferred_z);
    if patch_variation(terrain, preferred_x, preferred_z, height) <= SPAWN_TOLERANCE {
        log::debug!(
            target: "spawn",
            "preferred spawn ({:.2}, {:.2}) is level, height {:.2}",
            preferred_x,
            preferred_z,
            height
        );
        return Vec3::new(preferred_x, height, preferred_z);
    }

    let mut best = Vec3::new(preferred_x, height, preferred_z);
    let mut min_steepness = f32::MAX;
    let mut radius = 2.0_f32;
    while radius <= SEARCH_RADIUS {
        for step in 0..12 {
            let angle = (step as f32 * 30.0) * PI / 180.0;
            let tx = preferred_x + radius * angle.cos();
            let tz = preferred_z + radius * angle.sin();
            let th = terrain.height_at(tx, tz);
            let diff = patch_variation(terrain, tx, tz, th);
            if diff < min_steepness {
                min_steepness = diff;
                best = Vec3::new(tx, th, tz);
                if diff < SPAWN_TOLERANCE {
                    log::debug!(
                        target: "spawn",
                        "found level spawn at ({:.2}, {:.2}) height {:.2}",
                        tx,
                        tz,
                        th
                    );
                    return best;
                }
            }
        }
        radius += 1.0;
    }
    log::info!(
        target: "spawn",
        "no level spawn near ({:.2}, {:.2}); using ({:.2}, {:.2}) with variation {:.2}",
        preferred_x,
        preferred_z,
        best.x,
        best.z,
        min_steepness
    );
    best
}
