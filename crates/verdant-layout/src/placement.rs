use std::fmt;
use verdant_geom::Vec3;
use verdant_world::HeightSource;

pub const DEFAULT_SEARCH_RADIUS: f32 = 5.0;

const SAFETY_OFFSET: f32 = 1.0;
const MIN_PLACED_HEIGHT: f32 = 0.5;
const FLAT_CHECK_RADIUS: f32 = 2.0;
const SEARCH_CHECK_RADIUS: f32 = 1.5;
const SEARCH_FLAT_ENOUGH: f32 = 0.3;
const RING_SAMPLES: usize = 8;
const SEARCH_ANGLES: usize = 12;

/// Snaps and validates single positions against a borrowed height source.
///
/// A resolver without terrain degrades instead of failing: snapping returns the
/// input, flatness checks answer `false`, the nearby search returns the center.
#[derive(Clone, Copy, Default)]
pub struct PlacementResolver<'a> {
    terrain: Option<&'a dyn HeightSource>,
}

impl fmt::Debug for PlacementResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementResolver")
            .field("has_terrain", &self.terrain.is_some())
            .finish()
    }
}

impl<'a> PlacementResolver<'a> {
    pub fn new(terrain: &'a dyn HeightSource) -> Self {
        Self {
            terrain: Some(terrain),
        }
    }

    pub fn detached() -> Self {
        Self { terrain: None }
    }

    pub fn from_option(terrain: Option<&'a dyn HeightSource>) -> Self {
        Self { terrain }
    }

    #[inline]
    pub fn has_terrain(&self) -> bool {
        self.terrain.is_some()
    }

    #[inline]
    pub fn terrain(&self) -> Option<&'a dyn HeightSource> {
        self.terrain
    }

    /// Lifts `p` so an object of `object_height` rests above the surface,
    /// never below `y = 0.5`.
    pub fn snap_to_terrain(&self, p: Vec3, object_height: f32) -> Vec3 {
        let Some(terrain) = self.terrain else {
            log::warn!(target: "placement", "snap_to_terrain without a terrain source; position unchanged");
            return p;
        };
        let ground = terrain.height_at(p.x, p.z);
        let y = (ground + object_height + SAFETY_OFFSET).max(MIN_PLACED_HEIGHT);
        log::debug!(
            target: "placement",
            "snapped ({:.2}, {:.2}) onto ground {:.2}, y {:.2}",
            p.x,
            p.z,
            ground,
            y
        );
        p.with_y(y)
    }

    /// Largest |Δh| between `p` and 8 points on a circle of `check_radius`.
    pub fn height_variation(&self, p: Vec3, check_radius: f32) -> f32 {
        let Some(terrain) = self.terrain else {
            return 0.0;
        };
        ring_variation(terrain, p, check_radius)
    }

    pub fn is_flat(&self, p: Vec3, tolerance: f32) -> bool {
        let Some(terrain) = self.terrain else {
            log::warn!(target: "placement", "is_flat without a terrain source");
            return false;
        };
        ring_variation(terrain, p, FLAT_CHECK_RADIUS) <= tolerance
    }

    /// Nearest position around `center` whose local variation is at most 0.3,
    /// scanning rings 1, 2, .. up to `search_radius`. Falls back to the least
    /// varied candidate. The result sits on the ground (`y` = terrain height).
    pub fn find_nearby_flat(&self, center: Vec3, search_radius: f32) -> Vec3 {
        let Some(terrain) = self.terrain else {
            log::warn!(target: "placement", "find_nearby_flat without a terrain source");
            return center;
        };
        let mut best = center.with_y(terrain.height_at(center.x, center.z));
        let mut min_variation = ring_variation(terrain, center, SEARCH_CHECK_RADIUS);
        if min_variation <= SEARCH_FLAT_ENOUGH {
            return best;
        }

        let mut radius = 1.0_f32;
        while radius <= search_radius {
            for step in 0..SEARCH_ANGLES {
                let angle = (step as f32 * 30.0).to_radians();
                let probe = Vec3::new(
                    center.x + radius * angle.cos(),
                    center.y,
                    center.z + radius * angle.sin(),
                );
                let variation = ring_variation(terrain, probe, SEARCH_CHECK_RADIUS);
                if variation < min_variation {
                    min_variation = variation;
                    best = probe.with_y(terrain.height_at(probe.x, probe.z));
                    if variation <= SEARCH_FLAT_ENOUGH {
                        log::debug!(
                            target: "placement",
                            "flat spot at ({:.2}, {:.2}), variation {:.2}",
                            best.x,
                            best.z,
                            variation
                        );
                        return best;
                    }
                }
            }
            radius += 1.0;
        }
        log::debug!(
            target: "placement",
            "no flat spot within {:.1} of ({:.2}, {:.2}); best variation {:.2}",
            search_radius,
            center.x,
            center.z,
            min_variation
        );
        best
    }
}

fn ring_variation(terrain: &dyn HeightSource, p: Vec3, check_radius: f32) -> f32 {
    let center = terrain.height_at(p.x, p.z);
    (0..RING_SAMPLES)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / RING_SAMPLES as f32;
            let h = terrain.height_at(p.x + check_radius * angle.cos(), p.z + check_radius * angle.sin());
            (h - center).abs()
        })
        .fold(0.0_f32, f32::max)
}
