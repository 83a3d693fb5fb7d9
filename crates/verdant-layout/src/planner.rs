use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::f32::consts::TAU;
use std::fmt;
use thiserror::Error;
use verdant_geom::{Vec2, Vec3};
use verdant_world::HeightSource;

use crate::config::LayoutConfig;
use crate::placement::PlacementResolver;
use crate::zone::{Theme, ZoneCatalog, ZoneDescriptor};

const INNER_RADIUS_FRACTION: f32 = 0.3;
const OUTER_RADIUS_FRACTION: f32 = 0.9;
const SUITABLE_FLATNESS: f32 = 0.8;
const CHEST_FLATNESS: f32 = 0.5;
const MAX_PRERESERVED_OBJECTS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Chest,
    Key,
    /// Non-interactive scenery.
    Decoration,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Chest => "chest",
            ObjectKind::Key => "key",
            ObjectKind::Decoration => "decoration",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedObject {
    pub position: Vec3,
    /// Euler angles in radians; only yaw (`y`) is randomized.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub kind: ObjectKind,
    pub theme: Theme,
}

/// How candidate distances from a zone center are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialSampling {
    /// Radius uniform in `[0.3, 0.9) * r`; denser toward the outer band.
    #[default]
    UniformRadius,
    /// Same annulus, uniform per unit area.
    UniformArea,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("no terrain source available")]
    InvalidReference,
    #[error("{theme} slot {slot}: no valid position after {attempts} attempts")]
    PlacementExhausted {
        theme: Theme,
        slot: usize,
        attempts: u32,
    },
    #[error("candidate ({x:.2}, {z:.2}) outside world bound {bound}")]
    OutOfBounds { x: f32, z: f32, bound: f32 },
}

/// Seeded zone filler. Same seed, config, and terrain give the same layout.
pub struct ZoneLayoutPlanner<'a> {
    resolver: PlacementResolver<'a>,
    catalog: ZoneCatalog,
    rng: ChaCha8Rng,
    world_bound: f32,
    max_attempts: u32,
    object_height: f32,
    sampling: RadialSampling,
}

impl<'a> ZoneLayoutPlanner<'a> {
    pub fn new(config: &LayoutConfig, terrain: Option<&'a dyn HeightSource>) -> Self {
        Self {
            resolver: PlacementResolver::from_option(terrain),
            catalog: config.catalog(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            world_bound: config.world_bound,
            max_attempts: config.max_attempts,
            object_height: config.object_height,
            sampling: config.sampling,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    #[inline]
    pub fn resolver(&self) -> &PlacementResolver<'a> {
        &self.resolver
    }

    #[inline]
    pub fn within_bounds(&self, p: Vec3) -> bool {
        p.x.abs() <= self.world_bound && p.z.abs() <= self.world_bound
    }

    /// Fills every catalog zone in order.
    pub fn populate_catalog(&mut self) -> Vec<PlacedObject> {
        let zones = self.catalog.zones().to_vec();
        let reserve = self
            .catalog
            .capacity()
            .min(MAX_PRERESERVED_OBJECTS * zones.len());
        let mut out = Vec::with_capacity(reserve);
        for zone in &zones {
            let placed = self.populate_zone(zone);
            log::info!(
                target: "layout",
                "{} zone at ({:.1}, {:.1}): placed {}/{}",
                zone.theme,
                zone.center.x,
                zone.center.y,
                placed.len(),
                zone.max_objects
            );
            out.extend(placed);
        }
        log::info!(target: "layout", "layout complete: {} objects in {} zones", out.len(), zones.len());
        out
    }

    /// Up to `zone.max_objects` objects, pairwise at least `zone.min_distance`
    /// apart. Slots that run out of attempts are skipped.
    pub fn populate_zone(&mut self, zone: &ZoneDescriptor) -> Vec<PlacedObject> {
        if !self.resolver.has_terrain() {
            log::warn!(target: "layout", "{} zone: {}; objects keep y = 0", zone.theme, PlacementError::InvalidReference);
        }
        let reserve = zone.max_objects.min(MAX_PRERESERVED_OBJECTS);
        let mut accepted: Vec<Vec3> = Vec::with_capacity(reserve);
        let mut objects = Vec::with_capacity(reserve);
        for slot in 0..zone.max_objects {
            match self.find_slot_position(zone, slot, &accepted) {
                Ok(position) => {
                    accepted.push(position);
                    let object = PlacedObject {
                        position,
                        rotation: Vec3::new(0.0, self.rng.random_range(0.0..TAU), 0.0),
                        scale: Vec3::ONE,
                        kind: self.pick_kind(zone.theme),
                        theme: zone.theme,
                    };
                    log::debug!(
                        target: "layout",
                        "{} {} at ({:.2}, {:.2}, {:.2})",
                        zone.theme,
                        object.kind,
                        position.x,
                        position.y,
                        position.z
                    );
                    objects.push(object);
                }
                Err(e) => log::debug!(target: "layout", "{}", e),
            }
        }
        objects
    }

    fn find_slot_position(
        &mut self,
        zone: &ZoneDescriptor,
        slot: usize,
        accepted: &[Vec3],
    ) -> Result<Vec3, PlacementError> {
        for _ in 0..self.max_attempts {
            let candidate = match self.candidate(zone) {
                Ok(p) => p,
                Err(e) => {
                    log::trace!(target: "layout", "{}", e);
                    continue;
                }
            };
            let snapped = self.snap(candidate);
            if accepted
                .iter()
                .all(|p| p.distance(snapped) >= zone.min_distance)
            {
                return Ok(snapped);
            }
        }
        Err(PlacementError::PlacementExhausted {
            theme: zone.theme,
            slot,
            attempts: self.max_attempts,
        })
    }

    fn candidate(&mut self, zone: &ZoneDescriptor) -> Result<Vec3, PlacementError> {
        let angle = self.rng.random_range(0.0..TAU);
        let radius = match self.sampling {
            RadialSampling::UniformRadius => {
                self.rng
                    .random_range(INNER_RADIUS_FRACTION..OUTER_RADIUS_FRACTION)
                    * zone.radius
            }
            RadialSampling::UniformArea => {
                let lo = INNER_RADIUS_FRACTION * INNER_RADIUS_FRACTION;
                let hi = OUTER_RADIUS_FRACTION * OUTER_RADIUS_FRACTION;
                self.rng.random_range(lo..hi).sqrt() * zone.radius
            }
        };
        let p = polar(zone.center, radius, angle);
        if !self.within_bounds(p) {
            return Err(PlacementError::OutOfBounds {
                x: p.x,
                z: p.z,
                bound: self.world_bound,
            });
        }
        Ok(p)
    }

    fn snap(&self, p: Vec3) -> Vec3 {
        // A detached resolver would warn on every attempt.
        if self.resolver.has_terrain() {
            self.resolver.snap_to_terrain(p, self.object_height)
        } else {
            p
        }
    }

    fn pick_kind(&mut self, theme: Theme) -> ObjectKind {
        if theme == Theme::Treasure {
            if self.rng.random_bool(0.5) {
                ObjectKind::Chest
            } else {
                ObjectKind::Key
            }
        } else {
            match self.rng.random_range(0..3) {
                0 => ObjectKind::Chest,
                1 => ObjectKind::Key,
                _ => ObjectKind::Decoration,
            }
        }
    }

    /// Nudges a position according to the zone theme.
    ///
    /// Forest scatters by up to one unit, desert snaps to a 2-unit grid,
    /// grassland snaps to a 1.5-unit grid with slight scatter. Mountain scans
    /// `dx` rows of -2..=2; in each row the first `dz` whose height is within
    /// 0.5 of the starting spot moves the position by half the offset, and
    /// later rows scan from the moved position. Treasure positions are left
    /// alone.
    pub fn theme_adjusted_position(&mut self, theme: Theme, p: Vec3) -> Vec3 {
        match theme {
            Theme::Treasure => p,
            Theme::Forest => Vec3::new(
                p.x + self.rng.random_range(-1.0_f32..1.0),
                p.y,
                p.z + self.rng.random_range(-1.0_f32..1.0),
            ),
            Theme::Desert => Vec3::new(snap_to_grid(p.x, 2.0), p.y, snap_to_grid(p.z, 2.0)),
            Theme::Grassland => Vec3::new(
                snap_to_grid(p.x, 1.5) + self.rng.random_range(-0.3_f32..0.3),
                p.y,
                snap_to_grid(p.z, 1.5) + self.rng.random_range(-0.3_f32..0.3),
            ),
            Theme::Mountain => {
                let Some(terrain) = self.resolver.terrain() else {
                    return p;
                };
                // Reference height stays fixed while the position drifts.
                let here = terrain.height_at(p.x, p.z);
                let mut q = p;
                for dx in -2..=2 {
                    let match_dz = (-2..=2).find(|&dz| {
                        let h = terrain.height_at(q.x + dx as f32, q.z + dz as f32);
                        (h - here).abs() < 0.5
                    });
                    if let Some(dz) = match_dz {
                        q.x += dx as f32 * 0.5;
                        q.z += dz as f32 * 0.5;
                    }
                }
                q
            }
        }
    }

    /// In bounds and flat enough for `kind`; chests need stricter flatness.
    /// Without terrain only the bounds are checked.
    pub fn is_position_suitable(&self, p: Vec3, kind: ObjectKind) -> bool {
        if !self.within_bounds(p) {
            return false;
        }
        if !self.resolver.has_terrain() {
            return true;
        }
        if !self.resolver.is_flat(p, SUITABLE_FLATNESS) {
            return false;
        }
        kind != ObjectKind::Chest || self.resolver.is_flat(p, CHEST_FLATNESS)
    }

    /// Ground-plane point in the zone disc with radius uniform in `[0, r)`.
    pub fn random_position_in_zone(&mut self, zone: &ZoneDescriptor) -> Vec3 {
        let angle = self.rng.random_range(0.0..TAU);
        let radius = self.rng.random_range(0.0..1.0_f32) * zone.radius;
        polar(zone.center, radius, angle)
    }

    /// Area-uniform ground-plane point in the disc.
    pub fn random_position_in_circle(&mut self, center: Vec2, radius: f32) -> Vec3 {
        let angle = self.rng.random_range(0.0..TAU);
        let r = self.rng.random_range(0.0..1.0_f32).sqrt() * radius;
        polar(center, r, angle)
    }
}

#[inline]
fn polar(center: Vec2, radius: f32, angle: f32) -> Vec3 {
    Vec3::new(center.x + radius * angle.cos(), 0.0, center.y + radius * angle.sin())
}

#[inline]
fn snap_to_grid(v: f32, cell: f32) -> f32 {
    (v / cell).round() * cell
}
