use serde::{Deserialize, Deserializer};
use std::fmt;
use verdant_geom::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Treasure,
    Forest,
    Desert,
    Mountain,
    Grassland,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Treasure => "treasure",
            Theme::Forest => "forest",
            Theme::Desert => "desert",
            Theme::Mountain => "mountain",
            Theme::Grassland => "grassland",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Circular placement region on the ground plane.
///
/// In TOML the center is written as an `[x, z]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ZoneDescriptor {
    pub theme: Theme,
    #[serde(deserialize_with = "center_from_pair")]
    pub center: Vec2,
    pub radius: f32,
    pub max_objects: usize,
    pub min_distance: f32,
}

fn center_from_pair<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
    let [x, z] = <[f32; 2]>::deserialize(d)?;
    Ok(Vec2::new(x, z))
}

impl ZoneDescriptor {
    pub const fn new(
        theme: Theme,
        center: Vec2,
        radius: f32,
        max_objects: usize,
        min_distance: f32,
    ) -> Self {
        Self {
            theme,
            center,
            radius,
            max_objects,
            min_distance,
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance(p) <= self.radius
    }
}

const DEFAULT_ZONES: [ZoneDescriptor; 5] = [
    ZoneDescriptor::new(Theme::Treasure, Vec2::new(0.0, 0.0), 8.0, 3, 2.0),
    ZoneDescriptor::new(Theme::Forest, Vec2::new(15.0, 15.0), 12.0, 6, 3.0),
    ZoneDescriptor::new(Theme::Desert, Vec2::new(15.0, -15.0), 12.0, 4, 4.0),
    ZoneDescriptor::new(Theme::Mountain, Vec2::new(-15.0, 15.0), 12.0, 3, 5.0),
    ZoneDescriptor::new(Theme::Grassland, Vec2::new(-15.0, -15.0), 12.0, 5, 3.5),
];

/// Ordered, read-only zone table.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneCatalog {
    zones: Vec<ZoneDescriptor>,
}

impl ZoneCatalog {
    pub fn new(zones: Vec<ZoneDescriptor>) -> Self {
        Self { zones }
    }

    /// Treasure core at the origin ringed by four biome zones.
    pub fn default_zones() -> Vec<ZoneDescriptor> {
        DEFAULT_ZONES.to_vec()
    }

    #[inline]
    pub fn zones(&self) -> &[ZoneDescriptor] {
        &self.zones
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneDescriptor> + '_ {
        self.zones.iter()
    }

    /// First zone with the given theme.
    pub fn by_theme(&self, theme: Theme) -> Option<&ZoneDescriptor> {
        self.zones.iter().find(|z| z.theme == theme)
    }

    /// First zone whose disc contains `p`.
    pub fn zone_at(&self, p: Vec2) -> Option<&ZoneDescriptor> {
        self.zones.iter().find(|z| z.contains(p))
    }

    /// Upper bound on objects a full layout pass can produce.
    pub fn capacity(&self) -> usize {
        self.zones
            .iter()
            .fold(0usize, |acc, z| acc.saturating_add(z.max_objects))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::new(Self::default_zones())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zones_do_not_overlap() {
        let zones = ZoneCatalog::default_zones();
        for (i, a) in zones.iter().enumerate() {
            for b in &zones[i + 1..] {
                assert!(a.center.distance(b.center) >= a.radius + b.radius, "{} vs {}", a.theme, b.theme);
            }
        }
    }

    #[test]
    fn lookup_by_theme_and_point() {
        let cat = ZoneCatalog::default();
        assert_eq!(cat.len(), 5);
        assert_eq!(cat.capacity(), 21);
        assert_eq!(cat.by_theme(Theme::Desert).map(|z| z.max_objects), Some(4));
        assert_eq!(cat.zone_at(Vec2::new(-14.0, 16.0)).map(|z| z.theme), Some(Theme::Mountain));
        assert_eq!(cat.zone_at(Vec2::new(0.0, 30.0)), None);
    }

    #[test]
    fn capacity_saturates() {
        let huge = ZoneDescriptor::new(Theme::Forest, Vec2::ZERO, 1.0, usize::MAX, 0.0);
        let cat = ZoneCatalog::new(vec![huge, huge]);
        assert_eq!(cat.capacity(), usize::MAX);
    }
}
