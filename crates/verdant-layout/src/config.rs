use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::planner::RadialSampling;
use crate::zone::{ZoneCatalog, ZoneDescriptor};

#[derive(Debug, Error)]
pub enum LayoutConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid layout parameter `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Object layout settings. Every field is optional in TOML:
///
/// ```toml
/// seed = 7
/// sampling = "uniform_area"
///
/// [[zones]]
/// theme = "forest"
/// center = [15.0, 15.0]
/// radius = 12.0
/// max_objects = 6
/// min_distance = 3.0
/// ```
///
/// Omitting `zones` yields the five built-in zones.
#[derive(Clone, Debug, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_world_bound")]
    pub world_bound: f32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_object_height")]
    pub object_height: f32,
    #[serde(default)]
    pub sampling: RadialSampling,
    #[serde(default = "ZoneCatalog::default_zones")]
    pub zones: Vec<ZoneDescriptor>,
}

fn default_seed() -> u64 {
    1337
}
fn default_world_bound() -> f32 {
    40.0
}
fn default_max_attempts() -> u32 {
    50
}
fn default_object_height() -> f32 {
    0.5
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            world_bound: default_world_bound(),
            max_attempts: default_max_attempts(),
            object_height: default_object_height(),
            sampling: RadialSampling::default(),
            zones: ZoneCatalog::default_zones(),
        }
    }
}

impl LayoutConfig {
    pub fn catalog(&self) -> ZoneCatalog {
        ZoneCatalog::new(self.zones.clone())
    }

    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        let invalid = |name: &'static str, reason: String| {
            Err(LayoutConfigError::Invalid { name, reason })
        };
        if !(self.world_bound.is_finite() && self.world_bound > 0.0) {
            return invalid("world_bound", format!("must be positive, got {}", self.world_bound));
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts", "must be at least 1".to_string());
        }
        if !self.object_height.is_finite() {
            return invalid("object_height", format!("must be finite, got {}", self.object_height));
        }
        for z in &self.zones {
            if !(z.radius.is_finite() && z.radius > 0.0) {
                return invalid("zones.radius", format!("{} zone radius must be positive, got {}", z.theme, z.radius));
            }
            if !(z.min_distance.is_finite() && z.min_distance >= 0.0) {
                return invalid(
                    "zones.min_distance",
                    format!("{} zone min_distance must not be negative, got {}", z.theme, z.min_distance),
                );
            }
        }
        Ok(())
    }
}

pub fn parse_layout(s: &str) -> Result<LayoutConfig, LayoutConfigError> {
    let cfg: LayoutConfig = toml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_layout_from_path(path: &Path) -> Result<LayoutConfig, LayoutConfigError> {
    let s = fs::read_to_string(path).map_err(|source| LayoutConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layout(&s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Theme;
    use verdant_geom::Vec2;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse_layout("").unwrap();
        assert_eq!(cfg.seed, 1337);
        assert_eq!(cfg.world_bound, 40.0);
        assert_eq!(cfg.max_attempts, 50);
        assert_eq!(cfg.object_height, 0.5);
        assert_eq!(cfg.sampling, RadialSampling::UniformRadius);
        assert_eq!(cfg.catalog(), ZoneCatalog::default());
    }

    #[test]
    fn custom_zones_replace_defaults() {
        let cfg = parse_layout(
            r#"
            seed = 9
            sampling = "uniform_area"

            [[zones]]
            theme = "desert"
            center = [4.0, -6.0]
            radius = 5.0
            max_objects = 2
            min_distance = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sampling, RadialSampling::UniformArea);
        assert_eq!(cfg.zones.len(), 1);
        let z = cfg.zones[0];
        assert_eq!(z.theme, Theme::Desert);
        assert_eq!(z.center, Vec2::new(4.0, -6.0));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse_layout("max_attempts = 0"),
            Err(LayoutConfigError::Invalid { name: "max_attempts", .. })
        ));
        let bad_zone = r#"
            [[zones]]
            theme = "forest"
            center = [0.0, 0.0]
            radius = -1.0
            max_objects = 1
            min_distance = 1.0
        "#;
        assert!(parse_layout(bad_zone).is_err());
        assert!(matches!(parse_layout("sampling = 3"), Err(LayoutConfigError::Parse(_))));
    }
}
