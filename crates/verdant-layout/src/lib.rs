//! Themed zones, terrain snapping, and seeded object layout.
#![forbid(unsafe_code)]

pub mod config;
pub mod placement;
pub mod planner;
pub mod zone;

pub use config::{LayoutConfig, LayoutConfigError, load_layout_from_path, parse_layout};
pub use placement::{DEFAULT_SEARCH_RADIUS, PlacementResolver};
pub use planner::{ObjectKind, PlacedObject, PlacementError, RadialSampling, ZoneLayoutPlanner};
pub use zone::{Theme, ZoneCatalog, ZoneDescriptor};
