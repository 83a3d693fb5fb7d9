use anyhow::Context;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use verdant_geom::{Vec2, Vec3};
use verdant_layout::{LayoutConfig, ObjectKind, PlacementResolver, ZoneLayoutPlanner, load_layout_from_path};
use verdant_stream::{ChunkStore, ChunkUploader, CollisionData, HeadlessUploader};
use verdant_world::{WorldGenParams, load_params_from_path};

use crate::Args;
use crate::watch;

const EYE_HEIGHT: f32 = 1.8;

#[derive(Default)]
struct WalkTotals {
    created: usize,
    evicted: usize,
    failed: usize,
    skipped: usize,
    collision_rebuilds: usize,
}

pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut params = load_world_params(&args.world_config)?;
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let mut store = ChunkStore::new(params, HeadlessUploader::new())
        .context("invalid worldgen parameters")?;
    let reload_rx = args
        .watch_worldgen
        .then(|| watch::watch_file(args.world_config.clone()));

    let spawn = store.find_safe_spawn_point(0.0, 0.0);
    let player = PlacementResolver::new(&store).snap_to_terrain(spawn, EYE_HEIGHT);
    log::info!(
        "spawn at ({:.2}, {:.2}, {:.2}); player placed at y {:.2}",
        spawn.x,
        spawn.y,
        spawn.z,
        player.y
    );

    let heading = args.heading.to_radians();
    let dir = Vec2::new(heading.cos(), heading.sin());
    let mut totals = WalkTotals::default();
    let mut collision = CollisionData::default();
    let mut eye = player;
    for step in 0..args.steps {
        if let Some(rx) = &reload_rx {
            reload_if_changed(rx, &args.world_config, args.seed, &mut store);
        }
        let ground = spawn.xz() + dir * (step as f32 * args.step_length);
        eye = ground.with_height(store.height_at(ground.x, ground.y) + EYE_HEIGHT);
        let report = store.update_lod(eye);
        totals.created += report.created;
        totals.evicted += report.evicted;
        totals.failed += report.failed;
        totals.skipped += usize::from(report.skipped);

        if store.acknowledge() {
            collision = store.collision_data();
            totals.collision_rebuilds += 1;
        }
        log::debug!(
            "step {}: eye ({:.1}, {:.1}, {:.1}) chunks {}",
            step,
            eye.x,
            eye.y,
            eye.z,
            store.len()
        );
        if args.tick_ms > 0 {
            std::thread::sleep(Duration::from_millis(args.tick_ms));
        }
    }
    log_stream_summary(&store, &totals, &collision, eye);

    let mut layout = load_layout(&args.layout_config)?;
    if let Some(seed) = args.layout_seed {
        layout.seed = seed;
    }
    let mut planner = ZoneLayoutPlanner::new(&layout, Some(&store));
    let objects = planner.populate_catalog();
    let suitable = objects
        .iter()
        .filter(|o| planner.is_position_suitable(o.position, o.kind))
        .count();
    let count = |kind: ObjectKind| objects.iter().filter(|o| o.kind == kind).count();
    log::info!(
        "placed {} objects ({} chests, {} keys, {} decorations); {} on suitable ground",
        objects.len(),
        count(ObjectKind::Chest),
        count(ObjectKind::Key),
        count(ObjectKind::Decoration),
        suitable
    );
    for o in &objects {
        log::debug!(
            "{} {} at ({:.2}, {:.2}, {:.2}) yaw {:.2}",
            o.theme,
            o.kind,
            o.position.x,
            o.position.y,
            o.position.z,
            o.rotation.y
        );
    }
    Ok(())
}

fn load_world_params(path: &Path) -> anyhow::Result<WorldGenParams> {
    if !path.exists() {
        log::warn!("worldgen config missing: {}; using defaults", path.display());
        return Ok(WorldGenParams::default());
    }
    load_params_from_path(path).with_context(|| format!("loading worldgen config {}", path.display()))
}

fn load_layout(path: &Path) -> anyhow::Result<LayoutConfig> {
    if !path.exists() {
        log::warn!("layout config missing: {}; using built-in zones", path.display());
        return Ok(LayoutConfig::default());
    }
    load_layout_from_path(path).with_context(|| format!("loading layout config {}", path.display()))
}

fn reload_if_changed<U: ChunkUploader>(
    rx: &Receiver<()>,
    path: &Path,
    seed_override: Option<i32>,
    store: &mut ChunkStore<U>,
) {
    if rx.try_iter().count() == 0 {
        return;
    }
    let mut params = match load_params_from_path(path) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("worldgen config reload failed ({}): {}", path.display(), e);
            return;
        }
    };
    if let Some(seed) = seed_override {
        params.seed = seed;
    }
    match store.update_params(params) {
        Ok(()) => log::info!("worldgen config reloaded from {}", path.display()),
        Err(e) => log::warn!("rejected reloaded worldgen config: {}", e),
    }
}

fn log_stream_summary(
    store: &ChunkStore<HeadlessUploader>,
    totals: &WalkTotals,
    collision: &CollisionData,
    eye: Vec3,
) {
    let up = store.uploader();
    log::info!(
        "walk done: {} created, {} evicted, {} failed, {} skipped requests",
        totals.created,
        totals.evicted,
        totals.failed,
        totals.skipped
    );
    log::info!(
        "{} chunks live ({} visible), {} buffers / {} KiB, {} uploads, {} releases",
        store.len(),
        store.visible_chunks(eye).count(),
        up.live_buffers(),
        up.live_bytes() / 1024,
        up.uploads(),
        up.releases()
    );
    log::info!(
        "collision rebuilt {} times; last has {} vertices, {} triangles",
        totals.collision_rebuilds,
        collision.vertices.len(),
        collision.triangle_count()
    );
}
