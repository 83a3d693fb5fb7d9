mod driver;
mod watch;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless terrain streaming and zone layout run", long_about = None)]
pub struct Args {
    /// Worldgen config; built-in defaults are used when the file is missing
    #[arg(long, default_value = "assets/worldgen.toml")]
    pub world_config: PathBuf,

    /// Zone layout config; built-in zones are used when the file is missing
    #[arg(long, default_value = "assets/layout.toml")]
    pub layout_config: PathBuf,

    /// Override the terrain seed
    #[arg(long)]
    pub seed: Option<i32>,

    /// Override the layout seed
    #[arg(long)]
    pub layout_seed: Option<u64>,

    /// Number of camera steps to simulate
    #[arg(long, default_value_t = 32)]
    pub steps: usize,

    /// World units travelled per step
    #[arg(long, default_value_t = 12.0)]
    pub step_length: f32,

    /// Walk heading in degrees, 0 along +x
    #[arg(long, default_value_t = 30.0)]
    pub heading: f32,

    /// Pause between steps in milliseconds
    #[arg(long, default_value_t = 0)]
    pub tick_ms: u64,

    /// Reload the worldgen config when it changes on disk
    #[arg(long)]
    pub watch_worldgen: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    driver::run(&args)
}
